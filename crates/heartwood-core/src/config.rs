//! # Configuration State Machine
//!
//! The single source of truth for a visitor's commission selections, and the
//! pure reducer that enforces every cross-field invariant on update.
//!
//! ## Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Update Flow                            │
//! │                                                                         │
//! │  UI control change ──► ConfigurationUpdate (partial patch)             │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  Configuration::apply(patch)                                           │
//! │    1. shallow-merge supplied fields                                    │
//! │    2. product type changed?  → dimensions reset to the type's default  │
//! │       (the type's default wins even if the SAME patch carried          │
//! │        dimensions — documented precedence rule)                        │
//! │    3. technique == none?     → style/pattern/depth/detail/image reset  │
//! │    4. defensive clamps       → quantity, depth, detail, dimensions,    │
//! │                                custom text                             │
//! │    5. custom pattern without a stored image falls back to "none"       │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  New Configuration ──► pricing engine ──► scene spec ──► callbacks     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reducer never raises for out-of-range numerics — the UI only offers
//! bounded controls, and anything else is clamped at this boundary. The one
//! rejection path is `PatternImage::new`, which refuses non-image uploads
//! before any state exists to mutate.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{
    CarvingPattern, CarvingStyle, CarvingTechnique, Dimensions, FinishType, ProductType, WoodType,
};
use crate::error::ValidationError;
use crate::{MAX_CARVING_LEVEL, MAX_CUSTOM_TEXT_LEN, MAX_QUANTITY};

// =============================================================================
// Pattern Image
// =============================================================================

/// An uploaded custom carving pattern.
///
/// Bytes travel base64-encoded inside JSON payloads (snapshots); share links
/// exclude the image entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PatternImage {
    /// Original file name, for display in the upload widget.
    pub file_name: String,

    /// Canonical content type as sniffed from the payload (e.g. "image/png").
    pub content_type: String,

    /// Raw image bytes.
    #[serde(with = "image_bytes_serde")]
    #[ts(as = "String")]
    pub bytes: Vec<u8>,
}

impl PatternImage {
    /// Validates and wraps an uploaded payload.
    ///
    /// The payload is sniffed by magic bytes; the declared content type is
    /// only used for the error message when sniffing fails. A rejected
    /// upload produces no state anywhere.
    ///
    /// ## Errors
    /// `ValidationError::NotAnImage` — payload is not PNG/JPEG/GIF/WebP.
    pub fn new(
        file_name: impl Into<String>,
        declared_content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        let sniffed = detect_image_type(&bytes).ok_or_else(|| ValidationError::NotAnImage {
            content_type: declared_content_type.to_string(),
        })?;

        Ok(PatternImage {
            file_name: file_name.into(),
            content_type: sniffed.to_string(),
            bytes,
        })
    }
}

/// Sniffs the image type from leading magic bytes.
///
/// Returns the canonical content type, or `None` for anything that is not a
/// recognized raster image.
fn detect_image_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

/// Base64 transport for image bytes inside JSON payloads.
mod image_bytes_serde {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        STANDARD.encode(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// A visitor's complete commission configuration.
///
/// ## Invariants (hold after every `apply` / `with_custom_pattern`)
/// - `carving_technique == None` implies style/pattern are `None`, depth and
///   detail are 0, and no custom pattern image is retained
/// - `dimensions` sit inside the active product type's declared bounds
/// - `pattern == Custom` implies a stored `custom_pattern_image`
/// - `quantity` in [1, 10]; `carving_depth`/`carving_detail` in [0, 10];
///   `custom_text` at most 50 characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub product_type: ProductType,
    pub wood_type: WoodType,
    pub finish_type: FinishType,
    pub carving_technique: CarvingTechnique,
    pub carving_style: CarvingStyle,
    pub pattern: CarvingPattern,

    /// Carving depth slider, 0..=10.
    pub carving_depth: u8,

    /// Carving detail slider, 0..=10.
    pub carving_detail: u8,

    pub dimensions: Dimensions,

    /// Number of identical pieces, 1..=10. Volume discounts apply from 3 up.
    pub quantity: u32,

    /// Free-form inscription, at most 50 characters.
    pub custom_text: String,

    /// Present only when `pattern == Custom`.
    pub custom_pattern_image: Option<PatternImage>,

    pub rush_order: bool,
}

impl Configuration {
    /// The configuration every configurator session starts from.
    pub fn new() -> Self {
        let product_type = ProductType::default();
        Configuration {
            product_type,
            wood_type: WoodType::default(),
            finish_type: FinishType::default(),
            carving_technique: CarvingTechnique::default(),
            carving_style: CarvingStyle::default(),
            pattern: CarvingPattern::default(),
            carving_depth: 0,
            carving_detail: 0,
            dimensions: product_type.default_dimensions(),
            quantity: 1,
            custom_text: String::new(),
            custom_pattern_image: None,
            rush_order: false,
        }
    }

    /// Applies a partial update and returns the resulting configuration.
    ///
    /// Pure: `self` is untouched. Side-effect rules run in a fixed order
    /// after the shallow merge (see the module docs).
    pub fn apply(&self, update: &ConfigurationUpdate) -> Configuration {
        let mut next = self.clone();

        // Shallow merge of supplied fields
        if let Some(product_type) = update.product_type {
            next.product_type = product_type;
        }
        if let Some(wood_type) = update.wood_type {
            next.wood_type = wood_type;
        }
        if let Some(finish_type) = update.finish_type {
            next.finish_type = finish_type;
        }
        if let Some(technique) = update.carving_technique {
            next.carving_technique = technique;
        }
        if let Some(style) = update.carving_style {
            next.carving_style = style;
        }
        if let Some(pattern) = update.pattern {
            next.pattern = pattern;
        }
        if let Some(depth) = update.carving_depth {
            next.carving_depth = depth;
        }
        if let Some(detail) = update.carving_detail {
            next.carving_detail = detail;
        }
        if let Some(dimensions) = update.dimensions {
            next.dimensions = dimensions;
        }
        if let Some(quantity) = update.quantity {
            next.quantity = quantity;
        }
        if let Some(ref custom_text) = update.custom_text {
            next.custom_text = custom_text.clone();
        }
        if let Some(rush_order) = update.rush_order {
            next.rush_order = rush_order;
        }

        // Product-type switch resets dimensions to the new type's defaults.
        // The default wins even when the same patch carried dimensions.
        if next.product_type != self.product_type {
            next.dimensions = next.product_type.default_dimensions();
        }

        next.normalize();
        next
    }

    /// Stores an uploaded custom pattern and selects the custom pattern slot.
    ///
    /// Upload is the only path into `pattern == Custom`. Uploading onto an
    /// uncarved piece (`technique == None`) does not stick: normalization
    /// clears the carving block, image included.
    pub fn with_custom_pattern(&self, image: PatternImage) -> Configuration {
        let mut next = self.clone();
        next.custom_pattern_image = Some(image);
        next.pattern = CarvingPattern::Custom;
        next.normalize();
        next
    }

    /// Enforces the cross-field invariants and defensive clamps in place.
    ///
    /// Every constructor/reducer path funnels through here, so a
    /// `Configuration` observed outside this module always satisfies the
    /// invariants documented on the type.
    fn normalize(&mut self) {
        // An uncarved piece carries no carving parameters at all
        if self.carving_technique.is_none() {
            self.carving_style = CarvingStyle::None;
            self.pattern = CarvingPattern::None;
            self.carving_depth = 0;
            self.carving_detail = 0;
            self.custom_pattern_image = None;
        }

        // Custom pattern cannot stand without its image
        if self.pattern == CarvingPattern::Custom && self.custom_pattern_image.is_none() {
            self.pattern = CarvingPattern::None;
        }

        // Defensive clamps: the UI offers bounded controls, but nothing
        // downstream should have to trust that
        self.quantity = self.quantity.clamp(1, MAX_QUANTITY);
        self.carving_depth = self.carving_depth.min(MAX_CARVING_LEVEL);
        self.carving_detail = self.carving_detail.min(MAX_CARVING_LEVEL);
        self.dimensions = self
            .dimensions
            .clamp_to(&self.product_type.dimension_bounds());
        if self.custom_text.chars().count() > MAX_CUSTOM_TEXT_LEN {
            self.custom_text = self.custom_text.chars().take(MAX_CUSTOM_TEXT_LEN).collect();
        }
    }

    /// Whether the piece is carved at all. Gates the whole carving cost
    /// block in the pricing engine.
    pub fn has_carving(&self) -> bool {
        !self.carving_technique.is_none()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

// =============================================================================
// Configuration Update
// =============================================================================

/// Partial update to a [`Configuration`]. Every field is optional; absent
/// fields keep their current value.
///
/// Note there is deliberately no `custom_pattern_image` field here — image
/// upload is a distinct operation with its own validation
/// ([`Configuration::with_custom_pattern`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationUpdate {
    pub product_type: Option<ProductType>,
    pub wood_type: Option<WoodType>,
    pub finish_type: Option<FinishType>,
    pub carving_technique: Option<CarvingTechnique>,
    pub carving_style: Option<CarvingStyle>,
    pub pattern: Option<CarvingPattern>,
    pub carving_depth: Option<u8>,
    pub carving_detail: Option<u8>,
    pub dimensions: Option<Dimensions>,
    pub quantity: Option<u32>,
    pub custom_text: Option<String>,
    pub rush_order: Option<bool>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_image() -> PatternImage {
        PatternImage::new("rose.png", "image/png", PNG_MAGIC.to_vec()).unwrap()
    }

    fn carved() -> Configuration {
        Configuration::new().apply(&ConfigurationUpdate {
            carving_technique: Some(CarvingTechnique::Relief),
            carving_style: Some(CarvingStyle::Floral),
            pattern: Some(CarvingPattern::Border),
            carving_depth: Some(4),
            carving_detail: Some(5),
            ..Default::default()
        })
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::new();
        assert_eq!(config.product_type, ProductType::Chair);
        assert_eq!(config.dimensions, ProductType::Chair.default_dimensions());
        assert_eq!(config.quantity, 1);
        assert!(!config.has_carving());
        assert!(config.custom_pattern_image.is_none());
    }

    #[test]
    fn test_shallow_merge_keeps_unmentioned_fields() {
        let config = Configuration::new().apply(&ConfigurationUpdate {
            wood_type: Some(WoodType::Walnut),
            ..Default::default()
        });
        assert_eq!(config.wood_type, WoodType::Walnut);
        assert_eq!(config.product_type, ProductType::Chair);
        assert_eq!(config.finish_type, FinishType::Natural);
    }

    #[test]
    fn test_technique_none_resets_carving_block() {
        let mut config = carved();
        config = config.with_custom_pattern(png_image());
        assert_eq!(config.pattern, CarvingPattern::Custom);

        let reset = config.apply(&ConfigurationUpdate {
            carving_technique: Some(CarvingTechnique::None),
            ..Default::default()
        });

        assert_eq!(reset.carving_style, CarvingStyle::None);
        assert_eq!(reset.pattern, CarvingPattern::None);
        assert_eq!(reset.carving_depth, 0);
        assert_eq!(reset.carving_detail, 0);
        assert!(reset.custom_pattern_image.is_none());
    }

    #[test]
    fn test_product_switch_resets_dimensions() {
        let config = Configuration::new().apply(&ConfigurationUpdate {
            dimensions: Some(Dimensions::new(1.5, 2.5, 1.2)),
            ..Default::default()
        });
        assert_eq!(config.dimensions, Dimensions::new(1.5, 2.5, 1.2));

        let switched = config.apply(&ConfigurationUpdate {
            product_type: Some(ProductType::Table),
            ..Default::default()
        });
        assert_eq!(switched.dimensions, ProductType::Table.default_dimensions());
    }

    #[test]
    fn test_product_default_wins_over_patched_dimensions() {
        // Patch carries BOTH a new product type and dimensions: the product
        // type's defaults win (documented precedence rule)
        let config = Configuration::new().apply(&ConfigurationUpdate {
            product_type: Some(ProductType::Sculpture),
            dimensions: Some(Dimensions::new(2.0, 2.0, 2.0)),
            ..Default::default()
        });
        assert_eq!(
            config.dimensions,
            ProductType::Sculpture.default_dimensions()
        );
    }

    #[test]
    fn test_same_product_type_keeps_patched_dimensions() {
        // Re-stating the current product type is not a switch
        let config = Configuration::new().apply(&ConfigurationUpdate {
            product_type: Some(ProductType::Chair),
            dimensions: Some(Dimensions::new(1.5, 2.5, 1.2)),
            ..Default::default()
        });
        assert_eq!(config.dimensions, Dimensions::new(1.5, 2.5, 1.2));
    }

    #[test]
    fn test_quantity_clamped() {
        let config = Configuration::new().apply(&ConfigurationUpdate {
            quantity: Some(0),
            ..Default::default()
        });
        assert_eq!(config.quantity, 1);

        let config = Configuration::new().apply(&ConfigurationUpdate {
            quantity: Some(99),
            ..Default::default()
        });
        assert_eq!(config.quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_carving_levels_clamped() {
        let config = carved().apply(&ConfigurationUpdate {
            carving_depth: Some(200),
            carving_detail: Some(11),
            ..Default::default()
        });
        assert_eq!(config.carving_depth, MAX_CARVING_LEVEL);
        assert_eq!(config.carving_detail, MAX_CARVING_LEVEL);
    }

    #[test]
    fn test_dimensions_clamped_to_product_bounds() {
        let config = Configuration::new().apply(&ConfigurationUpdate {
            dimensions: Some(Dimensions::new(100.0, 0.0, 1.0)),
            ..Default::default()
        });
        let bounds = ProductType::Chair.dimension_bounds();
        assert_eq!(config.dimensions.width, bounds.max.width);
        assert_eq!(config.dimensions.height, bounds.min.height);
        assert_eq!(config.dimensions.depth, 1.0);
    }

    #[test]
    fn test_custom_text_truncated_char_safe() {
        let long = "ü".repeat(60);
        let config = Configuration::new().apply(&ConfigurationUpdate {
            custom_text: Some(long),
            ..Default::default()
        });
        assert_eq!(config.custom_text.chars().count(), MAX_CUSTOM_TEXT_LEN);
    }

    #[test]
    fn test_upload_sets_custom_pattern() {
        let config = carved().with_custom_pattern(png_image());
        assert_eq!(config.pattern, CarvingPattern::Custom);
        assert!(config.custom_pattern_image.is_some());
        assert_eq!(
            config.custom_pattern_image.as_ref().unwrap().content_type,
            "image/png"
        );
    }

    #[test]
    fn test_upload_rejects_non_image() {
        let err = PatternImage::new("notes.txt", "text/plain", b"hello".to_vec()).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnImage { .. }));
    }

    #[test]
    fn test_upload_sniffs_jpeg_despite_declared_type() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00];
        let image = PatternImage::new("photo.bin", "application/octet-stream", jpeg).unwrap();
        assert_eq!(image.content_type, "image/jpeg");
    }

    #[test]
    fn test_upload_on_uncarved_piece_does_not_stick() {
        let config = Configuration::new().with_custom_pattern(png_image());
        assert_eq!(config.pattern, CarvingPattern::None);
        assert!(config.custom_pattern_image.is_none());
    }

    #[test]
    fn test_custom_pattern_without_image_falls_back() {
        let config = carved().apply(&ConfigurationUpdate {
            pattern: Some(CarvingPattern::Custom),
            ..Default::default()
        });
        assert_eq!(config.pattern, CarvingPattern::None);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = carved().with_custom_pattern(png_image());
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"carvingTechnique\":\"relief\""));
        let back: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
