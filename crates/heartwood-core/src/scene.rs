//! # Scene Specification
//!
//! Pure derivation of the data contract the 3D renderer consumes. The
//! renderer itself (meshes, procedural textures, displacement maps) lives in
//! the storefront and is opaque to this crate: the contract is "render
//! best-effort given these fields", with no error channel back.
//!
//! ## Memoization
//! Texture and displacement generation is the expensive part of a
//! configuration change, and rapid slider drags would otherwise recompute it
//! redundantly. [`SceneKey`] captures exactly the configuration fields that
//! affect visuals — quantity and rush status deliberately excluded — so the
//! session layer can skip regeneration when the key is unchanged.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{
    CarvingPattern, CarvingStyle, CarvingTechnique, Dimensions, FinishType, ProductType, WoodType,
};
use crate::config::Configuration;

// =============================================================================
// Scene Key
// =============================================================================

/// The visually-relevant subset of a configuration.
///
/// Two configurations with equal keys render identically, so the derived
/// [`SceneSpec`] can be reused. Dimensions are compared by bit pattern
/// (exact slider values; no epsilon games), and the uploaded image by a
/// cheap content fingerprint rather than its full bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneKey {
    product_type: ProductType,
    wood_type: WoodType,
    finish_type: FinishType,
    technique: CarvingTechnique,
    style: CarvingStyle,
    pattern: CarvingPattern,
    carving_depth: u8,
    carving_detail: u8,
    dimension_bits: [u64; 3],
    engraving_text: String,
    image_fingerprint: Option<u64>,
}

impl SceneKey {
    /// Extracts the key from a configuration.
    pub fn of(config: &Configuration) -> Self {
        SceneKey {
            product_type: config.product_type,
            wood_type: config.wood_type,
            finish_type: config.finish_type,
            technique: config.carving_technique,
            style: config.carving_style,
            pattern: config.pattern,
            carving_depth: config.carving_depth,
            carving_detail: config.carving_detail,
            dimension_bits: [
                config.dimensions.width.to_bits(),
                config.dimensions.height.to_bits(),
                config.dimensions.depth.to_bits(),
            ],
            engraving_text: config.custom_text.clone(),
            image_fingerprint: config
                .custom_pattern_image
                .as_ref()
                .map(|image| fingerprint(&image.bytes)),
        }
    }
}

/// FNV-1a over the image bytes. Collision-tolerant: a false hit only reuses
/// a stale texture for one frame of an edge case nobody can produce from
/// the upload widget.
fn fingerprint(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

// =============================================================================
// Scene Spec
// =============================================================================

/// Base mesh the renderer instantiates per product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    Chair,
    Table,
    Cabinet,
    Panel,
    Sculpture,
    Frame,
}

impl From<ProductType> for MeshKind {
    fn from(product_type: ProductType) -> Self {
        match product_type {
            ProductType::Chair => MeshKind::Chair,
            ProductType::Table => MeshKind::Table,
            ProductType::Cabinet => MeshKind::Cabinet,
            ProductType::WallPanel => MeshKind::Panel,
            ProductType::Sculpture => MeshKind::Sculpture,
            ProductType::PictureFrame => MeshKind::Frame,
        }
    }
}

/// Procedural wood-grain parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GrainParams {
    /// Base albedo as a CSS hex color.
    pub base_color: String,

    /// Rings per unit, drives the procedural grain frequency.
    pub grain_density: f64,

    /// Figure descriptor the texture generator keys its noise preset on.
    pub figure: String,
}

/// Surface finish parameters (straight from the catalog; price-irrelevant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinishParams {
    pub roughness: f64,
    pub sheen: f64,
}

/// Displacement/texturing parameters for the carved regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CarvingParams {
    /// Displacement scale in model units: depth slider mapped to [0, 0.08].
    pub displacement_scale: f64,

    /// Noise octaves for the detail pass: detail slider mapped to [1, 6].
    pub detail_octaves: u8,

    /// Stable keys the renderer resolves to motif/layout assets.
    pub technique: String,
    pub style_motif: String,
    pub pattern_layout: String,

    /// The uploaded image (if any) replaces the procedural pattern layer.
    pub uses_custom_image: bool,
}

/// Everything the renderer needs for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SceneSpec {
    pub mesh: MeshKind,
    pub dimensions: Dimensions,
    pub grain: GrainParams,
    pub finish: FinishParams,

    /// Absent for an uncarved piece.
    pub carving: Option<CarvingParams>,

    /// Inscription to engrave, if any.
    pub engraving_text: Option<String>,
}

impl SceneSpec {
    /// Derives the renderer contract from a configuration. Pure — the
    /// session layer pairs this with a [`SceneKey`] to avoid re-deriving on
    /// visually-irrelevant changes.
    pub fn from_configuration(config: &Configuration) -> Self {
        let carving = if config.has_carving() {
            Some(CarvingParams {
                displacement_scale: config.carving_depth as f64 / 10.0 * 0.08,
                detail_octaves: 1 + config.carving_detail / 2,
                technique: config.carving_technique.key().to_string(),
                style_motif: config.carving_style.key().to_string(),
                pattern_layout: config.pattern.key().to_string(),
                uses_custom_image: config.custom_pattern_image.is_some(),
            })
        } else {
            None
        };

        SceneSpec {
            mesh: MeshKind::from(config.product_type),
            dimensions: config.dimensions,
            grain: wood_grain(config.wood_type),
            finish: FinishParams {
                roughness: config.finish_type.roughness(),
                sheen: config.finish_type.sheen(),
            },
            carving,
            engraving_text: if config.custom_text.is_empty() {
                None
            } else {
                Some(config.custom_text.clone())
            },
        }
    }
}

/// Render-side grain mapping per wood species.
fn wood_grain(wood: WoodType) -> GrainParams {
    let (base_color, grain_density, figure) = match wood {
        WoodType::Pine => ("#d9b380", 3.0, "knotty"),
        WoodType::Oak => ("#c49a6c", 5.0, "ray_fleck"),
        WoodType::Maple => ("#e8d3a9", 7.0, "tight"),
        WoodType::Cherry => ("#a0522d", 6.0, "warm"),
        WoodType::Walnut => ("#5d4037", 5.5, "cathedral"),
        WoodType::Mahogany => ("#7b3f00", 4.5, "ribbon"),
        WoodType::Ebony => ("#1c1713", 9.0, "dense"),
    };
    GrainParams {
        base_color: base_color.to_string(),
        grain_density,
        figure: figure.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FinishType;
    use crate::config::ConfigurationUpdate;

    #[test]
    fn test_price_only_fields_do_not_change_key() {
        let config = Configuration::new();
        let key = SceneKey::of(&config);

        let busier = config.apply(&ConfigurationUpdate {
            quantity: Some(7),
            rush_order: Some(true),
            ..Default::default()
        });
        assert_eq!(key, SceneKey::of(&busier));
    }

    #[test]
    fn test_visual_fields_change_key() {
        let config = Configuration::new();
        let key = SceneKey::of(&config);

        let rewooded = config.apply(&ConfigurationUpdate {
            wood_type: Some(WoodType::Ebony),
            ..Default::default()
        });
        assert_ne!(key, SceneKey::of(&rewooded));

        let resized = config.apply(&ConfigurationUpdate {
            dimensions: Some(Dimensions::new(1.3, 2.0, 1.0)),
            ..Default::default()
        });
        assert_ne!(key, SceneKey::of(&resized));
    }

    #[test]
    fn test_uncarved_spec_has_no_carving_block() {
        let spec = SceneSpec::from_configuration(&Configuration::new());
        assert_eq!(spec.mesh, MeshKind::Chair);
        assert!(spec.carving.is_none());
        assert!(spec.engraving_text.is_none());
    }

    #[test]
    fn test_carved_spec_maps_sliders() {
        let config = Configuration::new().apply(&ConfigurationUpdate {
            carving_technique: Some(CarvingTechnique::Relief),
            carving_depth: Some(10),
            carving_detail: Some(10),
            custom_text: Some("For Marta".to_string()),
            ..Default::default()
        });
        let spec = SceneSpec::from_configuration(&config);
        let carving = spec.carving.expect("carved piece must have a carving block");
        assert!((carving.displacement_scale - 0.08).abs() < 1e-9);
        assert_eq!(carving.detail_octaves, 6);
        assert_eq!(carving.technique, "relief");
        assert_eq!(spec.engraving_text.as_deref(), Some("For Marta"));
    }

    #[test]
    fn test_finish_params_come_from_catalog() {
        let config = Configuration::new().apply(&ConfigurationUpdate {
            finish_type: Some(FinishType::GlossLacquer),
            ..Default::default()
        });
        let spec = SceneSpec::from_configuration(&config);
        assert_eq!(spec.finish.roughness, FinishType::GlossLacquer.roughness());
        assert_eq!(spec.finish.sheen, FinishType::GlossLacquer.sheen());
    }

    #[test]
    fn test_derivation_deterministic() {
        let config = Configuration::new();
        assert_eq!(
            SceneSpec::from_configuration(&config),
            SceneSpec::from_configuration(&config)
        );
    }
}
