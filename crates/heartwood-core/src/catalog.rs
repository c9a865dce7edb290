//! # Catalog Definitions
//!
//! Closed enumerations for every configurator dimension, with total mapping
//! functions to price effects and display metadata.
//!
//! ## Catalog Dimensions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Dimensions                                │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductType    │   │    WoodType     │   │   FinishType    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  base_price     │   │  price_per_area │   │  price_per_area │       │
//! │  │  base_hours     │   │  (additive)     │   │  roughness      │       │
//! │  │  dimension      │   │                 │   │  (render only)  │       │
//! │  │  bounds/default │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CarvingTechnique│   │  CarvingStyle   │   │ CarvingPattern  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │ price_multiplier│   │ price_multiplier│   │ price_multiplier│       │
//! │  │  time_add_hours │   │                 │   │  time_add_hours │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Enums Instead of String-Keyed Tables?
//! Every mapping below is total: there is no runtime lookup that can miss.
//! An unknown key can only enter through a serialized payload (snapshot or
//! share link), where it fails deserialization loudly instead of pricing a
//! guessed product. The stable string key of each variant is its serde name
//! and the value returned by `key()`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Dimension Bounds
// =============================================================================

/// Physical dimensions of a piece, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Dimensions {
            width,
            height,
            depth,
        }
    }

    /// Box surface-area proxy used by the pricing engine as the material
    /// quantity: `w*h + w*d + h*d`. This is a deliberate simplification,
    /// not a true surface integral of the carved piece.
    pub fn surface_area(&self) -> f64 {
        self.width * self.height + self.width * self.depth + self.height * self.depth
    }

    /// Clamps each axis into the given bounds.
    pub fn clamp_to(&self, bounds: &DimensionBounds) -> Dimensions {
        Dimensions {
            width: self.width.clamp(bounds.min.width, bounds.max.width),
            height: self.height.clamp(bounds.min.height, bounds.max.height),
            depth: self.depth.clamp(bounds.min.depth, bounds.max.depth),
        }
    }
}

/// Per-axis min/max bounds a product type allows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DimensionBounds {
    pub min: Dimensions,
    pub max: Dimensions,
}

// =============================================================================
// Product Type
// =============================================================================

/// The kind of piece being commissioned.
///
/// ## Price Table
/// ```text
/// chair           $800 base   30h
/// table          $1200 base   40h
/// cabinet        $2000 base   60h
/// wall_panel      $600 base   20h
/// sculpture      $1500 base   50h
/// picture_frame   $250 base    8h
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Chair,
    Table,
    Cabinet,
    WallPanel,
    Sculpture,
    PictureFrame,
}

impl ProductType {
    /// All product types, in display order.
    pub const ALL: [ProductType; 6] = [
        ProductType::Chair,
        ProductType::Table,
        ProductType::Cabinet,
        ProductType::WallPanel,
        ProductType::Sculpture,
        ProductType::PictureFrame,
    ];

    /// Stable string key (matches the serde representation).
    pub const fn key(&self) -> &'static str {
        match self {
            ProductType::Chair => "chair",
            ProductType::Table => "table",
            ProductType::Cabinet => "cabinet",
            ProductType::WallPanel => "wall_panel",
            ProductType::Sculpture => "sculpture",
            ProductType::PictureFrame => "picture_frame",
        }
    }

    /// Resolves a stable key back to a variant.
    ///
    /// ## Errors
    /// `CoreError::UnknownCatalogKey` — the key names a product this catalog
    /// revision does not carry. Never defaulted: a wrong product would price
    /// a wrong quote.
    pub fn from_key(key: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| CoreError::UnknownCatalogKey {
                dimension: "product",
                key: key.to_string(),
            })
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            ProductType::Chair => "Carved Chair",
            ProductType::Table => "Carved Table",
            ProductType::Cabinet => "Carved Cabinet",
            ProductType::WallPanel => "Wall Panel",
            ProductType::Sculpture => "Freestanding Sculpture",
            ProductType::PictureFrame => "Picture Frame",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            ProductType::Chair => "A seat worth a century of Sunday dinners",
            ProductType::Table => "Dining or console, built around your room",
            ProductType::Cabinet => "Full-height casework with carved doors",
            ProductType::WallPanel => "Relief panel for a wall or headboard",
            ProductType::Sculpture => "One-of-a-kind figure carved in the round",
            ProductType::PictureFrame => "Hand-carved frame sized to your piece",
        }
    }

    /// Base price before material, finish, and carving effects.
    pub const fn base_price(&self) -> Money {
        match self {
            ProductType::Chair => Money::from_units(800),
            ProductType::Table => Money::from_units(1200),
            ProductType::Cabinet => Money::from_units(2000),
            ProductType::WallPanel => Money::from_units(600),
            ProductType::Sculpture => Money::from_units(1500),
            ProductType::PictureFrame => Money::from_units(250),
        }
    }

    /// Baseline workshop hours before carving adders (display only).
    pub const fn base_hours(&self) -> f64 {
        match self {
            ProductType::Chair => 30.0,
            ProductType::Table => 40.0,
            ProductType::Cabinet => 60.0,
            ProductType::WallPanel => 20.0,
            ProductType::Sculpture => 50.0,
            ProductType::PictureFrame => 8.0,
        }
    }

    /// The dimensions a fresh configuration of this type starts from.
    /// Switching product type resets the active dimensions to these.
    pub const fn default_dimensions(&self) -> Dimensions {
        match self {
            ProductType::Chair => Dimensions::new(1.2, 2.0, 1.0),
            ProductType::Table => Dimensions::new(3.0, 1.5, 2.0),
            ProductType::Cabinet => Dimensions::new(2.5, 4.0, 1.2),
            ProductType::WallPanel => Dimensions::new(3.0, 2.0, 0.2),
            ProductType::Sculpture => Dimensions::new(1.0, 2.5, 1.0),
            ProductType::PictureFrame => Dimensions::new(1.5, 2.0, 0.15),
        }
    }

    /// Per-axis bounds the dimension sliders (and the defensive clamp in the
    /// reducer) enforce for this product type.
    pub const fn dimension_bounds(&self) -> DimensionBounds {
        match self {
            ProductType::Chair => DimensionBounds {
                min: Dimensions::new(0.8, 1.5, 0.8),
                max: Dimensions::new(2.0, 3.0, 1.8),
            },
            ProductType::Table => DimensionBounds {
                min: Dimensions::new(1.5, 1.0, 1.0),
                max: Dimensions::new(6.0, 2.2, 3.5),
            },
            ProductType::Cabinet => DimensionBounds {
                min: Dimensions::new(1.2, 2.0, 0.8),
                max: Dimensions::new(5.0, 7.0, 2.0),
            },
            ProductType::WallPanel => DimensionBounds {
                min: Dimensions::new(1.0, 1.0, 0.1),
                max: Dimensions::new(8.0, 5.0, 0.5),
            },
            ProductType::Sculpture => DimensionBounds {
                min: Dimensions::new(0.5, 0.8, 0.5),
                max: Dimensions::new(3.0, 6.0, 3.0),
            },
            ProductType::PictureFrame => DimensionBounds {
                min: Dimensions::new(0.5, 0.5, 0.05),
                max: Dimensions::new(4.0, 5.0, 0.4),
            },
        }
    }
}

impl Default for ProductType {
    fn default() -> Self {
        ProductType::Chair
    }
}

// =============================================================================
// Wood Type
// =============================================================================

/// Stock the piece is carved from. Wood contributes an additive cost per
/// unit of (proxy) surface area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum WoodType {
    Pine,
    Oak,
    Maple,
    Cherry,
    Walnut,
    Mahogany,
    Ebony,
}

impl WoodType {
    pub const ALL: [WoodType; 7] = [
        WoodType::Pine,
        WoodType::Oak,
        WoodType::Maple,
        WoodType::Cherry,
        WoodType::Walnut,
        WoodType::Mahogany,
        WoodType::Ebony,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            WoodType::Pine => "pine",
            WoodType::Oak => "oak",
            WoodType::Maple => "maple",
            WoodType::Cherry => "cherry",
            WoodType::Walnut => "walnut",
            WoodType::Mahogany => "mahogany",
            WoodType::Ebony => "ebony",
        }
    }

    pub fn from_key(key: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.key() == key)
            .ok_or_else(|| CoreError::UnknownCatalogKey {
                dimension: "wood",
                key: key.to_string(),
            })
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            WoodType::Pine => "Pine",
            WoodType::Oak => "White Oak",
            WoodType::Maple => "Hard Maple",
            WoodType::Cherry => "Black Cherry",
            WoodType::Walnut => "Black Walnut",
            WoodType::Mahogany => "Honduran Mahogany",
            WoodType::Ebony => "Gaboon Ebony",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            WoodType::Pine => "Light, knotty, takes paint well",
            WoodType::Oak => "Open grain, very strong, classic rays",
            WoodType::Maple => "Tight grain, pale, crisp detail",
            WoodType::Cherry => "Warm tone that deepens with age",
            WoodType::Walnut => "Chocolate brown, the carver's favorite",
            WoodType::Mahogany => "Stable, ribbon figure, rich red",
            WoodType::Ebony => "Jet black, dense, reserved for showpieces",
        }
    }

    /// Material cost per unit of proxy surface area (additive).
    pub const fn price_per_area(&self) -> Money {
        match self {
            WoodType::Pine => Money::from_units(60),
            WoodType::Oak => Money::from_units(100),
            WoodType::Maple => Money::from_units(110),
            WoodType::Cherry => Money::from_units(130),
            WoodType::Walnut => Money::from_units(150),
            WoodType::Mahogany => Money::from_units(180),
            WoodType::Ebony => Money::from_units(320),
        }
    }
}

impl Default for WoodType {
    fn default() -> Self {
        WoodType::Oak
    }
}

// =============================================================================
// Finish Type
// =============================================================================

/// Surface finish. Adds cost per unit area; roughness/sheen feed the
/// renderer only and never the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FinishType {
    Natural,
    OilRubbed,
    DarkStain,
    MatteLacquer,
    SatinLacquer,
    GlossLacquer,
}

impl FinishType {
    pub const ALL: [FinishType; 6] = [
        FinishType::Natural,
        FinishType::OilRubbed,
        FinishType::DarkStain,
        FinishType::MatteLacquer,
        FinishType::SatinLacquer,
        FinishType::GlossLacquer,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            FinishType::Natural => "natural",
            FinishType::OilRubbed => "oil_rubbed",
            FinishType::DarkStain => "dark_stain",
            FinishType::MatteLacquer => "matte_lacquer",
            FinishType::SatinLacquer => "satin_lacquer",
            FinishType::GlossLacquer => "gloss_lacquer",
        }
    }

    pub fn from_key(key: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| CoreError::UnknownCatalogKey {
                dimension: "finish",
                key: key.to_string(),
            })
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            FinishType::Natural => "Natural (unfinished)",
            FinishType::OilRubbed => "Oil Rubbed",
            FinishType::DarkStain => "Dark Stain",
            FinishType::MatteLacquer => "Matte Lacquer",
            FinishType::SatinLacquer => "Satin Lacquer",
            FinishType::GlossLacquer => "Gloss Lacquer",
        }
    }

    /// Finish cost per unit of proxy surface area (additive; natural is free).
    pub const fn price_per_area(&self) -> Money {
        match self {
            FinishType::Natural => Money::from_units(0),
            FinishType::OilRubbed => Money::from_units(25),
            FinishType::DarkStain => Money::from_units(35),
            FinishType::MatteLacquer => Money::from_units(20),
            FinishType::SatinLacquer => Money::from_units(30),
            FinishType::GlossLacquer => Money::from_units(45),
        }
    }

    /// Render-only surface roughness in [0,1]. Irrelevant to price.
    pub const fn roughness(&self) -> f64 {
        match self {
            FinishType::Natural => 0.9,
            FinishType::OilRubbed => 0.7,
            FinishType::DarkStain => 0.6,
            FinishType::MatteLacquer => 0.55,
            FinishType::SatinLacquer => 0.35,
            FinishType::GlossLacquer => 0.15,
        }
    }

    /// Render-only specular sheen in [0,1]. Irrelevant to price.
    pub const fn sheen(&self) -> f64 {
        match self {
            FinishType::Natural => 0.05,
            FinishType::OilRubbed => 0.2,
            FinishType::DarkStain => 0.25,
            FinishType::MatteLacquer => 0.3,
            FinishType::SatinLacquer => 0.55,
            FinishType::GlossLacquer => 0.85,
        }
    }
}

impl Default for FinishType {
    fn default() -> Self {
        FinishType::Natural
    }
}

// =============================================================================
// Carving Technique
// =============================================================================

/// How the carving is executed. Multiplicative against base price; `None`
/// means an uncarved piece and forces the rest of the carving block off
/// (see the reducer in `config`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CarvingTechnique {
    None,
    Whittling,
    ChipCarving,
    Relief,
    Intaglio,
    Pierced,
}

impl CarvingTechnique {
    pub const ALL: [CarvingTechnique; 6] = [
        CarvingTechnique::None,
        CarvingTechnique::Whittling,
        CarvingTechnique::ChipCarving,
        CarvingTechnique::Relief,
        CarvingTechnique::Intaglio,
        CarvingTechnique::Pierced,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            CarvingTechnique::None => "none",
            CarvingTechnique::Whittling => "whittling",
            CarvingTechnique::ChipCarving => "chip_carving",
            CarvingTechnique::Relief => "relief",
            CarvingTechnique::Intaglio => "intaglio",
            CarvingTechnique::Pierced => "pierced",
        }
    }

    pub fn from_key(key: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or_else(|| CoreError::UnknownCatalogKey {
                dimension: "technique",
                key: key.to_string(),
            })
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            CarvingTechnique::None => "No Carving",
            CarvingTechnique::Whittling => "Whittling",
            CarvingTechnique::ChipCarving => "Chip Carving",
            CarvingTechnique::Relief => "Relief Carving",
            CarvingTechnique::Intaglio => "Intaglio",
            CarvingTechnique::Pierced => "Pierced Carving",
        }
    }

    /// Multiplier against base price. The pricing engine uses the delta
    /// `(multiplier - 1) * base_price` as the technique's cost contribution.
    pub const fn price_multiplier(&self) -> f64 {
        match self {
            CarvingTechnique::None => 1.0,
            CarvingTechnique::Whittling => 1.3,
            CarvingTechnique::ChipCarving => 1.4,
            CarvingTechnique::Relief => 1.8,
            CarvingTechnique::Intaglio => 1.6,
            CarvingTechnique::Pierced => 2.2,
        }
    }

    /// Additional workshop hours (display only).
    pub const fn time_add_hours(&self) -> f64 {
        match self {
            CarvingTechnique::None => 0.0,
            CarvingTechnique::Whittling => 10.0,
            CarvingTechnique::ChipCarving => 14.0,
            CarvingTechnique::Relief => 24.0,
            CarvingTechnique::Intaglio => 18.0,
            CarvingTechnique::Pierced => 32.0,
        }
    }

    /// Whether this technique carves at all.
    pub const fn is_none(&self) -> bool {
        matches!(self, CarvingTechnique::None)
    }
}

impl Default for CarvingTechnique {
    fn default() -> Self {
        CarvingTechnique::None
    }
}

// =============================================================================
// Carving Style
// =============================================================================

/// Ornamental vocabulary of the carving. Multiplicative against base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CarvingStyle {
    None,
    Geometric,
    Floral,
    Celtic,
    Wildlife,
    Baroque,
    Abstract,
}

impl CarvingStyle {
    pub const ALL: [CarvingStyle; 7] = [
        CarvingStyle::None,
        CarvingStyle::Geometric,
        CarvingStyle::Floral,
        CarvingStyle::Celtic,
        CarvingStyle::Wildlife,
        CarvingStyle::Baroque,
        CarvingStyle::Abstract,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            CarvingStyle::None => "none",
            CarvingStyle::Geometric => "geometric",
            CarvingStyle::Floral => "floral",
            CarvingStyle::Celtic => "celtic",
            CarvingStyle::Wildlife => "wildlife",
            CarvingStyle::Baroque => "baroque",
            CarvingStyle::Abstract => "abstract",
        }
    }

    pub fn from_key(key: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.key() == key)
            .ok_or_else(|| CoreError::UnknownCatalogKey {
                dimension: "style",
                key: key.to_string(),
            })
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            CarvingStyle::None => "No Style",
            CarvingStyle::Geometric => "Geometric",
            CarvingStyle::Floral => "Floral",
            CarvingStyle::Celtic => "Celtic Knotwork",
            CarvingStyle::Wildlife => "Wildlife",
            CarvingStyle::Baroque => "Baroque",
            CarvingStyle::Abstract => "Abstract",
        }
    }

    pub const fn price_multiplier(&self) -> f64 {
        match self {
            CarvingStyle::None => 1.0,
            CarvingStyle::Geometric => 1.15,
            CarvingStyle::Floral => 1.25,
            CarvingStyle::Celtic => 1.3,
            CarvingStyle::Wildlife => 1.4,
            CarvingStyle::Baroque => 1.5,
            CarvingStyle::Abstract => 1.2,
        }
    }
}

impl Default for CarvingStyle {
    fn default() -> Self {
        CarvingStyle::None
    }
}

// =============================================================================
// Carving Pattern
// =============================================================================

/// Where the carving sits on the piece. Multiplicative against base price;
/// `Custom` carries no multiplier of its own — the uploaded-pattern
/// surcharge is a separate term in the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CarvingPattern {
    None,
    CornerAccents,
    Border,
    Centerpiece,
    AllOver,
    Custom,
}

impl CarvingPattern {
    pub const ALL: [CarvingPattern; 6] = [
        CarvingPattern::None,
        CarvingPattern::CornerAccents,
        CarvingPattern::Border,
        CarvingPattern::Centerpiece,
        CarvingPattern::AllOver,
        CarvingPattern::Custom,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            CarvingPattern::None => "none",
            CarvingPattern::CornerAccents => "corner_accents",
            CarvingPattern::Border => "border",
            CarvingPattern::Centerpiece => "centerpiece",
            CarvingPattern::AllOver => "all_over",
            CarvingPattern::Custom => "custom",
        }
    }

    pub fn from_key(key: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| CoreError::UnknownCatalogKey {
                dimension: "pattern",
                key: key.to_string(),
            })
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            CarvingPattern::None => "No Pattern",
            CarvingPattern::CornerAccents => "Corner Accents",
            CarvingPattern::Border => "Border",
            CarvingPattern::Centerpiece => "Centerpiece",
            CarvingPattern::AllOver => "All-Over",
            CarvingPattern::Custom => "Your Own Pattern",
        }
    }

    pub const fn price_multiplier(&self) -> f64 {
        match self {
            CarvingPattern::None => 1.0,
            CarvingPattern::CornerAccents => 1.08,
            CarvingPattern::Border => 1.1,
            CarvingPattern::Centerpiece => 1.2,
            CarvingPattern::AllOver => 1.45,
            CarvingPattern::Custom => 1.0,
        }
    }

    /// Additional workshop hours (display only).
    pub const fn time_add_hours(&self) -> f64 {
        match self {
            CarvingPattern::None => 0.0,
            CarvingPattern::CornerAccents => 4.0,
            CarvingPattern::Border => 6.0,
            CarvingPattern::Centerpiece => 10.0,
            CarvingPattern::AllOver => 20.0,
            CarvingPattern::Custom => 16.0,
        }
    }
}

impl Default for CarvingPattern {
    fn default() -> Self {
        CarvingPattern::None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
