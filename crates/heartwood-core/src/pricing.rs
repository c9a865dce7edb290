//! # Pricing Engine
//!
//! Pure, deterministic quote computation: (Configuration, Catalog) → price.
//!
//! ## Cost Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Quote Composition                               │
//! │                                                                         │
//! │  surface_area = w*h + w*d + h*d          (box proxy, not an integral)  │
//! │                                                                         │
//! │  base      = product base price                                        │
//! │  material  = wood  $/area × surface_area                               │
//! │  finish    = finish $/area × surface_area                              │
//! │  carving   = (technique Δ + style Δ + pattern Δ + custom surcharge)    │
//! │              × depth multiplier × detail multiplier                    │
//! │              where Δ = base × (multiplier − 1)                         │
//! │              custom surcharge = base × 0.8 when an image is uploaded   │
//! │              depth  multiplier = 1 + (depth/10)  × 0.5                 │
//! │              detail multiplier = 1 + (detail/10) × 0.3                 │
//! │  rush      = base × 0.5 when rush ordered                              │
//! │                                                                         │
//! │  subtotal  = (base + material + finish + carving + rush) × quantity    │
//! │  discount  = 10% (quantity ≥ 5) | 5% (quantity 3–4) | 0%               │
//! │              tiers are mutually exclusive, highest wins                │
//! │  total     = round-half-up(subtotal − discount)   ← single rounding    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No hidden state, no randomness: the same configuration always quotes the
//! same total. The fractional intermediates are carried in f64 and rounded
//! exactly once, at the end.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::Configuration;
use crate::money::Money;

// =============================================================================
// Discount Tiers
// =============================================================================

/// Volume discount rate for a quantity. Tiers are mutually exclusive and the
/// highest applicable tier wins.
///
/// ## Example
/// ```rust
/// use heartwood_core::pricing::volume_discount_rate;
///
/// assert_eq!(volume_discount_rate(2), 0.0);
/// assert_eq!(volume_discount_rate(4), 0.05);
/// assert_eq!(volume_discount_rate(5), 0.10);
/// ```
pub fn volume_discount_rate(quantity: u32) -> f64 {
    if quantity >= 5 {
        0.10
    } else if quantity >= 3 {
        0.05
    } else {
        0.0
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Itemized quote for a configuration.
///
/// Component fields are the exact fractional terms of the cost model, for
/// the breakdown panel in the UI; `total` is the authoritative rounded
/// quote. Summing displayed components may differ from `total` by rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Box surface-area proxy the per-area costs were computed against.
    pub surface_area: f64,

    /// Product base price.
    pub base_price: Money,

    /// Wood cost: $/area × surface area.
    pub material_cost: f64,

    /// Finish cost: $/area × surface area.
    pub finish_cost: f64,

    /// Full carving block (0.0 for an uncarved piece).
    pub carving_cost: f64,

    /// Rush surcharge (0.0 unless rush ordered).
    pub rush_cost: f64,

    /// Cost of a single piece before quantity and discount.
    pub unit_price: f64,

    pub quantity: u32,

    /// unit_price × quantity, before discount.
    pub subtotal: f64,

    /// Applied volume discount rate (0.0, 0.05 or 0.10).
    pub discount_rate: f64,

    /// subtotal × discount_rate.
    pub discount_amount: f64,

    /// The quote: round-half-up(subtotal − discount_amount).
    pub total: Money,
}

/// Computes the itemized quote for a configuration.
///
/// Pure and deterministic — see the module docs for the cost model. Catalog
/// lookups are total (closed enums), so this function cannot fail.
pub fn price(config: &Configuration) -> PriceBreakdown {
    let surface_area = config.dimensions.surface_area();
    let base = config.product_type.base_price();
    let base_f = base.as_f64();

    let material_cost = config.wood_type.price_per_area().as_f64() * surface_area;
    let finish_cost = config.finish_type.price_per_area().as_f64() * surface_area;

    let carving_cost = if config.has_carving() {
        let technique_cost = base_f * (config.carving_technique.price_multiplier() - 1.0);
        let style_cost = base_f * (config.carving_style.price_multiplier() - 1.0);
        let pattern_cost = base_f * (config.pattern.price_multiplier() - 1.0);
        let custom_pattern_cost = if config.custom_pattern_image.is_some() {
            base_f * 0.8
        } else {
            0.0
        };

        let depth_multiplier = 1.0 + (config.carving_depth as f64 / 10.0) * 0.5;
        let detail_multiplier = 1.0 + (config.carving_detail as f64 / 10.0) * 0.3;

        (technique_cost + style_cost + pattern_cost + custom_pattern_cost)
            * depth_multiplier
            * detail_multiplier
    } else {
        0.0
    };

    let rush_cost = if config.rush_order { base_f * 0.5 } else { 0.0 };

    let unit_price = base_f + material_cost + finish_cost + carving_cost + rush_cost;
    let subtotal = unit_price * config.quantity as f64;

    let discount_rate = volume_discount_rate(config.quantity);
    let discount_amount = subtotal * discount_rate;

    PriceBreakdown {
        surface_area,
        base_price: base,
        material_cost,
        finish_cost,
        carving_cost,
        rush_cost,
        unit_price,
        quantity: config.quantity,
        subtotal,
        discount_rate,
        discount_amount,
        total: Money::from_f64_half_up(subtotal - discount_amount),
    }
}

// =============================================================================
// Build-Time Estimate
// =============================================================================

/// Estimated workshop hours for a single piece (display only, never feeds
/// the price): product base hours + technique and pattern adders
/// + depth × 2 + detail × 1.5.
pub fn estimated_hours(config: &Configuration) -> f64 {
    config.product_type.base_hours()
        + config.carving_technique.time_add_hours()
        + config.pattern.time_add_hours()
        + config.carving_depth as f64 * 2.0
        + config.carving_detail as f64 * 1.5
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        CarvingPattern, CarvingStyle, CarvingTechnique, Dimensions, FinishType, ProductType,
        WoodType,
    };
    use crate::config::{ConfigurationUpdate, PatternImage};

    /// The published worked example: walnut chair, natural finish, uncarved.
    fn walnut_chair() -> Configuration {
        Configuration::new().apply(&ConfigurationUpdate {
            product_type: Some(ProductType::Chair),
            wood_type: Some(WoodType::Walnut),
            finish_type: Some(FinishType::Natural),
            dimensions: Some(Dimensions::new(1.2, 2.0, 1.0)),
            quantity: Some(1),
            ..Default::default()
        })
    }

    #[test]
    fn test_worked_example_uncarved() {
        // area 5.6, material 840, base 800 → 1640
        let quote = price(&walnut_chair());
        assert!((quote.surface_area - 5.6).abs() < 1e-9);
        assert!((quote.material_cost - 840.0).abs() < 1e-9);
        assert_eq!(quote.finish_cost, 0.0);
        assert_eq!(quote.carving_cost, 0.0);
        assert_eq!(quote.rush_cost, 0.0);
        assert_eq!(quote.discount_rate, 0.0);
        assert_eq!(quote.total.units(), 1640);
    }

    #[test]
    fn test_worked_example_relief_carving() {
        // carving = 800*(1.8-1) * 1.2 * 1.15 = 883.2 → total 2523.2 → 2523
        let config = walnut_chair().apply(&ConfigurationUpdate {
            carving_technique: Some(CarvingTechnique::Relief),
            carving_depth: Some(4),
            carving_detail: Some(5),
            ..Default::default()
        });
        let quote = price(&config);
        assert!((quote.carving_cost - 883.2).abs() < 1e-9);
        assert_eq!(quote.total.units(), 2523);
    }

    #[test]
    fn test_worked_example_bulk_discount() {
        // per-unit 1640 × 5 = 8200, 10% off → 7380
        let config = walnut_chair().apply(&ConfigurationUpdate {
            quantity: Some(5),
            ..Default::default()
        });
        let quote = price(&config);
        assert!((quote.subtotal - 8200.0).abs() < 1e-9);
        assert!((quote.discount_amount - 820.0).abs() < 1e-9);
        assert_eq!(quote.total.units(), 7380);
    }

    #[test]
    fn test_determinism() {
        let config = walnut_chair().apply(&ConfigurationUpdate {
            carving_technique: Some(CarvingTechnique::Pierced),
            carving_style: Some(CarvingStyle::Baroque),
            pattern: Some(CarvingPattern::AllOver),
            carving_depth: Some(7),
            carving_detail: Some(9),
            rush_order: Some(true),
            ..Default::default()
        });
        let first = price(&config);
        let second = price(&config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_discount_tiers() {
        for (quantity, rate) in [(1, 0.0), (2, 0.0), (3, 0.05), (4, 0.05), (5, 0.10), (10, 0.10)] {
            let config = walnut_chair().apply(&ConfigurationUpdate {
                quantity: Some(quantity),
                ..Default::default()
            });
            let quote = price(&config);
            assert_eq!(quote.discount_rate, rate, "quantity {}", quantity);
        }
    }

    #[test]
    fn test_subtotal_monotonic_in_quantity() {
        // Pre-discount subtotal never decreases as quantity grows
        let mut previous = 0.0;
        for quantity in 1..=10 {
            let config = walnut_chair().apply(&ConfigurationUpdate {
                quantity: Some(quantity),
                ..Default::default()
            });
            let quote = price(&config);
            assert!(quote.subtotal >= previous, "quantity {}", quantity);
            previous = quote.subtotal;
        }
    }

    #[test]
    fn test_rush_surcharge_is_half_base() {
        let config = walnut_chair().apply(&ConfigurationUpdate {
            rush_order: Some(true),
            ..Default::default()
        });
        let quote = price(&config);
        assert!((quote.rush_cost - 400.0).abs() < 1e-9);
        assert_eq!(quote.total.units(), 2040);
    }

    #[test]
    fn test_custom_pattern_surcharge() {
        let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let image = PatternImage::new("rose.png", "image/png", png).unwrap();
        let config = walnut_chair()
            .apply(&ConfigurationUpdate {
                carving_technique: Some(CarvingTechnique::Relief),
                ..Default::default()
            })
            .with_custom_pattern(image);

        // depth/detail 0 → multipliers 1.0; carving = 640 + 800*0.8 = 1280
        let quote = price(&config);
        assert!((quote.carving_cost - 1280.0).abs() < 1e-9);
        assert_eq!(quote.total.units(), 2920);
    }

    #[test]
    fn test_style_and_pattern_deltas_stack() {
        let config = walnut_chair().apply(&ConfigurationUpdate {
            carving_technique: Some(CarvingTechnique::ChipCarving),
            carving_style: Some(CarvingStyle::Celtic),
            pattern: Some(CarvingPattern::Border),
            ..Default::default()
        });
        // Δ: 800*0.4 + 800*0.3 + 800*0.1 = 320 + 240 + 80 = 640
        let quote = price(&config);
        assert!((quote.carving_cost - 640.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimated_hours() {
        let config = walnut_chair().apply(&ConfigurationUpdate {
            carving_technique: Some(CarvingTechnique::Relief),
            pattern: Some(CarvingPattern::Centerpiece),
            carving_depth: Some(4),
            carving_detail: Some(5),
            ..Default::default()
        });
        // 30 + 24 + 10 + 4*2 + 5*1.5 = 79.5
        assert!((estimated_hours(&config) - 79.5).abs() < 1e-9);
    }

    #[test]
    fn test_uncarved_estimate_is_base_hours_only() {
        assert!((estimated_hours(&walnut_chair()) - 30.0).abs() < 1e-9);
    }
}
