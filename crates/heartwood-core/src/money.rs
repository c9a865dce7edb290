//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Currency Units                                   │
//! │    Catalog prices and quoted totals are whole currency units (i64).     │
//! │    Fractional arithmetic exists ONLY inside the pricing pipeline        │
//! │    (area costs, multipliers) and is rounded exactly once, half-up,      │
//! │    when the quote is produced.                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use heartwood_core::money::Money;
//!
//! // Create from whole units (preferred)
//! let base = Money::from_units(800);
//!
//! // Arithmetic operations
//! let doubled = base * 2;                       // 1600
//! let total = base + Money::from_units(150);    // 950
//!
//! // The single rounding point of the pricing pipeline
//! assert_eq!(Money::from_f64_half_up(2523.2).units(), 2523);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discounts and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  ProductType.base_price ──► PriceBreakdown.total ──► "Your quote"      │
/// │                        │                                                │
/// │                        └──► SavedConfiguration.price_units              │
/// │                                                                         │
/// │  EVERY quoted amount in the configurator flows through this type       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use heartwood_core::money::Money;
    ///
    /// let price = Money::from_units(800);
    /// assert_eq!(price.units(), 800);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use heartwood_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert_eq!(zero.units(), 0);
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Rounds a fractional amount to the nearest whole unit, half-up.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP (quote rounding)                                     │
    /// │                                                                     │
    /// │  2523.2  → 2523                                                     │
    /// │  2523.5  → 2524                                                     │
    /// │  2523.8  → 2524                                                     │
    /// │                                                                     │
    /// │  The pricing pipeline carries fractional intermediates (per-area    │
    /// │  material costs, carving multipliers) and rounds exactly ONCE,      │
    /// │  here, when the final quote is produced. Components shown in the    │
    /// │  breakdown are display copies; the total is authoritative.          │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use heartwood_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64_half_up(1640.0).units(), 1640);
    /// assert_eq!(Money::from_f64_half_up(2523.2).units(), 2523);
    /// assert_eq!(Money::from_f64_half_up(99.5).units(), 100);
    /// ```
    pub fn from_f64_half_up(amount: f64) -> Self {
        // f64::round ties away from zero; amounts here are non-negative in
        // practice, which makes away-from-zero identical to half-up
        Money(amount.round() as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use heartwood_core::money::Money;
    ///
    /// let unit_price = Money::from_units(1640);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.units(), 4920);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the value as f64, for feeding back into fractional pipelines.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and the demo binary. Use frontend formatting for
/// actual UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}", sign, self.0.abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
