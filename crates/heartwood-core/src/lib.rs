//! # heartwood-core: Pure Business Logic for the Heartwood Configurator
//!
//! This crate is the **heart** of the commission configurator. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Heartwood Configurator Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Commission Page (web frontend)                  │   │
//! │  │   Option pickers ──► Sliders ──► Quote panel ──► 3D viewport   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ onConfigChange(config, price)          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              heartwood-configurator (session layer)             │   │
//! │  │    update, upload_custom_pattern, save/load/share, scene        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ heartwood-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  config   │  │  pricing  │  │   scene   │  │   │
//! │  │   │  closed   │  │  reducer  │  │  quote    │  │  renderer │  │   │
//! │  │   │  enums    │  │ invariants│  │  model    │  │  contract │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO RENDERING • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                heartwood-store (persistence layer)              │   │
//! │  │          Saved snapshots (SQLite), share-link encoding          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Closed catalog enums (product, wood, finish, carving)
//! - [`config`] - Configuration aggregate and the update reducer
//! - [`pricing`] - Pure quote computation and build-time estimate
//! - [`scene`] - Renderer contract derivation and memoization key
//! - [`snapshot`] - Saved-configuration snapshot shape
//! - [`money`] - Money type with integer arithmetic at the quote boundary
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Closed Catalogs**: Every dimension is an enum with total mappings -
//!    an unknown key is a wire-boundary error, never a guessed price
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use heartwood_core::catalog::{Dimensions, WoodType};
//! use heartwood_core::config::{Configuration, ConfigurationUpdate};
//! use heartwood_core::pricing;
//!
//! // Start from defaults and pick the published worked example
//! let config = Configuration::new().apply(&ConfigurationUpdate {
//!     wood_type: Some(WoodType::Walnut),
//!     dimensions: Some(Dimensions::new(1.2, 2.0, 1.0)),
//!     ..Default::default()
//! });
//!
//! let quote = pricing::price(&config);
//! assert_eq!(quote.total.units(), 1640);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod money;
pub mod pricing;
pub mod scene;
pub mod snapshot;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use heartwood_core::Configuration` instead of
// `use heartwood_core::config::Configuration`

pub use catalog::{
    CarvingPattern, CarvingStyle, CarvingTechnique, DimensionBounds, Dimensions, FinishType,
    ProductType, WoodType,
};
pub use config::{Configuration, ConfigurationUpdate, PatternImage};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{estimated_hours, price, PriceBreakdown};
pub use scene::{SceneKey, SceneSpec};
pub use snapshot::SavedConfiguration;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of identical pieces in a single commission.
///
/// ## Business Reason
/// The workshop is one carver; larger runs are quoted by hand, not by the
/// configurator. The volume discount tiers top out well under this.
pub const MAX_QUANTITY: u32 = 10;

/// Upper bound of the carving depth/detail sliders (inclusive).
///
/// Slider positions are whole stops 0..=10; the pricing multipliers and the
/// renderer displacement scale are both derived from the stop number.
pub const MAX_CARVING_LEVEL: u8 = 10;

/// Maximum length of the free-form inscription, in characters.
///
/// ## Business Reason
/// Engravings longer than this don't fit the carved banner on any product
/// type; the UI counter and the reducer clamp agree on this number.
pub const MAX_CUSTOM_TEXT_LEN: usize = 50;
