//! # heartwood-configurator: Session Layer for the Commission Page
//!
//! Wires the pure core (catalog, reducer, pricing, scene derivation) to the
//! persistence layer (snapshots, share links) behind the small surface the
//! commission page talks to.
//!
//! ## The Contract With the Page
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session ⟷ Page Contract                             │
//! │                                                                         │
//! │  Page ──► session.update(patch)              every control change      │
//! │  Page ──► session.upload_custom_pattern(...)  pattern upload           │
//! │  Page ──► session.save/load/delete_snapshot   "My designs" panel       │
//! │  Page ──► session.share_url / import_share_url                          │
//! │  Page ──► session.scene()                     feeds the 3D renderer    │
//! │                                                                         │
//! │  Session ──► onConfigChange(config, price)    after every ACCEPTED     │
//! │                                               state change             │
//! │                                                                         │
//! │  The renderer gets a SceneSpec and renders best-effort; it has no      │
//! │  error channel back into the session.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - `ConfiguratorSession` and the change-listener plumbing
//! - [`error`] - Serializable session error (`{ code, message }`)

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfiguratorError, ErrorCode};
pub use session::{CommissionRequest, ConfigChangeListener, ConfiguratorSession};
