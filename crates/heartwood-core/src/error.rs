//! # Error Types
//!
//! Domain-specific error types for heartwood-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  heartwood-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  heartwood-store errors (separate crate)                               │
//! │  └── StoreError       - Snapshot store / share-link failures           │
//! │                                                                         │
//! │  Session errors (heartwood-configurator)                               │
//! │  └── ConfiguratorError - What the embedding page sees (serialized)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ConfiguratorError → Frontend      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, key, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent domain rule violations. They should be caught and
/// translated to user-friendly messages by the embedding page.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A serialized payload referenced a catalog key that no longer exists.
    ///
    /// ## When This Occurs
    /// - A snapshot or share link written by a different catalog revision
    ///   names a product/wood/finish/technique/style/pattern we don't carry
    ///
    /// Catalog dimensions are closed enums, so this cannot happen for state
    /// built through the public API; it is strictly a wire-boundary failure
    /// and must never be silently defaulted to a guessed price.
    #[error("Unknown {dimension} key: '{key}'")]
    UnknownCatalogKey { dimension: &'static str, key: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before the reducer runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Uploaded payload is not a recognized image.
    ///
    /// ## When This Occurs
    /// - The commission page lets visitors upload their own pattern; anything
    ///   that is not PNG/JPEG/WebP/GIF is rejected at this boundary with no
    ///   state change
    #[error("Uploaded pattern is not an image (got '{content_type}')")]
    NotAnImage { content_type: String },

    /// Invalid format (e.g., malformed payload field).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
