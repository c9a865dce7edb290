//! # Session Error Type
//!
//! Unified error type for configurator session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Error Flow in the Configurator                          │
//! │                                                                         │
//! │  Frontend                       Session                                 │
//! │  ────────                       ───────                                 │
//! │                                                                         │
//! │  uploadCustomPattern(file)                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Validation Error? ── ValidationError::NotAnImage ──┐                  │
//! │         │                                           ▼                  │
//! │  Store Error? ─────── StoreError::* ───────► ConfiguratorError ──────► │
//! │         │                                           │                  │
//! │         ▼                                           ▼                  │
//! │  Success ────────────────────────────────►  { code, message } JSON     │
//! │                                                                         │
//! │  Store failures degrade to "persistence unavailable": the visitor      │
//! │  keeps configuring and pricing, only save/load/share is impaired.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use heartwood_core::{CoreError, ValidationError};
use heartwood_store::StoreError;

/// Error returned from session operations.
///
/// ## Serialization
/// This is what the frontend receives when an operation fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Uploaded pattern is not an image (got 'text/plain')"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguratorError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for session responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Snapshot not found
    NotFound,

    /// Input validation failed (bad upload, malformed share link)
    ValidationError,

    /// The snapshot store is unavailable (quota, corruption, version skew)
    StoreUnavailable,

    /// Session used without an injected store
    NoStore,

    /// Internal error
    Internal,
}

impl ConfiguratorError {
    /// Creates a new session error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ConfiguratorError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ConfiguratorError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ConfiguratorError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a no-store error.
    pub fn no_store() -> Self {
        ConfiguratorError::new(
            ErrorCode::NoStore,
            "No snapshot store configured for this session",
        )
    }
}

/// Converts store errors to session errors.
///
/// Everything that is not a clean not-found becomes STORE_UNAVAILABLE: the
/// visitor's configuration and quote are unaffected, only persistence is.
impl From<StoreError> for ConfiguratorError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SnapshotNotFound(id) => ConfiguratorError::not_found("Snapshot", &id),
            StoreError::InvalidSharePayload(reason) => {
                ConfiguratorError::validation(format!("Share link is invalid: {}", reason))
            }
            StoreError::CorruptPayload(e) => {
                tracing::error!("Snapshot store payload corrupt: {}", e);
                ConfiguratorError::new(ErrorCode::StoreUnavailable, "Saved configurations unavailable")
            }
            StoreError::UnsupportedVersion { found, expected } => {
                tracing::error!(
                    "Snapshot store version skew: found {} expected {}",
                    found,
                    expected
                );
                ConfiguratorError::new(ErrorCode::StoreUnavailable, "Saved configurations unavailable")
            }
            other => {
                tracing::error!("Snapshot store failure: {}", other);
                ConfiguratorError::new(ErrorCode::StoreUnavailable, "Saved configurations unavailable")
            }
        }
    }
}

/// Converts core errors to session errors.
impl From<CoreError> for ConfiguratorError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownCatalogKey { dimension, key } => ConfiguratorError::new(
                ErrorCode::Internal,
                format!("Unknown {} key: '{}'", dimension, key),
            ),
            CoreError::Validation(e) => ConfiguratorError::validation(e.to_string()),
        }
    }
}

/// Converts validation errors to session errors.
impl From<ValidationError> for ConfiguratorError {
    fn from(err: ValidationError) -> Self {
        ConfiguratorError::validation(err.to_string())
    }
}

impl std::fmt::Display for ConfiguratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ConfiguratorError {}
