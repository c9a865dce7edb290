//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ConfiguratorError (session crate) ← "persistence unavailable"         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend shows a warning toast; the pricing engine never sees this    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failing store degrades save/load/share to no-ops with a warning — it
//! must never take the configurator down with it.

use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot not found in the store.
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    /// The stored payload is not valid JSON, or does not match the
    /// snapshot-list shape.
    ///
    /// ## When This Occurs
    /// - The backing file was edited or truncated outside the app
    /// - A snapshot references a catalog key this build does not carry
    #[error("Stored payload is corrupt: {0}")]
    CorruptPayload(String),

    /// The stored envelope was written by an unknown schema version.
    ///
    /// ## When This Occurs
    /// - A newer build wrote the store and this build reads it back
    ///
    /// There is deliberately no migration attempt here: the caller surfaces
    /// "persistence unavailable" instead of guessing at field semantics.
    #[error("Unsupported snapshot store version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// A share link's query payload could not be decoded.
    #[error("Share payload is invalid: {0}")]
    InvalidSharePayload(String),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to StoreError.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => {
                StoreError::SnapshotNotFound("unknown".to_string())
            }
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
