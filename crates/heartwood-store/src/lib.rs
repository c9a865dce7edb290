//! # heartwood-store: Persistence Layer for the Heartwood Configurator
//!
//! This crate provides local persistence for the configurator: saved
//! configuration snapshots in SQLite, plus share-link encoding.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Heartwood Data Flow                                 │
//! │                                                                         │
//! │  Session operation (save_snapshot, share_url, ...)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  heartwood-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │     Store     │   │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │   │ (snapshots.rs) │   │  (embedded)  │   │   │
//! │  │   │               │   │                │   │              │   │   │
//! │  │   │ SqlitePool    │◄──│ SnapshotRepo   │   │ 001_...sql   │   │   │
//! │  │   └───────────────┘   └────────────────┘   └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐                       │   │
//! │  │   │   share.rs    │   │   memory.rs    │                       │   │
//! │  │   │  ?config=...  │   │  test double   │                       │   │
//! │  │   └───────────────┘   └────────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (one namespaced row holding the snapshot list)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded store migrations
//! - [`error`] - Store error types
//! - [`repository`] - Snapshot repository (whole-list overwrite-on-write)
//! - [`traits`] - The `SnapshotStore` port the session is injected with
//! - [`memory`] - In-memory port implementation for tests
//! - [`share`] - Share-link encoding/decoding
//!
//! ## Usage
//!
//! ```rust,ignore
//! use heartwood_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("./heartwood.db")).await?;
//! let saved = store.snapshots().save("Walnut chair", &config, price).await?;
//! let url = heartwood_store::share::share_url(base, &config);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod share;
pub mod traits;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::MemorySnapshotStore;
pub use pool::{Store, StoreConfig};
pub use repository::snapshots::SnapshotRepository;
pub use traits::SnapshotStore;
