//! Snapshot store port definition.
//!
//! The `SnapshotStore` trait is the persistence port the configurator
//! session is injected with. The SQLite repository implements it for
//! production; `MemorySnapshotStore` implements it for tests. Keeping the
//! port object-safe lets the session hold `Arc<dyn SnapshotStore>` without
//! caring which backend is behind it.

use async_trait::async_trait;

use heartwood_core::{Configuration, Money, SavedConfiguration};

use crate::error::StoreResult;

/// Persistence port for saved-configuration snapshots.
///
/// All implementations must ensure:
/// - `save` copies the configuration (snapshots are immutable afterwards)
/// - the whole list is persisted on every write (overwrite-on-write)
/// - ids are unique within the store
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Creates and persists a new named snapshot.
    ///
    /// # Returns
    ///
    /// The stored snapshot, including its generated id and timestamp.
    async fn save(
        &self,
        name: &str,
        config: &Configuration,
        price: Money,
    ) -> StoreResult<SavedConfiguration>;

    /// Lists all snapshots, oldest first.
    async fn list(&self) -> StoreResult<Vec<SavedConfiguration>>;

    /// Gets a snapshot by id.
    ///
    /// # Returns
    ///
    /// `Ok(Some(snapshot))` if found, `Ok(None)` if not found.
    async fn load(&self, id: &str) -> StoreResult<Option<SavedConfiguration>>;

    /// Deletes a snapshot by id.
    ///
    /// # Errors
    ///
    /// `StoreError::SnapshotNotFound` if the id is not in the store.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
