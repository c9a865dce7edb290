//! In-memory snapshot store.
//!
//! Test double for the [`SnapshotStore`] port: same semantics as the SQLite
//! repository (copy-on-save, whole-list writes) without touching disk. The
//! `failing` switch simulates an unavailable backing store so callers can
//! verify their "persistence unavailable" degradation paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use heartwood_core::{Configuration, Money, SavedConfiguration};

use crate::error::{StoreError, StoreResult};
use crate::traits::SnapshotStore;

/// In-memory implementation of the snapshot port.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    items: Mutex<Vec<SavedConfiguration>>,
    failing: AtomicBool,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every operation fails with an internal store error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Internal("simulated store failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn save(
        &self,
        name: &str,
        config: &Configuration,
        price: Money,
    ) -> StoreResult<SavedConfiguration> {
        self.check_available()?;

        let snapshot = SavedConfiguration {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            config: config.clone(),
            price,
            created_at: Utc::now(),
        };

        let mut items = self.items.lock().expect("snapshot list mutex poisoned");
        items.push(snapshot.clone());
        Ok(snapshot)
    }

    async fn list(&self) -> StoreResult<Vec<SavedConfiguration>> {
        self.check_available()?;
        let items = self.items.lock().expect("snapshot list mutex poisoned");
        Ok(items.clone())
    }

    async fn load(&self, id: &str) -> StoreResult<Option<SavedConfiguration>> {
        self.check_available()?;
        let items = self.items.lock().expect("snapshot list mutex poisoned");
        Ok(items.iter().find(|s| s.id == id).cloned())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut items = self.items.lock().expect("snapshot list mutex poisoned");
        let initial_len = items.len();
        items.retain(|s| s.id != id);

        if items.len() == initial_len {
            return Err(StoreError::SnapshotNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_round_trip() {
        let store = MemorySnapshotStore::new();
        let config = Configuration::new();

        let saved = store
            .save("test", &config, Money::from_units(1640))
            .await
            .unwrap();
        let loaded = store.load(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.config, config);

        store.delete(&saved.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_switch() {
        let store = MemorySnapshotStore::new();
        store.set_failing(true);

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Internal(_)));

        store.set_failing(false);
        assert!(store.list().await.is_ok());
    }
}
