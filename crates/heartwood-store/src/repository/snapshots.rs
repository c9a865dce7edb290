//! # Snapshot Repository
//!
//! Persistence for saved configurations.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Storage Model                               │
//! │                                                                         │
//! │  snapshot_store (table)                                                │
//! │  ┌───────────────────────────────┬──────────────────────────────────┐  │
//! │  │ namespace (PK)                │ payload                          │  │
//! │  ├───────────────────────────────┼──────────────────────────────────┤  │
//! │  │ heartwood.saved_configurations│ {"version":1,"items":[...]}      │  │
//! │  └───────────────────────────────┴──────────────────────────────────┘  │
//! │                                                                         │
//! │  ONE namespaced key holds the WHOLE list. Every save/delete reads      │
//! │  the envelope, edits the list in memory, and writes the entire         │
//! │  payload back (overwrite-on-write). No partial updates.                │
//! │                                                                         │
//! │  The `version` field guards against reading an envelope written by     │
//! │  a different schema revision: mismatches fail loudly instead of        │
//! │  half-parsing records.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use heartwood_core::{Configuration, Money, SavedConfiguration};

use crate::error::{StoreError, StoreResult};
use crate::traits::SnapshotStore;

/// Namespace key the snapshot list lives under.
pub const SNAPSHOT_NAMESPACE: &str = "heartwood.saved_configurations";

/// Schema version of the stored envelope.
pub const STORE_VERSION: u32 = 1;

/// Versioned envelope wrapping the snapshot list on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotEnvelope {
    version: u32,
    items: Vec<SavedConfiguration>,
}

impl SnapshotEnvelope {
    fn empty() -> Self {
        SnapshotEnvelope {
            version: STORE_VERSION,
            items: Vec::new(),
        }
    }
}

/// Repository for saved-configuration persistence.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.snapshots();
/// let saved = repo.save("Walnut chair", &config, quote.total).await?;
/// let all = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Creates and persists a new named snapshot.
    ///
    /// The configuration is copied; the caller's live state is not
    /// referenced. Ids are UUID v4, timestamps are `Utc::now()`.
    pub async fn save(
        &self,
        name: &str,
        config: &Configuration,
        price: Money,
    ) -> StoreResult<SavedConfiguration> {
        debug!(name = %name, "Saving configuration snapshot");

        let snapshot = SavedConfiguration {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            config: config.clone(),
            price,
            created_at: Utc::now(),
        };

        let mut envelope = self.read_envelope().await?;
        envelope.items.push(snapshot.clone());
        self.write_envelope(&envelope).await?;

        debug!(id = %snapshot.id, total = envelope.items.len(), "Snapshot saved");
        Ok(snapshot)
    }

    /// Lists all snapshots, oldest first (append order).
    pub async fn list(&self) -> StoreResult<Vec<SavedConfiguration>> {
        Ok(self.read_envelope().await?.items)
    }

    /// Gets a snapshot by id.
    pub async fn load(&self, id: &str) -> StoreResult<Option<SavedConfiguration>> {
        let envelope = self.read_envelope().await?;
        Ok(envelope.items.into_iter().find(|s| s.id == id))
    }

    /// Deletes a snapshot by id.
    ///
    /// ## Errors
    /// `StoreError::SnapshotNotFound` if the id is not present.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting configuration snapshot");

        let mut envelope = self.read_envelope().await?;
        let initial_len = envelope.items.len();
        envelope.items.retain(|s| s.id != id);

        if envelope.items.len() == initial_len {
            return Err(StoreError::SnapshotNotFound(id.to_string()));
        }

        self.write_envelope(&envelope).await
    }

    /// Counts stored snapshots (for diagnostics).
    pub async fn count(&self) -> StoreResult<usize> {
        Ok(self.read_envelope().await?.items.len())
    }

    // --- Envelope plumbing ---

    /// Reads and validates the whole envelope. A missing row is an empty
    /// store, not an error.
    async fn read_envelope(&self) -> StoreResult<SnapshotEnvelope> {
        let row = sqlx::query("SELECT payload FROM snapshot_store WHERE namespace = ?1")
            .bind(SNAPSHOT_NAMESPACE)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(SnapshotEnvelope::empty());
        };

        let payload: String = row.get("payload");
        let envelope: SnapshotEnvelope = serde_json::from_str(&payload)
            .map_err(|e| StoreError::CorruptPayload(e.to_string()))?;

        if envelope.version != STORE_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: envelope.version,
                expected: STORE_VERSION,
            });
        }

        Ok(envelope)
    }

    /// Writes the whole envelope back under the namespace key.
    async fn write_envelope(&self, envelope: &SnapshotEnvelope) -> StoreResult<()> {
        let payload = serde_json::to_string(envelope)
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO snapshot_store (namespace, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(namespace) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(SNAPSHOT_NAMESPACE)
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// The repository IS the production implementation of the snapshot port.
#[async_trait::async_trait]
impl SnapshotStore for SnapshotRepository {
    async fn save(
        &self,
        name: &str,
        config: &Configuration,
        price: Money,
    ) -> StoreResult<SavedConfiguration> {
        SnapshotRepository::save(self, name, config, price).await
    }

    async fn list(&self) -> StoreResult<Vec<SavedConfiguration>> {
        SnapshotRepository::list(self).await
    }

    async fn load(&self, id: &str) -> StoreResult<Option<SavedConfiguration>> {
        SnapshotRepository::load(self, id).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        SnapshotRepository::delete(self, id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};
    use heartwood_core::{ConfigurationUpdate, WoodType};

    async fn test_store() -> Store {
        Store::new(StoreConfig::in_memory()).await.unwrap()
    }

    fn walnut_config() -> Configuration {
        Configuration::new().apply(&ConfigurationUpdate {
            wood_type: Some(WoodType::Walnut),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let store = test_store().await;
        let repo = store.snapshots();
        let config = walnut_config();

        let saved = repo
            .save("Walnut chair", &config, Money::from_units(1640))
            .await
            .unwrap();

        let loaded = repo.load(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.config, config);
        assert_eq!(loaded.price.units(), 1640);
        assert_eq!(loaded.name, "Walnut chair");
    }

    #[tokio::test]
    async fn test_list_preserves_append_order() {
        let store = test_store().await;
        let repo = store.snapshots();
        let config = walnut_config();

        repo.save("first", &config, Money::from_units(1)).await.unwrap();
        repo.save("second", &config, Money::from_units(2)).await.unwrap();
        repo.save("third", &config, Money::from_units(3)).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_saved_snapshot_is_a_copy() {
        let store = test_store().await;
        let repo = store.snapshots();
        let config = walnut_config();

        let saved = repo
            .save("frozen", &config, Money::from_units(1640))
            .await
            .unwrap();

        // Mutating the live configuration afterwards must not affect the
        // stored snapshot
        let _mutated = config.apply(&ConfigurationUpdate {
            wood_type: Some(WoodType::Ebony),
            ..Default::default()
        });

        let loaded = repo.load(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.config.wood_type, WoodType::Walnut);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = test_store().await;
        let repo = store.snapshots();
        let config = walnut_config();

        let saved = repo.save("doomed", &config, Money::zero()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete(&saved.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.load(&saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = test_store().await;
        let repo = store.snapshots();

        let err = repo.delete("no-such-id").await.unwrap_err();
        assert!(matches!(err, StoreError::SnapshotNotFound(_)));
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_reported_not_swallowed() {
        let store = test_store().await;
        let repo = store.snapshots();

        sqlx::query(
            "INSERT INTO snapshot_store (namespace, payload, updated_at) VALUES (?1, ?2, ?3)",
        )
        .bind(SNAPSHOT_NAMESPACE)
        .bind("{definitely not json")
        .bind(Utc::now().to_rfc3339())
        .execute(store.pool())
        .await
        .unwrap();

        let err = repo.list().await.unwrap_err();
        assert!(matches!(err, StoreError::CorruptPayload(_)));
    }

    #[tokio::test]
    async fn test_future_version_is_rejected() {
        let store = test_store().await;
        let repo = store.snapshots();

        sqlx::query(
            "INSERT INTO snapshot_store (namespace, payload, updated_at) VALUES (?1, ?2, ?3)",
        )
        .bind(SNAPSHOT_NAMESPACE)
        .bind(r#"{"version":2,"items":[]}"#)
        .bind(Utc::now().to_rfc3339())
        .execute(store.pool())
        .await
        .unwrap();

        let err = repo.list().await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedVersion { found: 2, expected: 1 }
        ));
    }

    #[tokio::test]
    async fn test_snapshot_port_object_safety() {
        // The repository must be usable through the dyn port the session holds
        let store = test_store().await;
        let port: std::sync::Arc<dyn SnapshotStore> = std::sync::Arc::new(store.snapshots());

        let saved = port
            .save("via port", &walnut_config(), Money::from_units(1640))
            .await
            .unwrap();
        assert!(port.load(&saved.id).await.unwrap().is_some());
    }
}
