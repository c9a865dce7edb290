//! # Configurator Session
//!
//! The single source of truth for the commission page at runtime.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Configurator Session Operations                        │
//! │                                                                         │
//! │  Frontend Action           Session Operation        State Change       │
//! │  ───────────────           ─────────────────        ────────────       │
//! │                                                                         │
//! │  Pick wood/slider ───────► update() ──────────────► reducer applies    │
//! │                                                                         │
//! │  Upload pattern ─────────► upload_custom_pattern()► validate + apply   │
//! │                                                                         │
//! │  Save button ────────────► save_snapshot() ───────► store port write   │
//! │                                                                         │
//! │  Open saved ─────────────► load_snapshot() ───────► wholesale replace  │
//! │                                                                         │
//! │  Share button ───────────► share_url() ───────────► (read only)        │
//! │                                                                         │
//! │  Open shared link ───────► import_share_url() ────► wholesale replace  │
//! │                                                                         │
//! │  After EVERY accepted state change the onConfigChange listener fires   │
//! │  with the new configuration and its quote. Rejected operations (bad    │
//! │  upload, dead store) change nothing and fire nothing.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Configuration state lives in `Arc<Mutex<T>>` because the embedding page
//! may drive the session from concurrent callbacks, and only one mutation
//! may run at a time. Locks are never held across an await or a listener
//! call.
//!
//! ## Scene Memoization
//! Deriving the scene spec is the expensive part of a change (the renderer
//! regenerates textures/displacement from it), so the session caches the
//! last `(SceneKey, SceneSpec)` pair. Quote-only changes — quantity, rush
//! order — leave the key untouched and reuse the cached spec; rapid slider
//! drags only pay for the stops they actually land on.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use heartwood_core::{
    estimated_hours, price, Configuration, ConfigurationUpdate, Money, PatternImage,
    PriceBreakdown, SavedConfiguration, SceneKey, SceneSpec,
};
use heartwood_store::{share, SnapshotStore};

use crate::error::ConfiguratorError;

/// Listener invoked after every accepted state change.
pub type ConfigChangeListener = Arc<dyn Fn(&Configuration, Money) + Send + Sync>;

/// Inner mutable state guarded by the session mutex.
#[derive(Debug)]
struct SessionState {
    config: Configuration,

    /// Last derived scene, keyed by the visually-relevant fields.
    scene_cache: Option<(SceneKey, SceneSpec)>,

    /// How many times the scene was actually re-derived (diagnostics).
    scene_rebuilds: u64,
}

/// A client-side commission request (the site has no backend; this is what
/// the page would POST if it ever grows one).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRequest {
    /// Human-readable reference shown to the visitor.
    pub reference: String,
    pub config: Configuration,
    pub price: Money,
    pub estimated_hours: f64,
}

/// The configurator session: current configuration, quote, memoized scene,
/// change notification, and snapshot/share plumbing.
pub struct ConfiguratorSession {
    state: Arc<Mutex<SessionState>>,
    listener: Mutex<Option<ConfigChangeListener>>,
    store: Option<Arc<dyn SnapshotStore>>,
}

impl ConfiguratorSession {
    /// Creates a session with default configuration and no snapshot store.
    /// Save/load/delete will fail with NO_STORE; everything else works.
    pub fn new() -> Self {
        ConfiguratorSession {
            state: Arc::new(Mutex::new(SessionState {
                config: Configuration::new(),
                scene_cache: None,
                scene_rebuilds: 0,
            })),
            listener: Mutex::new(None),
            store: None,
        }
    }

    /// Creates a session backed by a snapshot store port.
    pub fn with_store(store: Arc<dyn SnapshotStore>) -> Self {
        let mut session = ConfiguratorSession::new();
        session.store = Some(store);
        session
    }

    /// Registers the onConfigChange listener. The listener fires after every
    /// accepted state change with the new configuration and its quote.
    /// Replaces any previously registered listener.
    pub fn on_config_change<F>(&self, listener: F)
    where
        F: Fn(&Configuration, Money) + Send + Sync + 'static,
    {
        let mut slot = self.listener.lock().expect("listener mutex poisoned");
        *slot = Some(Arc::new(listener));
    }

    // --- Reads ---

    /// Returns a copy of the current configuration.
    pub fn current(&self) -> Configuration {
        self.state
            .lock()
            .expect("session mutex poisoned")
            .config
            .clone()
    }

    /// Computes the itemized quote for the current configuration.
    pub fn quote(&self) -> PriceBreakdown {
        price(&self.current())
    }

    /// Estimated workshop hours for the current configuration.
    pub fn estimated_hours(&self) -> f64 {
        estimated_hours(&self.current())
    }

    // --- Mutations ---

    /// Applies a partial update through the core reducer.
    ///
    /// Always succeeds: out-of-range values are clamped, not rejected.
    /// Returns the fresh quote after firing the change listener.
    pub fn update(&self, update: &ConfigurationUpdate) -> PriceBreakdown {
        debug!("update command");
        let next = {
            let mut state = self.state.lock().expect("session mutex poisoned");
            state.config = state.config.apply(update);
            state.config.clone()
        };
        self.accepted(&next)
    }

    /// Validates and stores an uploaded custom pattern.
    ///
    /// ## Behavior
    /// - Valid image: stored, `pattern` becomes Custom, listener fires
    /// - Anything else: rejected with VALIDATION_ERROR, no state change,
    ///   no listener call
    pub fn upload_custom_pattern(
        &self,
        file_name: &str,
        declared_content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<PriceBreakdown, ConfiguratorError> {
        debug!(file = %file_name, "upload_custom_pattern command");
        let image = PatternImage::new(file_name, declared_content_type, bytes)?;

        let next = {
            let mut state = self.state.lock().expect("session mutex poisoned");
            state.config = state.config.with_custom_pattern(image);
            state.config.clone()
        };
        Ok(self.accepted(&next))
    }

    /// Replaces the configuration wholesale (snapshot load, share import).
    fn replace(&self, config: Configuration) -> PriceBreakdown {
        let next = {
            let mut state = self.state.lock().expect("session mutex poisoned");
            state.config = config;
            state.config.clone()
        };
        self.accepted(&next)
    }

    /// Post-acceptance bookkeeping: quote + listener. State lock is NOT held
    /// here, so a listener may call back into the session.
    fn accepted(&self, config: &Configuration) -> PriceBreakdown {
        let quote = price(config);
        let listener = self
            .listener
            .lock()
            .expect("listener mutex poisoned")
            .clone();
        if let Some(listener) = listener {
            listener(config, quote.total);
        }
        quote
    }

    // --- Scene ---

    /// Returns the scene spec for the current configuration, reusing the
    /// cached derivation when no visually-relevant field changed.
    pub fn scene(&self) -> SceneSpec {
        let mut state = self.state.lock().expect("session mutex poisoned");
        let key = SceneKey::of(&state.config);

        if let Some((cached_key, cached_spec)) = &state.scene_cache {
            if *cached_key == key {
                return cached_spec.clone();
            }
        }

        let spec = SceneSpec::from_configuration(&state.config);
        state.scene_rebuilds += 1;
        debug!(rebuilds = state.scene_rebuilds, "Scene spec re-derived");
        state.scene_cache = Some((key, spec.clone()));
        spec
    }

    /// Number of actual scene derivations so far (diagnostics).
    pub fn scene_rebuild_count(&self) -> u64 {
        self.state
            .lock()
            .expect("session mutex poisoned")
            .scene_rebuilds
    }

    // --- Snapshots (injected store port) ---

    /// Saves the current configuration under a name.
    ///
    /// A failing store degrades to STORE_UNAVAILABLE; the live configuration
    /// and quote are unaffected.
    pub async fn save_snapshot(
        &self,
        name: &str,
    ) -> Result<SavedConfiguration, ConfiguratorError> {
        let store = self.store.as_ref().ok_or_else(ConfiguratorError::no_store)?;
        let (config, total) = {
            let state = self.state.lock().expect("session mutex poisoned");
            let quote = price(&state.config);
            (state.config.clone(), quote.total)
        };

        store
            .save(name, &config, total)
            .await
            .map_err(|e| {
                warn!("Saving snapshot failed: {}", e);
                ConfiguratorError::from(e)
            })
    }

    /// Lists all saved snapshots.
    pub async fn list_snapshots(&self) -> Result<Vec<SavedConfiguration>, ConfiguratorError> {
        let store = self.store.as_ref().ok_or_else(ConfiguratorError::no_store)?;
        store.list().await.map_err(|e| {
            warn!("Listing snapshots failed: {}", e);
            ConfiguratorError::from(e)
        })
    }

    /// Loads a snapshot and replaces the current configuration wholesale.
    /// Fires the change listener with the restored state.
    pub async fn load_snapshot(&self, id: &str) -> Result<PriceBreakdown, ConfiguratorError> {
        let store = self.store.as_ref().ok_or_else(ConfiguratorError::no_store)?;
        let snapshot = store
            .load(id)
            .await
            .map_err(|e| {
                warn!("Loading snapshot failed: {}", e);
                ConfiguratorError::from(e)
            })?
            .ok_or_else(|| ConfiguratorError::not_found("Snapshot", id))?;

        info!(id = %id, name = %snapshot.name, "Snapshot restored");
        Ok(self.replace(snapshot.config))
    }

    /// Deletes a saved snapshot. The live configuration is untouched.
    pub async fn delete_snapshot(&self, id: &str) -> Result<(), ConfiguratorError> {
        let store = self.store.as_ref().ok_or_else(ConfiguratorError::no_store)?;
        store.delete(id).await.map_err(|e| {
            warn!("Deleting snapshot failed: {}", e);
            ConfiguratorError::from(e)
        })
    }

    // --- Share links ---

    /// Builds a shareable URL for the current configuration (pattern image
    /// excluded; see the store crate's share module).
    pub fn share_url(&self, base_url: &str) -> String {
        share::share_url(base_url, &self.current())
    }

    /// Imports a configuration from a share URL, replacing the current one
    /// wholesale. Fires the change listener on success.
    pub fn import_share_url(&self, url: &str) -> Result<PriceBreakdown, ConfiguratorError> {
        let config = share::decode_share_url(url)?;
        info!("Configuration imported from share link");
        Ok(self.replace(config))
    }

    // --- Commission ---

    /// Builds the commission request the page submits.
    ///
    /// Client-side stub: there is no backend to receive it yet, so this
    /// just assembles the payload and a reference the visitor can quote
    /// in email.
    pub fn submit_commission(&self) -> CommissionRequest {
        let config = self.current();
        let quote = price(&config);
        let reference = format!(
            "HW-{}",
            &Uuid::new_v4().simple().to_string()[..8].to_uppercase()
        );

        info!(reference = %reference, total = %quote.total, "Commission request assembled");

        CommissionRequest {
            reference,
            estimated_hours: estimated_hours(&config),
            price: quote.total,
            config,
        }
    }
}

impl Default for ConfiguratorSession {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use heartwood_core::{CarvingPattern, CarvingTechnique, Dimensions, WoodType};
    use heartwood_store::MemorySnapshotStore;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn walnut_update() -> ConfigurationUpdate {
        ConfigurationUpdate {
            wood_type: Some(WoodType::Walnut),
            dimensions: Some(Dimensions::new(1.2, 2.0, 1.0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_update_recomputes_quote_and_notifies() {
        let session = ConfiguratorSession::new();
        let seen: Arc<Mutex<Vec<i64>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        session.on_config_change(move |_config, total| {
            sink.lock().unwrap().push(total.units());
        });

        let quote = session.update(&walnut_update());
        assert_eq!(quote.total.units(), 1640);
        assert_eq!(*seen.lock().unwrap(), vec![1640]);
        assert_eq!(session.current().wood_type, WoodType::Walnut);
    }

    #[test]
    fn test_rejected_upload_changes_nothing_and_stays_silent() {
        let session = ConfiguratorSession::new();
        let fired = Arc::new(Mutex::new(0u32));
        let sink = fired.clone();
        session.on_config_change(move |_, _| *sink.lock().unwrap() += 1);

        let before = session.current();
        let err = session
            .upload_custom_pattern("notes.txt", "text/plain", b"hello".to_vec())
            .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert_eq!(session.current(), before);
        assert_eq!(*fired.lock().unwrap(), 0);
    }

    #[test]
    fn test_accepted_upload_selects_custom_pattern() {
        let session = ConfiguratorSession::new();
        session.update(&ConfigurationUpdate {
            carving_technique: Some(CarvingTechnique::Relief),
            ..Default::default()
        });

        session
            .upload_custom_pattern("rose.png", "image/png", PNG_MAGIC.to_vec())
            .unwrap();

        let config = session.current();
        assert_eq!(config.pattern, CarvingPattern::Custom);
        assert!(config.custom_pattern_image.is_some());
    }

    #[test]
    fn test_scene_memoization_skips_price_only_changes() {
        let session = ConfiguratorSession::new();
        let _ = session.scene();
        assert_eq!(session.scene_rebuild_count(), 1);

        // Quote-only changes: cached spec is reused
        session.update(&ConfigurationUpdate {
            quantity: Some(5),
            rush_order: Some(true),
            ..Default::default()
        });
        let _ = session.scene();
        assert_eq!(session.scene_rebuild_count(), 1);

        // Visual change: re-derived once
        session.update(&ConfigurationUpdate {
            wood_type: Some(WoodType::Ebony),
            ..Default::default()
        });
        let _ = session.scene();
        let _ = session.scene();
        assert_eq!(session.scene_rebuild_count(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_save_load_round_trip() {
        let session =
            ConfiguratorSession::with_store(Arc::new(MemorySnapshotStore::new()));
        session.update(&walnut_update());
        let saved = session.save_snapshot("Walnut chair").await.unwrap();
        assert_eq!(saved.price.units(), 1640);

        // Drift away, then restore
        session.update(&ConfigurationUpdate {
            wood_type: Some(WoodType::Pine),
            ..Default::default()
        });
        assert_eq!(session.current().wood_type, WoodType::Pine);

        let quote = session.load_snapshot(&saved.id).await.unwrap();
        assert_eq!(quote.total.units(), 1640);
        assert_eq!(session.current().wood_type, WoodType::Walnut);
    }

    #[tokio::test]
    async fn test_load_fires_listener() {
        let session =
            ConfiguratorSession::with_store(Arc::new(MemorySnapshotStore::new()));
        let saved = session.save_snapshot("plain").await.unwrap();

        let fired = Arc::new(Mutex::new(0u32));
        let sink = fired.clone();
        session.on_config_change(move |_, _| *sink.lock().unwrap() += 1);

        session.load_snapshot(&saved.id).await.unwrap();
        assert_eq!(*fired.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_degrades_without_touching_state() {
        let store = Arc::new(MemorySnapshotStore::new());
        let session = ConfiguratorSession::with_store(store.clone());
        session.update(&walnut_update());

        store.set_failing(true);
        let err = session.save_snapshot("doomed").await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::StoreUnavailable);

        // Pricing keeps working; configuration untouched
        assert_eq!(session.quote().total.units(), 1640);
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_not_found() {
        let session =
            ConfiguratorSession::with_store(Arc::new(MemorySnapshotStore::new()));
        let err = session.load_snapshot("no-such-id").await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_session_without_store() {
        let session = ConfiguratorSession::new();
        let err = session.save_snapshot("anything").await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NoStore);
    }

    #[test]
    fn test_share_round_trip_between_sessions() {
        let sender = ConfiguratorSession::new();
        sender.update(&ConfigurationUpdate {
            wood_type: Some(WoodType::Mahogany),
            carving_technique: Some(CarvingTechnique::Pierced),
            carving_depth: Some(8),
            ..Default::default()
        });
        let url = sender.share_url("https://heartwood.example/commission");

        let receiver = ConfiguratorSession::new();
        receiver.import_share_url(&url).unwrap();
        assert_eq!(receiver.current(), sender.current());
    }

    #[test]
    fn test_malformed_share_link_rejected() {
        let session = ConfiguratorSession::new();
        let before = session.current();
        let err = session
            .import_share_url("https://heartwood.example/commission?config=garbage!!!")
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert_eq!(session.current(), before);
    }

    #[test]
    fn test_submit_commission_stub() {
        let session = ConfiguratorSession::new();
        session.update(&walnut_update());
        let request = session.submit_commission();

        assert!(request.reference.starts_with("HW-"));
        assert_eq!(request.reference.len(), 11);
        assert_eq!(request.price.units(), 1640);
        assert!((request.estimated_hours - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_listener_may_reenter_session() {
        // The listener fires with no session lock held, so reading back is fine
        let session = Arc::new(ConfiguratorSession::new());
        let inner = session.clone();
        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        session.on_config_change(move |_, _| {
            *sink.lock().unwrap() = Some(inner.quote().total.units());
        });

        session.update(&walnut_update());
        assert_eq!(*observed.lock().unwrap(), Some(1640));
    }
}
