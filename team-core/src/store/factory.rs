use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::repository::{SnapshotStore, StoreError};

/// Snapshot key used when none is configured.
pub const DEFAULT_SNAPSHOT_KEY: &str = "team-cost-splitter";

/// Backend-agnostic store configuration.
///
/// `backend` must match the [`SnapshotStoreFactory::backend_name`] of a
/// registered factory.  `connection_string` is passed through to that
/// factory unchanged; its meaning is entirely backend-specific.
///
/// | backend    | connection_string examples          |
/// |------------|-------------------------------------|
/// | `sqlite`   | `team-cost.db`, `:memory:`          |
/// | `memory`   | ignored                             |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"sqlite"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub connection_string: String,
    /// Key the snapshot is stored under.
    pub snapshot_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "team-cost.db".to_string(),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }
}

/// One implementation per storage backend.  Each backend exports a single
/// unit struct that implements this trait and is registered with a
/// [`SnapshotStoreRegistry`] at startup.
#[async_trait]
pub trait SnapshotStoreFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Open (or create) the backing storage and return a store bound to
    /// `config.snapshot_key`.
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn SnapshotStore>, StoreError>;
}

/// Registry of [`SnapshotStoreFactory`] instances, keyed by backend name.
///
/// Typical lifetime:
/// 1. Create with `SnapshotStoreRegistry::new()`.
/// 2. Call `register` once per known backend.
/// 3. Call `create` whenever a store is needed.
pub struct SnapshotStoreRegistry {
    factories: HashMap<&'static str, Box<dyn SnapshotStoreFactory>>,
}

impl SnapshotStoreRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// If a factory with the same [`SnapshotStoreFactory::backend_name`] is
    /// already present it is silently replaced.
    pub fn register(
        &mut self,
        factory: Box<dyn SnapshotStoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend` and return
    /// the store it produces.
    ///
    /// # Errors
    /// * [`StoreError::Configuration`]: no factory is registered for the
    ///   requested backend name, or the snapshot key is empty.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn SnapshotStore>, StoreError> {
        if config.snapshot_key.trim().is_empty() {
            return Err(StoreError::Configuration(
                "snapshot key must not be empty".to_string(),
            ));
        }

        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                StoreError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for SnapshotStoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use crate::models::CostInputs;

    use super::{SnapshotStore, SnapshotStoreFactory, SnapshotStoreRegistry, StoreConfig, StoreError};

    // ── stub store ───────────────────────────────────────────────────────
    // The tests never call these; they only verify that the registry
    // routes to the correct factory.
    struct StubStore;

    #[async_trait]
    impl SnapshotStore for StubStore {
        async fn load(&self) -> Result<Option<CostInputs>, StoreError> {
            Ok(None)
        }
        async fn save(
            &self,
            _inputs: &CostInputs,
        ) -> Result<(), StoreError> {
            Ok(())
        }
        async fn clear(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    // ── stub factory ─────────────────────────────────────────────────────
    /// A factory whose `create` flips an `AtomicBool` and returns a
    /// [`StubStore`].  The flag lets tests prove that `create` was
    /// actually called.
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl SnapshotStoreFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn SnapshotStore>, StoreError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubStore))
        }
    }

    /// A factory that always returns a `Connection` error.
    struct FailingFactory;

    #[async_trait]
    impl SnapshotStoreFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn SnapshotStore>, StoreError> {
            Err(StoreError::Connection("intentional failure".to_string()))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn SnapshotStoreFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    fn config_for(backend: &str) -> StoreConfig {
        StoreConfig {
            backend: backend.to_string(),
            ..StoreConfig::default()
        }
    }

    // ── StoreConfig ──────────────────────────────────────────────────────
    #[test]
    fn store_config_default_is_sqlite_file() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.backend, "sqlite");
        assert_eq!(cfg.connection_string, "team-cost.db");
        assert_eq!(cfg.snapshot_key, "team-cost-splitter");
    }

    // ── registration ─────────────────────────────────────────────────────
    #[test]
    fn new_registry_has_no_backends() {
        assert!(SnapshotStoreRegistry::new().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut reg = SnapshotStoreRegistry::new();
        let (f1, _) = stub_factory("sqlite");
        let (f2, _) = stub_factory("memory");
        reg.register(f1);
        reg.register(f2);
        assert_eq!(reg.available_backends(), vec!["memory", "sqlite"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = SnapshotStoreRegistry::new();
        let (old, _) = stub_factory("sqlite");
        let (new, _) = stub_factory("sqlite");
        reg.register(old);
        reg.register(new);
        assert_eq!(reg.available_backends(), vec!["sqlite"]);
    }

    // ── dispatch ─────────────────────────────────────────────────────────
    #[tokio::test]
    async fn create_calls_matching_factory_only() {
        let mut reg = SnapshotStoreRegistry::new();
        let (sqlite_factory, sqlite_called) = stub_factory("sqlite");
        let (memory_factory, memory_called) = stub_factory("memory");
        reg.register(sqlite_factory);
        reg.register(memory_factory);

        let result = reg.create(&config_for("sqlite")).await;

        assert!(result.is_ok(), "expected Ok, got {:#?}", result.err());
        assert!(sqlite_called.load(Ordering::SeqCst));
        assert!(!memory_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_backend_names_requested_and_available_backends() {
        let mut reg = SnapshotStoreRegistry::new();
        let (f, _) = stub_factory("sqlite");
        reg.register(f);

        match reg.create(&config_for("postgres")).await {
            Err(StoreError::Configuration(msg)) => {
                assert!(msg.contains("postgres"), "error should name the requested backend");
                assert!(msg.contains("sqlite"), "error should list available backends");
            }
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a store"),
        }
    }

    #[tokio::test]
    async fn empty_snapshot_key_is_rejected_before_dispatch() {
        let mut reg = SnapshotStoreRegistry::new();
        let (f, called) = stub_factory("sqlite");
        reg.register(f);

        let config = StoreConfig {
            snapshot_key: "  ".to_string(),
            ..config_for("sqlite")
        };

        assert!(matches!(
            reg.create(&config).await,
            Err(StoreError::Configuration(_))
        ));
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = SnapshotStoreRegistry::new();
        reg.register(Box::new(FailingFactory));

        assert!(matches!(
            reg.create(&config_for("failing")).await,
            Err(StoreError::Connection(msg)) if msg == "intentional failure"
        ));
    }
}
