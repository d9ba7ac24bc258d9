//! Process-local snapshot store.
//!
//! Snapshots live in a shared map and disappear with the process. Useful
//! for tests and for throwaway sessions that should not touch disk.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::factory::{SnapshotStoreFactory, StoreConfig};
use super::repository::{SnapshotStore, StoreError};
use crate::models::CostInputs;

type Slots = Arc<Mutex<HashMap<String, CostInputs>>>;

/// In-memory [`SnapshotStore`] bound to one key.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what a session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    key: String,
    slots: Slots,
}

impl MemorySnapshotStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            slots: Slots::default(),
        }
    }

    /// A store for `key` that shares this store's map.
    pub fn with_key(
        &self,
        key: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            slots: Arc::clone(&self.slots),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn slots(&self) -> Result<MutexGuard<'_, HashMap<String, CostInputs>>, StoreError> {
        self.slots
            .lock()
            .map_err(|e| StoreError::Database(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<Option<CostInputs>, StoreError> {
        Ok(self.slots()?.get(&self.key).cloned())
    }

    async fn save(
        &self,
        inputs: &CostInputs,
    ) -> Result<(), StoreError> {
        self.slots()?.insert(self.key.clone(), inputs.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.slots()?.remove(&self.key);
        Ok(())
    }
}

/// [`SnapshotStoreFactory`] for the `"memory"` backend.
///
/// Each `create` call returns a fresh, empty store; the connection string
/// is ignored.
pub struct MemoryStoreFactory;

#[async_trait]
impl SnapshotStoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn SnapshotStore>, StoreError> {
        Ok(Box::new(MemorySnapshotStore::new(config.snapshot_key.clone())))
    }
}
