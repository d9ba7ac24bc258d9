use async_trait::async_trait;
use thiserror::Error;

use crate::models::CostInputs;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Durable home for the current [`CostInputs`] snapshot.
///
/// Each store instance is bound to one snapshot key when it is created, so
/// callers only ever see "the" snapshot. A missing snapshot is not an
/// error: [`SnapshotStore::load`] returns `Ok(None)` and defaults apply.
/// Saving identical inputs twice leaves an identical snapshot.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Reads the stored snapshot, if any.
    async fn load(&self) -> Result<Option<CostInputs>, StoreError>;

    /// Writes `inputs`, replacing any previous snapshot.
    async fn save(&self, inputs: &CostInputs) -> Result<(), StoreError>;

    /// Removes the snapshot. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), StoreError>;
}
