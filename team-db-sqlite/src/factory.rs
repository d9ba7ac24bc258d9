use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use team_core::store::{SnapshotStore, SnapshotStoreFactory, StoreConfig, StoreError};
use tracing::info;

use crate::repository::SqliteSnapshotStore;

const IN_MEMORY: &str = ":memory:";

/// Translate a connection string into sqlx connect options.
///
/// * `":memory:"` maps to an ephemeral in-memory database.
/// * Anything starting with `sqlite:` is treated as a sqlx URL.
/// * Any other value is a file path; the file is created if missing.
fn connect_options(connection_string: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    if connection_string == IN_MEMORY {
        SqliteConnectOptions::from_str("sqlite::memory:")
    } else if connection_string.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(connection_string)
    } else {
        Ok(SqliteConnectOptions::new()
            .filename(connection_string)
            .create_if_missing(true))
    }
}

/// [`SnapshotStoreFactory`] for SQLite.
///
/// Register this with a [`team_core::store::SnapshotStoreRegistry`] to make
/// the `"sqlite"` backend available:
///
/// ```rust,no_run
/// use team_core::store::SnapshotStoreRegistry;
/// use team_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = SnapshotStoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl SnapshotStoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and run
    /// migrations.
    ///
    /// An in-memory database lives only as long as its connection, so the
    /// pool is capped at a single connection in that case.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn SnapshotStore>, StoreError> {
        let options = connect_options(&config.connection_string)
            .map_err(|e| StoreError::Configuration(e.to_string()))?;

        let mut pool_options = SqlitePoolOptions::new();
        if config.connection_string.contains(IN_MEMORY) {
            pool_options = pool_options.max_connections(1);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = SqliteSnapshotStore::new_with_pool(pool, config.snapshot_key.clone());
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{e:#}")))?;

        info!(
            connection = %config.connection_string,
            key = %config.snapshot_key,
            "opened sqlite snapshot store"
        );
        Ok(Box::new(store))
    }
}
