//! SQLite backend for the team cost splitter's snapshot store.
//!
//! Register [`SqliteStoreFactory`] with a
//! [`team_core::store::SnapshotStoreRegistry`] to make the `"sqlite"`
//! backend available.

mod decimal;
mod factory;
mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::SqliteSnapshotStore;
