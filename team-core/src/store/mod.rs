pub mod factory;
pub mod memory;
pub mod repository;

pub use factory::{DEFAULT_SNAPSHOT_KEY, SnapshotStoreFactory, SnapshotStoreRegistry, StoreConfig};
pub use memory::{MemorySnapshotStore, MemoryStoreFactory};
pub use repository::{SnapshotStore, StoreError};
