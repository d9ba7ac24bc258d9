//! Core of the team cost splitter.
//!
//! - **calculations**: the season cost breakdown ([`CostModel`])
//! - **stepper**: bounded increment/decrement value holder for numeric fields
//! - **query**: URL query-string round trip for shareable links
//! - **store**: snapshot persistence trait, backend registry and in-memory store
//! - **models**: [`CostInputs`], [`CostResults`] and the [`InputField`] table

pub mod calculations;
pub mod models;
pub mod numeric;
pub mod query;
pub mod stepper;
pub mod store;

pub use calculations::CostModel;
pub use models::*;
pub use stepper::{BoundedStepper, StepOutcome, StepperConfig, StepperError, ValueChanged};
pub use store::{SnapshotStore, StoreConfig, StoreError};
