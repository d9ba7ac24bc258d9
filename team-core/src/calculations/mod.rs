//! Cost calculations for a team season.
//!
//! This module provides the pure arithmetic that turns a
//! [`CostInputs`](crate::CostInputs) into a [`CostResults`](crate::CostResults),
//! plus the rounding helper used when results are displayed.

pub mod common;
pub mod cost_model;

pub use cost_model::CostModel;
