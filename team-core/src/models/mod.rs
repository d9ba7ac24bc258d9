mod cost_inputs;
mod cost_results;
mod input_field;

pub use cost_inputs::{CostInputs, players_from_decimal};
pub use cost_results::CostResults;
pub use input_field::{InputField, UnknownFieldError};
