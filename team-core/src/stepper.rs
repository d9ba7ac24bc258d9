//! Bounded numeric stepper.
//!
//! A [`BoundedStepper`] holds the value of one numeric input field. It can be
//! nudged up or down by a fixed step, which is refused when it would cross a
//! bound, or set directly, which is never clamped. No operation fails: a
//! refused step is a no-op and unparseable text becomes zero.
//!
//! Every applied change carries exactly one [`ValueChanged`] notification in
//! the returned [`StepOutcome`]; refused or no-op operations carry none.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use team_core::stepper::{BoundedStepper, StepperConfig};
//!
//! let config = StepperConfig {
//!     min: Some(dec!(0)),
//!     max: Some(dec!(10)),
//!     step: dec!(5),
//! };
//! let mut stepper = BoundedStepper::new(config, dec!(10)).unwrap();
//!
//! assert!(!stepper.increment().changed());
//! assert_eq!(stepper.value(), dec!(10));
//!
//! assert_eq!(stepper.decrement().value, dec!(5));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::numeric::parse_lenient;

/// Errors that can occur when constructing a stepper.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepperError {
    /// The step must be strictly positive.
    #[error("step must be positive, got {0}")]
    NonPositiveStep(Decimal),

    /// The minimum bound is above the maximum bound.
    #[error("minimum {min} is greater than maximum {max}")]
    InvertedBounds { min: Decimal, max: Decimal },
}

/// Bounds and step size for a [`BoundedStepper`].
///
/// Missing bounds mean the value is unbounded in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepperConfig {
    #[serde(default)]
    pub min: Option<Decimal>,

    #[serde(default)]
    pub max: Option<Decimal>,

    #[serde(default = "default_step")]
    pub step: Decimal,
}

fn default_step() -> Decimal {
    Decimal::ONE
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            step: default_step(),
        }
    }
}

impl StepperConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`StepperError`] if:
    /// - `step` is zero or negative
    /// - both bounds are set and `min > max`
    pub fn validate(&self) -> Result<(), StepperError> {
        if self.step <= Decimal::ZERO {
            return Err(StepperError::NonPositiveStep(self.step));
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(StepperError::InvertedBounds { min, max });
            }
        }
        Ok(())
    }
}

/// Notification carried by every applied change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueChanged {
    pub value: Decimal,
}

/// Result of a stepper operation: the value afterwards, plus the change
/// notification when the operation was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub value: Decimal,
    pub notification: Option<ValueChanged>,
}

impl StepOutcome {
    fn applied(value: Decimal) -> Self {
        Self {
            value,
            notification: Some(ValueChanged { value }),
        }
    }

    fn unchanged(value: Decimal) -> Self {
        Self {
            value,
            notification: None,
        }
    }

    /// `true` when the operation changed the value.
    pub fn changed(&self) -> bool {
        self.notification.is_some()
    }
}

/// Holds one numeric field's value and enforces its step discipline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedStepper {
    value: Decimal,
    config: StepperConfig,
}

impl BoundedStepper {
    /// Creates a stepper starting at `value`.
    ///
    /// The starting value is taken as-is, even when it lies outside the
    /// bounds; only stepping is bounded.
    ///
    /// # Errors
    ///
    /// Returns [`StepperError`] when `config` fails
    /// [`StepperConfig::validate`].
    pub fn new(
        config: StepperConfig,
        value: Decimal,
    ) -> Result<Self, StepperError> {
        config.validate()?;
        Ok(Self { value, config })
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// Sets the value directly, without clamping to the bounds.
    pub fn set_value(
        &mut self,
        value: Decimal,
    ) -> StepOutcome {
        if value == self.value {
            return StepOutcome::unchanged(self.value);
        }
        self.value = value;
        debug!(%value, "stepper value set");
        StepOutcome::applied(value)
    }

    /// Parses `raw` and sets the result directly.
    ///
    /// Text that cannot be parsed sets the value to zero.
    pub fn set_raw(
        &mut self,
        raw: &str,
    ) -> StepOutcome {
        self.set_value(parse_lenient(raw))
    }

    /// Adds one step unless that would go above the maximum.
    pub fn increment(&mut self) -> StepOutcome {
        let candidate = self.value.checked_add(self.config.step);
        let allowed = match (candidate, self.config.max) {
            (Some(candidate), Some(max)) => candidate <= max,
            (Some(_), None) => true,
            (None, _) => false,
        };
        self.apply_step(candidate, allowed, "increment")
    }

    /// Subtracts one step unless that would go below the minimum.
    pub fn decrement(&mut self) -> StepOutcome {
        let candidate = self.value.checked_sub(self.config.step);
        let allowed = match (candidate, self.config.min) {
            (Some(candidate), Some(min)) => candidate >= min,
            (Some(_), None) => true,
            (None, _) => false,
        };
        self.apply_step(candidate, allowed, "decrement")
    }

    fn apply_step(
        &mut self,
        candidate: Option<Decimal>,
        allowed: bool,
        direction: &'static str,
    ) -> StepOutcome {
        match candidate {
            Some(value) if allowed => {
                self.value = value;
                debug!(direction, %value, "stepper moved");
                StepOutcome::applied(value)
            }
            _ => {
                debug!(direction, value = %self.value, "stepper at bound, step refused");
                StepOutcome::unchanged(self.value)
            }
        }
    }
}
