use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::stepper::StepperConfig;

/// One editable field of [`CostInputs`](crate::CostInputs).
///
/// This is the single table every serialization boundary goes through:
/// storage rows, URL parameters and command-line field names all map
/// through [`InputField::query_key`] / [`InputField::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    TeamName,
    CostPerHour,
    Hours,
    CoachCost,
    JerseyCost,
    TransactionFeePercent,
    TransactionFeeFixed,
    NumberOfPlayers,
}

/// Error returned when a field name matches none of the known keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownFieldError(pub String);

impl InputField {
    /// Every field, in display order.
    pub const ALL: [InputField; 8] = [
        InputField::TeamName,
        InputField::CostPerHour,
        InputField::Hours,
        InputField::CoachCost,
        InputField::JerseyCost,
        InputField::TransactionFeePercent,
        InputField::TransactionFeeFixed,
        InputField::NumberOfPlayers,
    ];

    /// The seven fields that are edited through a stepper.
    pub const NUMERIC: [InputField; 7] = [
        InputField::CostPerHour,
        InputField::Hours,
        InputField::CoachCost,
        InputField::JerseyCost,
        InputField::TransactionFeePercent,
        InputField::TransactionFeeFixed,
        InputField::NumberOfPlayers,
    ];

    /// Key used in URL query strings and stored snapshots.
    pub fn query_key(&self) -> &'static str {
        match self {
            Self::TeamName => "teamName",
            Self::CostPerHour => "costPerHour",
            Self::Hours => "hours",
            Self::CoachCost => "coachCost",
            Self::JerseyCost => "jerseyCost",
            Self::TransactionFeePercent => "transactionFeePercent",
            Self::TransactionFeeFixed => "transactionFeeFixed",
            Self::NumberOfPlayers => "numberOfPlayers",
        }
    }

    /// Kebab-case alias accepted on the command line.
    pub fn attribute_name(&self) -> &'static str {
        match self {
            Self::TeamName => "team-name",
            Self::CostPerHour => "cost-per-hour",
            Self::Hours => "hours",
            Self::CoachCost => "coach-cost",
            Self::JerseyCost => "jersey-cost",
            Self::TransactionFeePercent => "transaction-fee-percent",
            Self::TransactionFeeFixed => "transaction-fee-fixed",
            Self::NumberOfPlayers => "number-of-players",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TeamName => "Team Name",
            Self::CostPerHour => "Cost of Ice per Hour",
            Self::Hours => "Number of Hours",
            Self::CoachCost => "Coach Cost (Total)",
            Self::JerseyCost => "Cost per Jersey",
            Self::TransactionFeePercent => "Transaction Fee (%)",
            Self::TransactionFeeFixed => "Fixed Transaction Fee",
            Self::NumberOfPlayers => "Number of Players",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::TeamName)
    }

    /// Looks a field up by query key, attribute alias or snake_case name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|field| {
            s == field.query_key()
                || s == field.attribute_name()
                || s == field.attribute_name().replace('-', "_")
        })
    }

    /// Bounds and step used when the field is edited through a stepper.
    ///
    /// Returns `None` for the team name, which is free text.
    pub fn default_stepper_config(&self) -> Option<StepperConfig> {
        let (min, max, step) = match self {
            Self::TeamName => return None,
            Self::CostPerHour => (Some(Decimal::ZERO), None, Decimal::from(5)),
            Self::Hours => (Some(Decimal::ONE), None, Decimal::new(5, 1)),
            Self::CoachCost => (Some(Decimal::ZERO), None, Decimal::from(25)),
            Self::JerseyCost => (Some(Decimal::ZERO), None, Decimal::from(5)),
            Self::TransactionFeePercent => {
                (Some(Decimal::ZERO), Some(Decimal::TEN), Decimal::new(1, 1))
            }
            Self::TransactionFeeFixed => (Some(Decimal::ZERO), None, Decimal::new(1, 2)),
            Self::NumberOfPlayers => (Some(Decimal::ONE), Some(Decimal::from(30)), Decimal::ONE),
        };
        Some(StepperConfig { min, max, step })
    }
}

impl fmt::Display for InputField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.query_key())
    }
}

impl FromStr for InputField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
