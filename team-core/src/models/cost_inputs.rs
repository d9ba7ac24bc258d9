use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::InputField;
use crate::numeric::parse_lenient;

/// The user-editable description of a team's cost scenario.
///
/// Field constraints (non-negative amounts, percentage in 0-100, and so on)
/// are documented here but not enforced; bounds are the stepper's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostInputs {
    /// Free-text label, no effect on the calculation.
    pub team_name: String,

    /// Price of one hour of ice time.
    pub cost_per_hour_of_ice: Decimal,

    /// Hours of ice time booked for the season.
    pub hours: Decimal,

    /// Total paid to the coach for the season.
    pub coach_cost_total: Decimal,

    /// Price of a single jersey; one jersey is bought per player.
    pub cost_per_jersey: Decimal,

    /// Percentage fee charged by the payment processor, in percentage points.
    pub transaction_fee_percent: Decimal,

    /// Flat fee charged by the payment processor on top of the percentage.
    pub transaction_fee_fixed_amount: Decimal,

    /// Players sharing the cost. Zero is a valid, degenerate input.
    pub number_of_players: u32,
}

impl Default for CostInputs {
    fn default() -> Self {
        Self {
            team_name: String::new(),
            cost_per_hour_of_ice: Decimal::from(200),
            hours: Decimal::TEN,
            coach_cost_total: Decimal::from(500),
            cost_per_jersey: Decimal::from(50),
            transaction_fee_percent: Decimal::from(3),
            transaction_fee_fixed_amount: Decimal::new(99, 2),
            number_of_players: 12,
        }
    }
}

impl CostInputs {
    /// Returns the numeric value of `field`, or `None` for the team name.
    pub fn numeric(
        &self,
        field: InputField,
    ) -> Option<Decimal> {
        match field {
            InputField::TeamName => None,
            InputField::CostPerHour => Some(self.cost_per_hour_of_ice),
            InputField::Hours => Some(self.hours),
            InputField::CoachCost => Some(self.coach_cost_total),
            InputField::JerseyCost => Some(self.cost_per_jersey),
            InputField::TransactionFeePercent => Some(self.transaction_fee_percent),
            InputField::TransactionFeeFixed => Some(self.transaction_fee_fixed_amount),
            InputField::NumberOfPlayers => Some(Decimal::from(self.number_of_players)),
        }
    }

    /// Writes a numeric value into `field`.
    ///
    /// The player count is converted with [`players_from_decimal`]. Returns
    /// `false` (and changes nothing) when `field` is the team name.
    pub fn set_numeric(
        &mut self,
        field: InputField,
        value: Decimal,
    ) -> bool {
        match field {
            InputField::TeamName => return false,
            InputField::CostPerHour => self.cost_per_hour_of_ice = value,
            InputField::Hours => self.hours = value,
            InputField::CoachCost => self.coach_cost_total = value,
            InputField::JerseyCost => self.cost_per_jersey = value,
            InputField::TransactionFeePercent => self.transaction_fee_percent = value,
            InputField::TransactionFeeFixed => self.transaction_fee_fixed_amount = value,
            InputField::NumberOfPlayers => self.number_of_players = players_from_decimal(value),
        }
        true
    }

    /// Text form of `field`, as written to URL parameters and snapshots.
    pub fn field_text(
        &self,
        field: InputField,
    ) -> String {
        match self.numeric(field) {
            Some(value) => value.normalize().to_string(),
            None => self.team_name.clone(),
        }
    }

    /// Parses `raw` into `field`.
    ///
    /// The team name is taken verbatim; numeric fields go through
    /// [`parse_lenient`], so unparseable text becomes zero.
    pub fn apply_text(
        &mut self,
        field: InputField,
        raw: &str,
    ) {
        if field.is_numeric() {
            self.set_numeric(field, parse_lenient(raw));
        } else {
            self.team_name = raw.to_string();
        }
    }
}

/// Converts a stepper value into a player count.
///
/// Fractions are truncated and anything below zero (or beyond `u32`)
/// collapses to the nearest representable count.
pub fn players_from_decimal(value: Decimal) -> u32 {
    if value.is_sign_negative() {
        return 0;
    }
    value.trunc().to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_match_a_typical_season() {
        let inputs = CostInputs::default();

        assert_eq!(inputs.team_name, "");
        assert_eq!(inputs.cost_per_hour_of_ice, dec!(200));
        assert_eq!(inputs.hours, dec!(10));
        assert_eq!(inputs.coach_cost_total, dec!(500));
        assert_eq!(inputs.cost_per_jersey, dec!(50));
        assert_eq!(inputs.transaction_fee_percent, dec!(3));
        assert_eq!(inputs.transaction_fee_fixed_amount, dec!(0.99));
        assert_eq!(inputs.number_of_players, 12);
    }

    #[test]
    fn set_numeric_writes_every_numeric_field() {
        let mut inputs = CostInputs::default();

        for (i, field) in InputField::NUMERIC.into_iter().enumerate() {
            let value = Decimal::from(i as u32 + 1);
            assert!(inputs.set_numeric(field, value));
            assert_eq!(inputs.numeric(field), Some(value));
        }
    }

    #[test]
    fn set_numeric_ignores_team_name() {
        let mut inputs = CostInputs::default();

        assert!(!inputs.set_numeric(InputField::TeamName, dec!(5)));
        assert_eq!(inputs, CostInputs::default());
    }

    #[test]
    fn players_from_decimal_truncates_and_floors_at_zero() {
        assert_eq!(players_from_decimal(dec!(12)), 12);
        assert_eq!(players_from_decimal(dec!(12.9)), 12);
        assert_eq!(players_from_decimal(dec!(-3)), 0);
        assert_eq!(players_from_decimal(dec!(0)), 0);
    }

    #[test]
    fn field_text_drops_trailing_zeros() {
        let mut inputs = CostInputs::default();
        inputs.hours = dec!(10.50);

        assert_eq!(inputs.field_text(InputField::Hours), "10.5");
        assert_eq!(inputs.field_text(InputField::TransactionFeeFixed), "0.99");
        assert_eq!(inputs.field_text(InputField::NumberOfPlayers), "12");
    }

    #[test]
    fn apply_text_passes_team_name_through() {
        let mut inputs = CostInputs::default();

        inputs.apply_text(InputField::TeamName, "  Ice Hawks ");

        assert_eq!(inputs.team_name, "  Ice Hawks ");
    }

    #[test]
    fn apply_text_defaults_garbage_to_zero() {
        let mut inputs = CostInputs::default();

        inputs.apply_text(InputField::CoachCost, "lots");

        assert_eq!(inputs.coach_cost_total, dec!(0));
    }
}
