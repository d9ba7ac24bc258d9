//! Season cost breakdown for a team.
//!
//! # Breakdown Structure
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Ice time: cost per hour × hours |
//! | 2    | Coach: total coach cost (taken as entered) |
//! | 3    | Jerseys: cost per jersey × number of players |
//! | 4    | Subtotal: Line 1 + Line 2 + Line 3 |
//! | 5    | Transaction fee: Line 4 × (fee percent / 100) + fixed fee |
//! | 6    | Total cost: Line 4 + Line 5 (0 when there are no players) |
//! | 7    | Cost per player: Line 6 / players (0 when there are no players) |
//!
//! # Degenerate Inputs
//!
//! With zero players there is nobody to split the bill between, so the total
//! and the per-player share are both reported as zero rather than divided.
//! Lines 1-5 are still computed so a breakdown can be shown. Negative inputs
//! are not rejected; they flow through the arithmetic unchanged. Every
//! intermediate saturates at the [`Decimal`] range instead of overflowing.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use team_core::CostInputs;
//! use team_core::calculations::CostModel;
//!
//! let inputs = CostInputs {
//!     team_name: "Ice Hawks".to_string(),
//!     cost_per_hour_of_ice: dec!(200),
//!     hours: dec!(10),
//!     coach_cost_total: dec!(500),
//!     cost_per_jersey: dec!(50),
//!     transaction_fee_percent: dec!(3),
//!     transaction_fee_fixed_amount: dec!(0.99),
//!     number_of_players: 12,
//! };
//!
//! let results = CostModel::compute(&inputs);
//!
//! assert_eq!(results.subtotal, dec!(3100));
//! assert_eq!(results.transaction_fee, dec!(93.99));
//! assert_eq!(results.total_cost, dec!(3193.99));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::{CostInputs, CostResults};

/// Calculator for the season cost breakdown.
///
/// Stateless; every call to [`CostModel::compute`] starts from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostModel;

impl CostModel {
    /// Computes the full breakdown for `inputs`.
    ///
    /// Never fails and never panics; see the module docs for how zero
    /// players and out-of-range values are handled.
    pub fn compute(inputs: &CostInputs) -> CostResults {
        let players = Decimal::from(inputs.number_of_players);

        let ice_time_cost = Self::ice_time_cost(inputs.cost_per_hour_of_ice, inputs.hours);
        let jerseys_cost = Self::jerseys_cost(inputs.cost_per_jersey, players);
        let subtotal = Self::subtotal(ice_time_cost, inputs.coach_cost_total, jerseys_cost);
        let transaction_fee = Self::transaction_fee(
            subtotal,
            inputs.transaction_fee_percent,
            inputs.transaction_fee_fixed_amount,
        );
        let total_cost = Self::total_cost(subtotal, transaction_fee, inputs.number_of_players);
        let cost_per_player = Self::cost_per_player(total_cost, inputs.number_of_players);

        trace!(%subtotal, %total_cost, %cost_per_player, "computed cost breakdown");

        CostResults {
            ice_time_cost,
            jerseys_cost,
            subtotal,
            transaction_fee,
            total_cost,
            cost_per_player,
        }
    }

    /// Line 1.
    fn ice_time_cost(
        cost_per_hour: Decimal,
        hours: Decimal,
    ) -> Decimal {
        cost_per_hour.saturating_mul(hours)
    }

    /// Line 3.
    fn jerseys_cost(
        cost_per_jersey: Decimal,
        players: Decimal,
    ) -> Decimal {
        cost_per_jersey.saturating_mul(players)
    }

    /// Line 4.
    fn subtotal(
        ice_time_cost: Decimal,
        coach_cost: Decimal,
        jerseys_cost: Decimal,
    ) -> Decimal {
        ice_time_cost
            .saturating_add(coach_cost)
            .saturating_add(jerseys_cost)
    }

    /// Line 5.
    fn transaction_fee(
        subtotal: Decimal,
        fee_percent: Decimal,
        fee_fixed: Decimal,
    ) -> Decimal {
        subtotal
            .saturating_mul(fee_percent / Decimal::ONE_HUNDRED)
            .saturating_add(fee_fixed)
    }

    /// Line 6.
    fn total_cost(
        subtotal: Decimal,
        transaction_fee: Decimal,
        players: u32,
    ) -> Decimal {
        if players == 0 {
            return Decimal::ZERO;
        }
        subtotal.saturating_add(transaction_fee)
    }

    /// Line 7.
    fn cost_per_player(
        total_cost: Decimal,
        players: u32,
    ) -> Decimal {
        if players == 0 {
            return Decimal::ZERO;
        }
        total_cost / Decimal::from(players)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;

    fn test_inputs() -> CostInputs {
        CostInputs {
            team_name: "Ice Hawks".to_string(),
            cost_per_hour_of_ice: dec!(200),
            hours: dec!(10),
            coach_cost_total: dec!(500),
            cost_per_jersey: dec!(50),
            transaction_fee_percent: dec!(3),
            transaction_fee_fixed_amount: dec!(0.99),
            number_of_players: 12,
        }
    }

    // =========================================================================
    // line tests
    // =========================================================================

    #[test]
    fn ice_time_cost_multiplies_rate_by_hours() {
        let result = CostModel::ice_time_cost(dec!(200), dec!(10.5));

        assert_eq!(result, dec!(2100));
    }

    #[test]
    fn jerseys_cost_buys_one_per_player() {
        let result = CostModel::jerseys_cost(dec!(50), dec!(12));

        assert_eq!(result, dec!(600));
    }

    #[test]
    fn subtotal_adds_ice_coach_and_jerseys() {
        let result = CostModel::subtotal(dec!(2000), dec!(500), dec!(600));

        assert_eq!(result, dec!(3100));
    }

    #[test]
    fn transaction_fee_applies_percent_then_fixed() {
        let result = CostModel::transaction_fee(dec!(3100), dec!(3), dec!(0.99));

        // 3100 * 0.03 = 93, plus 0.99
        assert_eq!(result, dec!(93.99));
    }

    #[test]
    fn transaction_fee_is_fixed_only_at_zero_percent() {
        let result = CostModel::transaction_fee(dec!(3100), dec!(0), dec!(0.99));

        assert_eq!(result, dec!(0.99));
    }

    #[test]
    fn total_cost_is_zero_without_players() {
        let result = CostModel::total_cost(dec!(3100), dec!(93.99), 0);

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn cost_per_player_is_zero_without_players() {
        let result = CostModel::cost_per_player(dec!(3193.99), 0);

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn cost_per_player_splits_evenly() {
        let result = CostModel::cost_per_player(dec!(3000), 12);

        assert_eq!(result, dec!(250));
    }

    // =========================================================================
    // compute (integration) tests
    // =========================================================================

    #[test]
    fn compute_standard_season() {
        let result = CostModel::compute(&test_inputs());

        assert_eq!(result.ice_time_cost, dec!(2000));
        assert_eq!(result.jerseys_cost, dec!(600));
        assert_eq!(result.subtotal, dec!(3100));
        assert_eq!(result.transaction_fee, dec!(93.99));
        assert_eq!(result.total_cost, dec!(3193.99));
        // 3193.99 / 12 = 266.1658333...
        assert_eq!(result.cost_per_player, dec!(3193.99) / dec!(12));
        assert_eq!(round_half_up(result.cost_per_player), dec!(266.17));
    }

    #[test]
    fn compute_without_players_reports_zero_total() {
        let mut inputs = test_inputs();
        inputs.number_of_players = 0;

        let result = CostModel::compute(&inputs);

        assert_eq!(result.total_cost, Decimal::ZERO);
        assert_eq!(result.cost_per_player, Decimal::ZERO);
        // The breakdown lines are still available for display.
        assert_eq!(result.ice_time_cost, dec!(2000));
        assert_eq!(result.jerseys_cost, dec!(0));
        assert_eq!(result.subtotal, dec!(2500));
    }

    #[test]
    fn compute_propagates_negative_inputs() {
        let mut inputs = test_inputs();
        inputs.coach_cost_total = dec!(-2600);
        inputs.transaction_fee_percent = dec!(0);
        inputs.transaction_fee_fixed_amount = dec!(0);

        let result = CostModel::compute(&inputs);

        // 2000 - 2600 + 600 = 0
        assert_eq!(result.subtotal, dec!(0));
        assert_eq!(result.total_cost, dec!(0));
    }

    #[test]
    fn compute_with_negative_total_splits_negative_share() {
        let mut inputs = test_inputs();
        inputs.coach_cost_total = dec!(-3800);
        inputs.transaction_fee_percent = dec!(0);
        inputs.transaction_fee_fixed_amount = dec!(0);

        let result = CostModel::compute(&inputs);

        assert_eq!(result.total_cost, dec!(-1200));
        assert_eq!(result.cost_per_player, dec!(-100));
    }

    #[test]
    fn compute_saturates_instead_of_overflowing() {
        let mut inputs = test_inputs();
        inputs.cost_per_hour_of_ice = Decimal::MAX;
        inputs.hours = dec!(1000);

        let result = CostModel::compute(&inputs);

        assert_eq!(result.ice_time_cost, Decimal::MAX);
        assert_eq!(result.total_cost, Decimal::MAX);
    }

    #[test]
    fn compute_does_not_touch_inputs() {
        let inputs = test_inputs();
        let before = inputs.clone();

        let _ = CostModel::compute(&inputs);

        assert_eq!(inputs, before);
    }

    #[test]
    fn compute_ignores_team_name() {
        let mut renamed = test_inputs();
        renamed.team_name = "Puck Bunnies".to_string();

        assert_eq!(CostModel::compute(&renamed), CostModel::compute(&test_inputs()));
    }

    // =========================================================================
    // properties
    // =========================================================================

    fn cents(max: i64) -> impl Strategy<Value = Decimal> {
        (0..=max).prop_map(|c| Decimal::new(c, 2))
    }

    fn season() -> impl Strategy<Value = CostInputs> {
        (
            cents(1_000_000),
            (1i64..=2_000).prop_map(|h| Decimal::new(h, 1)),
            cents(1_000_000),
            cents(50_000),
            cents(10_000),
            cents(1_000),
            0u32..=60,
        )
            .prop_map(
                |(per_hour, hours, coach, jersey, percent, fixed, players)| CostInputs {
                    team_name: String::new(),
                    cost_per_hour_of_ice: per_hour,
                    hours,
                    coach_cost_total: coach,
                    cost_per_jersey: jersey,
                    transaction_fee_percent: percent,
                    transaction_fee_fixed_amount: fixed,
                    number_of_players: players,
                },
            )
    }

    proptest! {
        #[test]
        fn total_matches_closed_form(inputs in season()) {
            prop_assume!(inputs.number_of_players > 0);
            let players = Decimal::from(inputs.number_of_players);

            let result = CostModel::compute(&inputs);

            let subtotal = inputs.cost_per_hour_of_ice * inputs.hours
                + inputs.coach_cost_total
                + inputs.cost_per_jersey * players;
            let fee_factor = Decimal::ONE + inputs.transaction_fee_percent / Decimal::ONE_HUNDRED;
            let expected = subtotal * fee_factor + inputs.transaction_fee_fixed_amount;
            prop_assert_eq!(result.total_cost, expected);
            prop_assert_eq!(result.cost_per_player, result.total_cost / players);
        }

        #[test]
        fn no_players_means_nothing_to_split(mut inputs in season()) {
            inputs.number_of_players = 0;

            let result = CostModel::compute(&inputs);

            prop_assert_eq!(result.total_cost, Decimal::ZERO);
            prop_assert_eq!(result.cost_per_player, Decimal::ZERO);
        }

        #[test]
        fn compute_is_idempotent(inputs in season()) {
            prop_assert_eq!(CostModel::compute(&inputs), CostModel::compute(&inputs));
        }
    }
}
