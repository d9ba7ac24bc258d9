use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals derived from [`CostInputs`](crate::CostInputs).
///
/// Always produced by [`CostModel::compute`](crate::calculations::CostModel::compute);
/// it carries no state of its own and is never edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostResults {
    /// Ice rental for the season.
    pub ice_time_cost: Decimal,

    /// One jersey per player.
    pub jerseys_cost: Decimal,

    /// Ice time, coach and jerseys before fees.
    pub subtotal: Decimal,

    /// Percentage plus fixed processing fee on the subtotal.
    pub transaction_fee: Decimal,

    /// Subtotal plus fee; zero when there are no players.
    pub total_cost: Decimal,

    /// Each player's share of the total; zero when there are no players.
    pub cost_per_player: Decimal,
}
