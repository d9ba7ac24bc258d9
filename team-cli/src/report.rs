use std::fmt;

use team_core::calculations::common::format_currency;
use team_core::{CostInputs, CostResults};

const LABEL_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 12;

/// Printable cost breakdown for one scenario.
///
/// ```text
/// Ice Hawks Costs
/// Ice Time:               $2000.00
/// Coach:                   $500.00
/// Jerseys (12):            $600.00
/// Transaction Fees:         $93.99
/// Total:                  $3193.99
/// Cost per Player:         $266.17
/// ```
pub struct Breakdown<'a> {
    pub inputs: &'a CostInputs,
    pub results: &'a CostResults,
}

impl Breakdown<'_> {
    /// `"<team> Costs"`, or `"Total Costs"` when the team has no name.
    pub fn title(&self) -> String {
        if self.inputs.team_name.is_empty() {
            "Total Costs".to_string()
        } else {
            format!("{} Costs", self.inputs.team_name)
        }
    }

    /// Label/amount pairs in display order.
    pub fn lines(&self) -> Vec<(String, String)> {
        vec![
            ("Ice Time".to_string(), format_currency(self.results.ice_time_cost)),
            ("Coach".to_string(), format_currency(self.inputs.coach_cost_total)),
            (
                format!("Jerseys ({})", self.inputs.number_of_players),
                format_currency(self.results.jerseys_cost),
            ),
            (
                "Transaction Fees".to_string(),
                format_currency(self.results.transaction_fee),
            ),
            ("Total".to_string(), format_currency(self.results.total_cost)),
            (
                "Cost per Player".to_string(),
                format_currency(self.results.cost_per_player),
            ),
        ]
    }
}

impl fmt::Display for Breakdown<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        for (label, amount) in self.lines() {
            writeln!(
                f,
                "{:<lw$}{:>vw$}",
                format!("{label}:"),
                amount,
                lw = LABEL_WIDTH,
                vw = VALUE_WIDTH,
            )?;
        }
        Ok(())
    }
}
