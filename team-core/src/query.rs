//! URL query-string round trip for [`CostInputs`].
//!
//! A scenario is shared as a link whose query string carries all eight
//! fields as `key=value` pairs (form-urlencoded), keyed by
//! [`InputField::query_key`]:
//!
//! ```text
//! ?teamName=Ice+Hawks&costPerHour=200&hours=10&coachCost=500&jerseyCost=50
//!  &transactionFeePercent=3&transactionFeeFixed=0.99&numberOfPlayers=12
//! ```
//!
//! Parameters present in a link override whatever was loaded before them;
//! absent parameters leave the current value alone.

use tracing::debug;
use url::Url;
use url::form_urlencoded;

use crate::{CostInputs, InputField};

/// Encodes every field of `inputs` as a query string (without the `?`).
pub fn encode_query(inputs: &CostInputs) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for field in InputField::ALL {
        serializer.append_pair(field.query_key(), &inputs.field_text(field));
    }
    serializer.finish()
}

/// Applies the recognised parameters of `query` onto `inputs`.
///
/// A leading `?` is ignored. When a key repeats, the first occurrence wins.
/// Unknown keys are skipped. Numeric values are parsed leniently, so a
/// garbled number becomes zero. Returns the fields that were applied, in
/// the order they appeared.
pub fn apply_query(
    inputs: &mut CostInputs,
    query: &str,
) -> Vec<InputField> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut applied = Vec::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let Some(field) = InputField::ALL
            .into_iter()
            .find(|f| f.query_key() == key)
        else {
            debug!(%key, "ignoring unknown query parameter");
            continue;
        };
        if applied.contains(&field) {
            continue;
        }
        inputs.apply_text(field, &value);
        applied.push(field);
    }

    applied
}

/// Applies the query string of `url`, if it has one.
pub fn apply_url(
    inputs: &mut CostInputs,
    url: &Url,
) -> Vec<InputField> {
    url.query()
        .map(|query| apply_query(inputs, query))
        .unwrap_or_default()
}

/// Returns `base` with its query replaced by the encoding of `inputs`.
///
/// Any fragment on `base` is dropped, matching a freshly built share link.
pub fn share_url(
    base: &Url,
    inputs: &CostInputs,
) -> Url {
    let mut url = base.clone();
    url.set_fragment(None);
    url.set_query(Some(&encode_query(inputs)));
    url
}

/// Returns `base` without any query or fragment.
pub fn strip_query(base: &Url) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn base() -> Url {
        Url::parse("https://example.org/calc/").unwrap()
    }

    #[test]
    fn encode_query_lists_every_field_in_order() {
        let mut inputs = CostInputs::default();
        inputs.team_name = "Ice Hawks".to_string();

        let query = encode_query(&inputs);

        assert_eq!(
            query,
            "teamName=Ice+Hawks&costPerHour=200&hours=10&coachCost=500&jerseyCost=50\
             &transactionFeePercent=3&transactionFeeFixed=0.99&numberOfPlayers=12"
        );
    }

    #[test]
    fn encode_query_escapes_reserved_characters() {
        let mut inputs = CostInputs::default();
        inputs.team_name = "A&B=C".to_string();

        let query = encode_query(&inputs);

        assert!(query.starts_with("teamName=A%26B%3DC&"));
    }

    #[test]
    fn apply_query_round_trips_encoded_inputs() {
        let mut original = CostInputs::default();
        original.team_name = "Zamboni Drivers".to_string();
        original.hours = dec!(12.5);
        original.number_of_players = 15;

        let mut decoded = CostInputs {
            team_name: String::new(),
            cost_per_hour_of_ice: dec!(0),
            hours: dec!(0),
            coach_cost_total: dec!(0),
            cost_per_jersey: dec!(0),
            transaction_fee_percent: dec!(0),
            transaction_fee_fixed_amount: dec!(0),
            number_of_players: 0,
        };
        let applied = apply_query(&mut decoded, &encode_query(&original));

        assert_eq!(applied, InputField::ALL.to_vec());
        assert_eq!(decoded, original);
    }

    #[test]
    fn apply_query_only_overrides_present_keys() {
        let mut inputs = CostInputs::default();

        let applied = apply_query(&mut inputs, "?hours=20&numberOfPlayers=18");

        assert_eq!(applied, vec![InputField::Hours, InputField::NumberOfPlayers]);
        assert_eq!(inputs.hours, dec!(20));
        assert_eq!(inputs.number_of_players, 18);
        assert_eq!(inputs.cost_per_hour_of_ice, dec!(200));
    }

    #[test]
    fn apply_query_first_occurrence_wins() {
        let mut inputs = CostInputs::default();

        apply_query(&mut inputs, "coachCost=100&coachCost=900");

        assert_eq!(inputs.coach_cost_total, dec!(100));
    }

    #[test]
    fn apply_query_skips_unknown_keys() {
        let mut inputs = CostInputs::default();

        let applied = apply_query(&mut inputs, "utm_source=mail&jerseyCost=65");

        assert_eq!(applied, vec![InputField::JerseyCost]);
        assert_eq!(inputs.cost_per_jersey, dec!(65));
    }

    #[test]
    fn apply_query_defaults_garbled_numbers_to_zero() {
        let mut inputs = CostInputs::default();

        apply_query(&mut inputs, "costPerHour=NaN");

        assert_eq!(inputs.cost_per_hour_of_ice, dec!(0));
    }

    #[test]
    fn apply_url_without_query_changes_nothing() {
        let mut inputs = CostInputs::default();

        let applied = apply_url(&mut inputs, &base());

        assert!(applied.is_empty());
        assert_eq!(inputs, CostInputs::default());
    }

    #[test]
    fn share_url_replaces_existing_query() {
        let stale = Url::parse("https://example.org/calc/?hours=1#results").unwrap();

        let url = share_url(&stale, &CostInputs::default());

        assert_eq!(url.path(), "/calc/");
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), Some(encode_query(&CostInputs::default()).as_str()));
    }

    #[test]
    fn strip_query_leaves_bare_path() {
        let url = strip_query(&share_url(&base(), &CostInputs::default()));

        assert_eq!(url.as_str(), "https://example.org/calc/");
    }
}
