//! Text-to-number conversion at the input boundary.
//!
//! Numeric edits arrive as raw text. Parsing never fails outward: anything
//! that cannot be read as a number becomes zero, and the fallback is logged.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// The leading numeric token of some input: a plain decimal mantissa and
/// an optional exponent.
#[derive(Debug, PartialEq, Eq)]
struct NumberToken<'a> {
    mantissa: &'a str,
    exponent: Option<&'a str>,
    /// Bytes of input covered by the token.
    len: usize,
}

/// Scans the longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
///
/// An `e` not followed by at least one digit is left out of the token.
/// Returns `None` when the mantissa holds no digit.
fn leading_number(s: &str) -> Option<NumberToken<'_>> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let mut seen_digit = false;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    let mantissa = s[..end].trim_end_matches('.');

    let mut exponent = None;
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            exponent = Some(&s[end + 1..exp_end]);
            end = exp_end;
        }
    }

    Some(NumberToken {
        mantissa,
        exponent,
        len: end,
    })
}

/// Converts a scanned token to a [`Decimal`].
///
/// A negative exponent past the precision of [`Decimal`] rounds to zero.
/// Anything else out of range is `None`.
fn token_value(token: &NumberToken<'_>) -> Option<Decimal> {
    let Some(exponent) = token.exponent else {
        return Decimal::from_str(token.mantissa).ok();
    };
    let scientific = format!("{}e{}", token.mantissa, exponent);
    match Decimal::from_scientific(&scientific) {
        Ok(value) => Some(value),
        Err(_) if exponent.starts_with('-') => Some(Decimal::ZERO),
        Err(_) => None,
    }
}

/// Parses user text into a [`Decimal`] without ever failing.
///
/// Accepts comma thousands separators (`"1,234.56"`), scientific notation
/// (`"1e3"`), and a leading number followed by junk (`"12abc"` reads as 12,
/// `"1_000"` as 1). Empty input, text with no leading number, and a
/// number too large for [`Decimal`] yield 0.
pub fn parse_lenient(raw: &str) -> Decimal {
    let normalized = normalize_decimal_input(raw);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }

    let Some(token) = leading_number(&normalized) else {
        warn!(input = %raw, "invalid numeric input, using 0");
        return Decimal::ZERO;
    };
    let Some(value) = token_value(&token) else {
        warn!(input = %raw, "numeric input out of range, using 0");
        return Decimal::ZERO;
    };

    if token.len < normalized.len() {
        warn!(input = %raw, %value, "ignoring trailing characters in numeric input");
    }
    value
}
