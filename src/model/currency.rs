//! Deterministic rendering of amounts for display.

use crate::model::Amount;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How digits to the left of the decimal point are grouped.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// Groups of three, then groups of two: `12,34,567.00`.
    #[default]
    Indian,
    /// Groups of three: `1,234,567.00`.
    Western,
}

serde_plain::derive_display_from_serialize!(Grouping);
serde_plain::derive_fromstr_from_deserialize!(Grouping);

/// Renders amounts as currency strings with two fraction digits.
///
/// The default renders Indian rupees with Indian digit grouping.
///
/// ```
/// # use pennywise::model::{Amount, CurrencyFormat};
/// # use std::str::FromStr;
/// let f = CurrencyFormat::default();
/// assert_eq!(f.format(Amount::from_str("123456.5").unwrap()), "₹1,23,456.50");
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CurrencyFormat {
    symbol: String,
    grouping: Grouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            grouping: Grouping::Indian,
        }
    }
}

pub(crate) const DEFAULT_SYMBOL: &str = "₹";

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, grouping: Grouping) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    pub fn format(&self, amount: Amount) -> String {
        let rounded = amount
            .value()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = match self.grouping {
            Grouping::Western => western(rounded.abs()),
            Grouping::Indian => indian(rounded.abs()),
        };
        format!("{sign}{}{digits}", self.symbol)
    }
}

fn western(value: Decimal) -> String {
    grouped(value, 3)
}

fn indian(value: Decimal) -> String {
    grouped(value, 2)
}

/// Renders `value` with two fraction digits. The last three integer digits form one group and
/// the digits before them are split into groups of `width`.
fn grouped(value: Decimal, width: usize) -> String {
    let plain = format!("{value:.2}");
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    if int_part.len() <= 3 {
        return format!("{int_part}.{frac_part}");
    }
    let (head, last_three) = int_part.split_at(int_part.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > width {
        let (left, group) = rest.split_at(rest.len() - width);
        groups.push(group);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{last_three}.{frac_part}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_indian_grouping() {
        let f = CurrencyFormat::default();
        assert_eq!(f.format(amount("0")), "₹0.00");
        assert_eq!(f.format(amount("999")), "₹999.00");
        assert_eq!(f.format(amount("1000")), "₹1,000.00");
        assert_eq!(f.format(amount("100000")), "₹1,00,000.00");
        assert_eq!(f.format(amount("12345678.9")), "₹1,23,45,678.90");
    }

    #[test]
    fn test_western_grouping() {
        let f = CurrencyFormat::new("$", Grouping::Western);
        assert_eq!(f.format(amount("0")), "$0.00");
        assert_eq!(f.format(amount("1234567.891")), "$1,234,567.89");
        assert_eq!(f.format(amount("1000")), "$1,000.00");
        assert_eq!(f.format(amount("100000")), "$100,000.00");
    }

    #[test]
    fn test_large_amounts_keep_every_digit() {
        let big = amount("12345678901234567.89");
        let western = CurrencyFormat::new("$", Grouping::Western);
        assert_eq!(western.format(big), "$12,345,678,901,234,567.89");
        let indian = CurrencyFormat::default();
        assert_eq!(indian.format(big), "₹12,34,56,78,90,12,34,567.89");
    }

    #[test]
    fn test_rounds_to_two_digits() {
        let f = CurrencyFormat::default();
        assert_eq!(f.format(amount("10.005")), "₹10.01");
        assert_eq!(f.format(amount("10.004")), "₹10.00");
    }

    #[test]
    fn test_negative() {
        let f = CurrencyFormat::default();
        assert_eq!(f.format(amount("-1500")), "-₹1,500.00");
        assert_eq!(f.format(amount("-0.001")), "₹0.00");
    }

    #[test]
    fn test_deterministic() {
        let f = CurrencyFormat::default();
        let a = amount("4321.10");
        assert_eq!(f.format(a), f.format(a));
    }

    #[test]
    fn test_grouping_from_str() {
        assert_eq!(Grouping::from_str("western").unwrap(), Grouping::Western);
        assert_eq!(Grouping::Indian.to_string(), "indian");
    }
}
