//! Amount type for handling monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal`. Amounts are written to JSON as
//! plain numbers carrying every stored digit, but they are read leniently: numeric strings,
//! `null` and booleans are accepted, and anything that cannot be understood as a number is
//! coerced to zero.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use tracing::trace;

/// Currency symbols accepted in front of an amount.
const SYMBOLS: [char; 5] = ['₹', '$', '€', '£', '¥'];

/// Represents a monetary amount.
///
/// Equality and ordering are numeric, so `12.5` and `12.50` are equal.
///
/// # Examples
///
/// ```
/// # use pennywise::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("1,250.50").unwrap();
/// let b = Amount::from_str("₹1250.5").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "1250.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is below zero. Negative zero is not negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Interprets a loosely-typed JSON value as an amount. Anything that is not numeric becomes
    /// zero.
    pub(crate) fn coerce(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Amount::ZERO,
            Value::Bool(b) => Amount(if *b { Decimal::ONE } else { Decimal::ZERO }),
            Value::Number(n) => parse_decimal(&n.to_string())
                .or_else(|| n.as_f64().and_then(Decimal::from_f64))
                .map(Amount)
                .unwrap_or_default(),
            Value::String(s) => Amount::from_str(s).unwrap_or_else(|_| {
                trace!("Coercing non-numeric amount '{s}' to zero");
                Amount::ZERO
            }),
            Value::Array(_) | Value::Object(_) => Amount::ZERO,
        }
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(String);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid amount", self.0)
    }
}

impl Error for AmountError {}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses an amount, ignoring surrounding whitespace, a leading currency symbol, and thousands
    /// separators. An empty string is zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        let without_symbol = match unsigned.strip_prefix(SYMBOLS) {
            Some(rest) => rest.trim_start(),
            None => unsigned,
        };
        let without_commas = without_symbol.replace(',', "");

        let value = parse_decimal(&without_commas).ok_or_else(|| AmountError(s.to_string()))?;
        Ok(Amount(if negative { -value } else { value }))
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

impl Display for Amount {
    /// Plain rendering with two fraction digits, e.g. `1250.50`. Use `CurrencyFormat` for display
    /// to users.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let number =
            serde_json::Number::from_str(&self.0.to_string()).map_err(S::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Amount::coerce(&value))
    }
}

impl Add for Amount {
    type Output = Amount;

    /// Saturates at the largest representable value instead of overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("50.25").unwrap();
        assert_eq!(amount.value(), dec("50.25"));
    }

    #[test]
    fn test_parse_with_symbol_and_commas() {
        let amount = Amount::from_str("₹1,23,456.50").unwrap();
        assert_eq!(amount.value(), dec("123456.50"));

        let amount = Amount::from_str("$1,000").unwrap();
        assert_eq!(amount.value(), dec("1000"));
    }

    #[test]
    fn test_parse_negative() {
        let amount = Amount::from_str("-₹12.00").unwrap();
        assert!(amount.is_negative());
        assert_eq!(amount.value(), dec("-12"));
    }

    #[test]
    fn test_parse_empty_and_whitespace() {
        assert_eq!(Amount::from_str("").unwrap(), Amount::ZERO);
        assert_eq!(Amount::from_str("  7.5 ").unwrap().value(), dec("7.5"));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Amount::from_str("lunch").is_err());
        assert!(Amount::from_str("12abc").is_err());
        assert!(Amount::from_str("abc12").is_err());
        assert!(Amount::from_str("Rs 12").is_err());
    }

    #[test]
    fn test_zero_is_not_negative() {
        assert!(!Amount::ZERO.is_negative());
        assert!(!Amount::new(-Decimal::ZERO).is_negative());
    }

    #[test]
    fn test_numeric_equality() {
        assert_eq!(Amount::new(dec("12.5")), Amount::new(dec("12.50")));
        assert!(Amount::new(dec("30")) < Amount::new(dec("50")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(dec("5")).to_string(), "5.00");
        assert_eq!(Amount::new(dec("1234.5")).to_string(), "1234.50");
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&Amount::new(dec("120.75"))).unwrap();
        assert_eq!(json, "120.75");
        let json = serde_json::to_string(&Amount::new(dec("80"))).unwrap();
        assert_eq!(json, "80");
        let json = serde_json::to_string(&Amount::new(dec("12345678901234567.89"))).unwrap();
        assert_eq!(json, "12345678901234567.89");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let a: Amount = serde_json::from_str("99.99").unwrap();
        assert_eq!(a.value(), dec("99.99"));
        let a: Amount = serde_json::from_str("\"42.10\"").unwrap();
        assert_eq!(a.value(), dec("42.10"));
        let a: Amount = serde_json::from_str("120").unwrap();
        assert_eq!(a.value(), dec("120"));
    }

    #[test]
    fn test_coerce_non_numeric_to_zero() {
        assert_eq!(Amount::coerce(&json!(null)), Amount::ZERO);
        assert_eq!(Amount::coerce(&json!("abc")), Amount::ZERO);
        assert_eq!(Amount::coerce(&json!("abc12")), Amount::ZERO);
        assert_eq!(Amount::coerce(&json!("e5")), Amount::ZERO);
        assert_eq!(Amount::coerce(&json!({"v": 1})), Amount::ZERO);
        assert_eq!(Amount::coerce(&json!([1, 2])), Amount::ZERO);
        assert_eq!(Amount::coerce(&json!(true)).value(), Decimal::ONE);
    }

    #[test]
    fn test_sum() {
        let amounts = [
            Amount::new(dec("10.10")),
            Amount::new(dec("0.20")),
            Amount::new(dec("5")),
        ];
        let total: Amount = amounts.iter().sum();
        assert_eq!(total.value(), dec("15.30"));
    }

    #[test]
    fn test_add_saturates() {
        let big = Amount::new(dec("50000000000000000000000000000"));
        assert_eq!((big + big).value(), Decimal::MAX);
        let total: Amount = [big, big, big].iter().sum();
        assert_eq!(total.value(), Decimal::MAX);
    }

    #[test]
    fn test_deserialize_keeps_every_digit() {
        let a: Amount = serde_json::from_str("12345678901234567.89").unwrap();
        assert_eq!(a.value(), dec("12345678901234567.89"));
    }
}
