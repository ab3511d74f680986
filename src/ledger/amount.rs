//! Monetary amounts backed by `Decimal`.
//!
//! Amounts are stored on disk as plain JSON numbers so documents written by
//! earlier versions (which stored floats) load without conversion, but all
//! arithmetic happens in base-10 so that cent-level budget thresholds compare
//! exactly.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use thiserror::Error;

/// A decimal money value. Sign is not restricted here; ledger records enforce positivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Converts a float through its shortest decimal representation, so `0.1` stays `0.1`.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        Self::from_str(&value.to_string())
    }

    /// Returns `self - other`, floored at zero.
    pub fn saturating_sub(self, other: Amount) -> Amount {
        (self - other).max(Amount::ZERO)
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Digits after the decimal point, ignoring trailing zeros.
    pub fn decimal_places(&self) -> u32 {
        self.0.normalize().scale()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("`{0}` is not a number")]
    NotNumeric(String),
    #[error("amount must be a finite number")]
    NotFinite,
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);
        let digits = unsigned.replace(',', "");
        let normalized = if negative {
            format!("-{digits}")
        } else {
            digits
        };

        Decimal::from_str(&normalized)
            .or_else(|_| Decimal::from_scientific(&normalized))
            .map(Amount)
            .map_err(|_| AmountError::NotNumeric(trimmed.to_string()))
    }
}

impl Amount {
    /// Formats with two decimals and the given currency symbol, sign first.
    pub fn format_with(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{symbol}{:.2}", self.0.abs())
        } else {
            format!("{symbol}{:.2}", self.0)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

// Arithmetic saturates at the `Decimal` bounds; totals over hand-edited
// documents must not panic.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.fract().is_zero() {
            if let Some(whole) = self.0.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Amount::from_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }
}

/// Loosely-typed amount as supplied by callers (forms, parsers, scripts).
///
/// Conversion to an [`Amount`] is deferred to validation so that a bad value is
/// reported as a rejected operation rather than a type error at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Value(Amount),
    Float(f64),
    Text(String),
}

impl AmountInput {
    pub fn resolve(&self) -> Result<Amount, AmountError> {
        match self {
            AmountInput::Value(amount) => Ok(*amount),
            AmountInput::Float(value) => Amount::from_f64(*value),
            AmountInput::Text(text) => Amount::from_str(text),
        }
    }
}

impl From<Amount> for AmountInput {
    fn from(value: Amount) -> Self {
        AmountInput::Value(value)
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        AmountInput::Value(Amount(value))
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Float(value)
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        AmountInput::Value(Amount(Decimal::from(value)))
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

impl From<&String> for AmountInput {
    fn from(value: &String) -> Self {
        AmountInput::Text(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn parses_plain_and_dollar_formats() {
        assert_eq!(amount("50"), amount("50.00"));
        assert_eq!(amount("$1,234.50").value(), Decimal::from_str("1234.5").unwrap());
        assert_eq!(amount("-$20").value(), Decimal::from(-20));
        assert_eq!(amount("1e2").value(), Decimal::from(100));
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert_eq!(Amount::from_str("   "), Err(AmountError::Empty));
        assert!(matches!(
            Amount::from_str("twelve"),
            Err(AmountError::NotNumeric(_))
        ));
        assert_eq!(Amount::from_f64(f64::NAN), Err(AmountError::NotFinite));
    }

    #[test]
    fn float_conversion_keeps_cents_exact() {
        let total: Amount = [0.1, 0.2].iter().map(|v| Amount::from_f64(*v).unwrap()).sum();
        assert_eq!(total, amount("0.3"));
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(amount("12.5").to_string(), "$12.50");
        assert_eq!(amount("-50").to_string(), "-$50.00");
    }

    #[test]
    fn serializes_as_json_number() {
        assert_eq!(serde_json::to_string(&amount("150")).unwrap(), "150");
        assert_eq!(serde_json::to_string(&amount("19.99")).unwrap(), "19.99");
        let parsed: Amount = serde_json::from_str("19.99").unwrap();
        assert_eq!(parsed, amount("19.99"));
        let from_text: Amount = serde_json::from_str("\"42.10\"").unwrap();
        assert_eq!(from_text, amount("42.1"));
    }

    #[test]
    fn arithmetic_saturates_instead_of_overflowing() {
        let max = Amount::new(Decimal::MAX);
        assert_eq!(max + amount("1"), max);
        assert_eq!([max, max].iter().sum::<Amount>(), max);
        assert_eq!(Amount::new(Decimal::MIN) - amount("1"), Amount::new(Decimal::MIN));
    }

    #[test]
    fn decimal_places_ignores_trailing_zeros() {
        assert_eq!(amount("12.500").decimal_places(), 1);
        assert_eq!(amount("1e2").decimal_places(), 0);
        assert_eq!(amount("0.001").decimal_places(), 3);
    }

    #[test]
    fn saturating_sub_never_goes_negative() {
        assert_eq!(amount("150").saturating_sub(amount("200")), Amount::ZERO);
        assert_eq!(amount("150").saturating_sub(amount("100")), amount("50"));
    }
}
