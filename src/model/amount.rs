//! Amount type for monetary values in Brazilian real display notation.
//!
//! This module provides the `Amount` type, which wraps `Decimal` and converts
//! to and from the `R$ 1.234,56` notation used in the spreadsheet: dot as
//! thousands separator, comma as decimal separator, always two fractional
//! digits.

use crate::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

/// The display prefix for amounts written to the sheet.
pub const CURRENCY_PREFIX: &str = "R$ ";

/// Represents an amount of money in reais.
///
/// Parsing accepts the display string with or without the `R$ ` prefix (the
/// store contains both); formatting always includes it. For any value with at
/// most two fractional digits, `format` followed by `parse` returns the same
/// value.
///
/// # Examples
///
/// ```
/// # use fin_sync::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("R$ 1.234,56").unwrap();
/// assert_eq!(amount.to_string(), "R$ 1.234,56");
/// assert_eq!(amount, Amount::from_str("1.234,56").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new `Amount` from a `Decimal` value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates an `Amount` from an integer count of centavos.
    pub fn from_minor_units(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Returns the underlying `Decimal` value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// The numeric body without the currency prefix, e.g. `1.234,56`.
    fn body(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        let text = rounded.abs().to_string();
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (ix, ch) in int_part.chars().enumerate() {
            if ix > 0 && (int_part.len() - ix) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}{grouped},{frac_part}")
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Parses the `R$ 1.234,56` notation back into an exact decimal. Dots are
    /// always thousands separators and the comma is always the decimal
    /// separator; more than one comma, or a non-numeric body, is an error.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix("R$")
            .map(str::trim_start)
            .unwrap_or(trimmed);

        if body.is_empty() || body.matches(',').count() > 1 {
            return Err(Error::Format(s.to_string()));
        }

        let swapped: String = body
            .chars()
            .filter(|c| *c != '.')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        let value = Decimal::from_str(&swapped).map_err(|_| Error::Format(s.to_string()))?;
        Ok(Amount(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_PREFIX}{}", self.body())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
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

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        Amount::new(iter.map(|a| a.0).sum())
    }
}
