//! Type-safe price representation using decimal arithmetic.
//!
//! Prices arrive from the API either as JSON numbers (`9.99`) or strings
//! (`"9.99"`); both deserialize into an exact [`Decimal`], so cart totals
//! never accumulate floating-point error.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("invalid price '{0}'")]
    Invalid(String),
    /// Prices cannot be negative.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative amount in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse a user-supplied price such as `"19.99"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid(s.to_string()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format without the currency symbol, rounded to cents (e.g. `"25.50"`).
    #[must_use]
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_deserializes_from_number_and_string() {
        let from_number: Price = serde_json::from_str("9.99").unwrap();
        let from_string: Price = serde_json::from_str("\"9.99\"").unwrap();
        assert_eq!(from_number, Price::from_cents(999));
        assert_eq!(from_string, Price::from_cents(999));
    }

    #[test]
    fn test_price_deserializes_from_integer() {
        let price: Price = serde_json::from_str("10").unwrap();
        assert_eq!(price, Price::from_cents(1000));
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(2550).to_string(), "$25.50");
        assert_eq!(Price::from_cents(1000).display_amount(), "10.00");
    }

    #[test]
    fn test_price_times_and_sum() {
        let total: Price = [Price::from_cents(1000).times(2), Price::from_cents(550)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(2550));
    }

    #[test]
    fn test_price_parse() {
        assert_eq!(Price::parse(" 19.99 ").unwrap(), Price::from_cents(1999));
        assert_eq!(Price::parse("abc"), Err(PriceError::Invalid("abc".to_string())));
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
    }
}
