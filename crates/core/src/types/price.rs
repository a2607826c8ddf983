//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are held as exact decimals. Sums and line totals are computed
//! without intermediate rounding; rounding to cents happens once, when a
//! price is formatted for display.
//!
//! The operators saturate at the largest representable amount instead of
//! panicking. Use [`Price::checked_add`] and [`Price::checked_mul`] where an
//! unrepresentable result must be rejected.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price in the store's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The exact, unrounded amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Sum of two prices, or `None` if it cannot be represented.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Price times a quantity, or `None` if it cannot be represented.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// The amount rounded half away from zero to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Formats as `$6.50`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.rounded())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self::Output {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
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
    use std::str::FromStr;

    use super::*;

    fn price(s: &str) -> Price {
        Price::new(Decimal::from_str(s).unwrap()).unwrap()
    }

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(price("6.5").to_string(), "$6.50");
        assert_eq!(price("7").to_string(), "$7.00");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(price("0.125").to_string(), "$0.13");
        assert_eq!(price("0.124").to_string(), "$0.12");
    }

    #[test]
    fn test_negative_rejected() {
        let err = Price::new(Decimal::from_str("-0.01").unwrap()).unwrap_err();
        assert!(matches!(err, PriceError::Negative(_)));
    }

    #[test]
    fn test_sum_does_not_drift() {
        // 0.1 summed ten times is exactly 1 in decimal arithmetic.
        let total: Price = std::iter::repeat_n(price("0.1"), 10).sum();
        assert_eq!(total.amount(), Decimal::ONE);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(price("6.50") * 2, price("13"));
        assert_eq!(Price::from_cents(450) * 3, price("13.50"));
    }

    #[test]
    fn test_overflow_saturates() {
        let huge = price("50000000000000000000000000000");
        assert_eq!((huge * 2).amount(), Decimal::MAX);
        assert_eq!((huge + huge).amount(), Decimal::MAX);
        let total: Price = [huge, huge, huge].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
    }

    #[test]
    fn test_checked_arithmetic() {
        let huge = price("50000000000000000000000000000");
        assert_eq!(huge.checked_mul(2), None);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(huge.checked_mul(1), Some(huge));
        assert_eq!(price("6.50").checked_mul(2), Some(price("13")));
        assert_eq!(price("6.50").checked_add(price("7")), Some(price("13.50")));
    }

    #[test]
    fn test_deserialize_accepts_numbers_and_strings() {
        let from_number: Price = serde_json::from_str("6.5").unwrap();
        let from_string: Price = serde_json::from_str("\"6.50\"").unwrap();
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_str::<Price>("-1").is_err());
    }
}
