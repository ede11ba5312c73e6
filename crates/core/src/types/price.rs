//! Type-safe price representation using decimal arithmetic.
//!
//! Monetary amounts are `rust_decimal::Decimal` values in the currency's
//! standard unit (dollars, not cents). Wire payloads from the store API carry
//! plain JSON numbers; [`Price::from_f64`] is the boundary conversion and
//! rounds to two decimal places.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced by price arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Tried to combine prices in different currencies.
    #[error("currency mismatch: {0:?} vs {1:?}")]
    CurrencyMismatch(Currency, Currency),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency.
    pub currency: Currency,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// A zero price in the given currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Convert a JSON number into a price, rounding to two decimal places.
    ///
    /// Uses the shortest-representation conversion, not the bit-exact one:
    /// a wire value of `10.005` must become `10.00`, not pick up the binary
    /// float artifact (`10.005000000000000781...`) and round up to `10.01`.
    ///
    /// Returns `None` for values that cannot be represented (NaN, infinity).
    #[must_use]
    pub fn from_f64(value: f64, currency: Currency) -> Option<Self> {
        <Decimal as FromPrimitive>::from_f64(value).map(|amount| Self {
            amount: amount.round_dp(2),
            currency,
        })
    }

    /// Multiply by a quantity (e.g., line item subtotal).
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency: self.currency,
        }
    }

    /// Add two prices.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::CurrencyMismatch` if the currencies differ.
    pub fn checked_add(&self, other: Self) -> Result<Self, PriceError> {
        if self.currency != other.currency {
            return Err(PriceError::CurrencyMismatch(self.currency, other.currency));
        }
        Ok(Self {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// True when the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:.2}", self.currency.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl Currency {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 alphabetic code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_rounds_to_cents() {
        let price = Price::from_f64(10.005, Currency::USD).unwrap();
        assert_eq!(price.amount, Decimal::new(1000, 2));

        let price = Price::from_f64(19.99, Currency::USD).unwrap();
        assert_eq!(price.amount, Decimal::new(1999, 2));
    }

    #[test]
    fn test_from_f64_uses_shortest_representation() {
        // The bit-exact value of the f64 literal 10.005 is slightly above
        // 10.005; the conversion must not inflate the price by a cent.
        let price = Price::from_f64(10.005, Currency::USD).unwrap();
        assert_eq!(price.amount, Decimal::new(1000, 2));

        let price = Price::from_f64(0.1, Currency::USD).unwrap();
        assert_eq!(price.amount, Decimal::new(10, 2));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Price::from_f64(f64::NAN, Currency::USD).is_none());
        assert!(Price::from_f64(f64::INFINITY, Currency::USD).is_none());
    }

    #[test]
    fn test_times() {
        let unit = Price::from_f64(10.0, Currency::USD).unwrap();
        assert_eq!(unit.times(5).amount, Decimal::new(50, 0));
    }

    #[test]
    fn test_checked_add_same_currency() {
        let a = Price::from_f64(10.50, Currency::USD).unwrap();
        let b = Price::from_f64(4.25, Currency::USD).unwrap();
        let sum = a.checked_add(b).unwrap();
        assert_eq!(sum.amount, Decimal::new(1475, 2));
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let usd = Price::zero(Currency::USD);
        let eur = Price::zero(Currency::EUR);
        assert_eq!(
            usd.checked_add(eur),
            Err(PriceError::CurrencyMismatch(Currency::USD, Currency::EUR))
        );
    }

    #[test]
    fn test_display() {
        let price = Price::from_f64(19.99, Currency::USD).unwrap();
        assert_eq!(price.to_string(), "$19.99");

        let price = Price::from_f64(5.0, Currency::GBP).unwrap();
        assert_eq!(price.to_string(), "£5.00");
    }

    #[test]
    fn test_zero() {
        let zero = Price::zero(Currency::USD);
        assert!(zero.is_zero());
        assert_eq!(zero.to_string(), "$0.00");
    }
}
