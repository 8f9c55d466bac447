//! Money types with precise decimal arithmetic
//!
//! Settlement arithmetic is carried out on exact decimals; amounts are only
//! rounded to the currency's minor unit when a caller asks for it, so that
//! intermediate steps never compound rounding error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary amount with associated currency
///
/// The amount is kept exactly as computed. Use [`Money::round_to_currency`]
/// at presentation boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Rounds to the currency's standard decimal places (banker's rounding)
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: self.amount.round_dp(self.currency.decimal_places()),
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{:.dp$} {}",
            self.amount.round_dp(dp),
            self.currency.code(),
            dp = dp as usize
        )
    }
}

/// A percentage rate (tax rate, depreciation rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.21 for 21%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.21 for 21%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Returns true when the rate lies within 0% and 100% inclusive
    pub fn is_fraction(&self) -> bool {
        self.value >= Decimal::ZERO && self.value <= Decimal::ONE
    }

    /// Applies this rate to a plain amount
    pub fn apply(&self, amount: Decimal) -> Decimal {
        amount * self.value
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(2).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_keeps_full_precision() {
        let m = Money::new(dec!(100.123456), Currency::EUR);
        assert_eq!(m.amount(), dec!(100.123456));
        assert_eq!(m.round_to_currency().amount(), dec!(100.12));
    }

    #[test]
    fn test_negative_amount() {
        assert!(Money::new(dec!(-0.01), Currency::EUR).is_negative());
        assert!(!Money::new(dec!(0), Currency::EUR).is_negative());
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::new(dec!(0.21));
        assert_eq!(rate.apply(dec!(1400)), dec!(294));
        assert_eq!(rate.to_string(), "21%");
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(dec!(1694), Currency::EUR);
        assert_eq!(m.to_string(), "1694.00 EUR");
    }
}
