//! Unit tests for the Money and Rate types
//!
//! Tests cover exact amounts, presentation rounding, currency codes and
//! rate application.

use core_kernel::{Money, Currency, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_keeps_amount_unrounded() {
        let m = Money::new(dec!(355.740000001), Currency::EUR);
        assert_eq!(m.amount(), dec!(355.740000001));
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_zero_is_not_negative() {
        let m = Money::new(Decimal::ZERO, Currency::GBP);
        assert!(!m.is_negative());
        assert!(Money::new(dec!(-0.01), Currency::GBP).is_negative());
    }

    #[test]
    fn test_default_currency_is_euro() {
        assert_eq!(Currency::default(), Currency::EUR);
        assert_eq!(Currency::default().code(), "EUR");
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_to_currency_uses_two_places() {
        let m = Money::new(dec!(1694.004), Currency::EUR);
        assert_eq!(m.round_to_currency().amount(), dec!(1694.00));
    }

    #[test]
    fn test_round_to_currency_midpoint_goes_to_even() {
        assert_eq!(Money::new(dec!(0.125), Currency::EUR).round_to_currency().amount(), dec!(0.12));
        assert_eq!(Money::new(dec!(0.135), Currency::EUR).round_to_currency().amount(), dec!(0.14));
    }

    #[test]
    fn test_display_formats_two_places() {
        let m = Money::new(dec!(294), Currency::EUR);
        assert_eq!(m.to_string(), "294.00 EUR");
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_rate_application() {
        let rate = Rate::new(dec!(0.20));
        assert_eq!(rate.as_percentage(), dec!(20));
        assert_eq!(rate.apply(dec!(500)), dec!(100));
    }

    #[test]
    fn test_rate_is_fraction_bounds() {
        assert!(Rate::new(Decimal::ZERO).is_fraction());
        assert!(Rate::new(Decimal::ONE).is_fraction());
        assert!(!Rate::new(dec!(1.5)).is_fraction());
        assert!(!Rate::new(dec!(-0.1)).is_fraction());
    }

    #[test]
    fn test_rate_deserializes_from_number_and_string() {
        let from_number: Rate = serde_json::from_str("0.21").unwrap();
        let from_string: Rate = serde_json::from_str("\"0.21\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.to_string(), "21%");
    }
}
