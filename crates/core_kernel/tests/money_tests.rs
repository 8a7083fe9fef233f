//! Unit tests for the Money module
//!
//! Tests cover money creation, arithmetic operations, rounding,
//! currency handling, and rate bounds.

use core_kernel::{Money, Currency, MoneyError, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(100.50), Currency::Usd);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::Usd);
    }

    #[test]
    fn test_new_keeps_full_precision() {
        let m = Money::new(dec!(0.000000000000000001), Currency::Eth);
        assert_eq!(m.amount(), dec!(0.000000000000000001));
    }

    #[test]
    fn test_from_minor_converts_cents() {
        let m = Money::from_minor(10050, Currency::Usd);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_from_minor_converts_wei() {
        let m = Money::from_minor(500_000_000_000_000_000, Currency::Matic);
        assert_eq!(m.amount(), dec!(0.5));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::Eth);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::Eth);
    }

    #[test]
    fn test_non_negative_rejects_negative() {
        assert!(matches!(
            Money::non_negative(dec!(-0.01), Currency::Usd),
            Err(MoneyError::NegativeAmount(_))
        ));
        assert!(Money::non_negative(dec!(0), Currency::Usd).is_ok());
        assert!(Money::non_negative(dec!(10), Currency::Usd).is_ok());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_addition_same_currency() {
        let a = Money::new(dec!(100.00), Currency::Usd);
        let b = Money::new(dec!(89.00), Currency::Usd);
        assert_eq!((a + b).amount(), dec!(189.00));
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let usd = Money::new(dec!(1), Currency::Usd);
        let matic = Money::new(dec!(1), Currency::Matic);
        assert!(matches!(
            usd.checked_add(&matic),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn test_multiply_by_quantity() {
        let price = Money::new(dec!(100), Currency::Usd);
        assert_eq!(price.multiply(Decimal::from(2u32)).amount(), dec!(200));
    }

    #[test]
    fn test_round_to_currency_places() {
        let usd = Money::new(dec!(1.005), Currency::Usd).round_to_currency();
        assert_eq!(usd.amount(), dec!(1.00));

        // 18 decimal places survive rounding for chain assets
        let eth = Money::new(dec!(0.000000000000000001), Currency::Eth).round_to_currency();
        assert_eq!(eth.amount(), dec!(0.000000000000000001));
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_rate_from_percent() {
        let rate = Rate::from_percent(dec!(10));
        assert_eq!(rate.as_decimal(), dec!(0.10));
        assert_eq!(rate.as_percent(), dec!(10));
    }

    #[test]
    fn test_rate_bounds_enforced() {
        assert!(Rate::try_from_percent(dec!(0)).is_ok());
        assert!(Rate::try_from_percent(dec!(100)).is_ok());
        assert!(Rate::try_from_percent(dec!(101)).is_err());
        assert!(Rate::try_from_percent(dec!(-1)).is_err());
    }

    #[test]
    fn test_rate_applies_to_money() {
        let rate = Rate::from_percent(dec!(5));
        let base = Money::new(dec!(180), Currency::Usd);
        assert_eq!(rate.apply(&base).amount(), dec!(9.00));
    }
}

mod currencies {
    use super::*;

    #[test]
    fn test_decimal_places() {
        assert_eq!(Currency::Usd.decimal_places(), 2);
        assert_eq!(Currency::Eth.decimal_places(), 18);
        assert_eq!(Currency::Matic.decimal_places(), 18);
    }

    #[test]
    fn test_chain_asset_predicate() {
        assert!(!Currency::Usd.is_chain_asset());
        assert!(Currency::Eth.is_chain_asset());
        assert!(Currency::Matic.is_chain_asset());
    }

    #[test]
    fn test_serde_codes_are_uppercase() {
        let json = serde_json::to_string(&Currency::Matic).unwrap();
        assert_eq!(json, "\"MATIC\"");
        let back: Currency = serde_json::from_str("\"ETH\"").unwrap();
        assert_eq!(back, Currency::Eth);
    }
}
