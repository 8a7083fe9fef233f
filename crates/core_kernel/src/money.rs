//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//! Amounts are kept at full precision internally; rounding to the currency's
//! decimal places happens explicitly via [`Money::round_to_currency`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub, Mul, Neg};
use std::str::FromStr;
use thiserror::Error;

/// Currencies an invoice can be denominated in
///
/// The set matches what the invoicing front-end offers: fiat USD plus the
/// two chain assets the payment flow supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eth,
    Matic,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::Usd => 2,
            Currency::Eth | Currency::Matic => 18,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eth => "Ξ",
            Currency::Matic => "MATIC",
        }
    }

    /// Returns the currency code as used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eth => "ETH",
            Currency::Matic => "MATIC",
        }
    }

    /// Returns true if this currency is a chain-native asset
    pub fn is_chain_asset(&self) -> bool {
        matches!(self, Currency::Eth | Currency::Matic)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "ETH" => Ok(Currency::Eth),
            "MATIC" | "POLYGON" => Ok(Currency::Matic),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Negative amount not allowed: {0}")]
    NegativeAmount(Decimal),

    #[error("Rate out of range: {0}% (must be between 0 and 100)")]
    RateOutOfRange(Decimal),
}

/// A monetary amount with associated currency
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

    /// Creates a non-negative Money value, rejecting negative amounts
    pub fn non_negative(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::NegativeAmount(amount));
        }
        Ok(Self::new(amount, currency))
    }

    /// Creates Money from an integer amount in minor units (cents, wei)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        let divisor = Decimal::new(10_i64.pow(currency.decimal_places()), 0);
        Self::new(Decimal::new(minor_units, 0) / divisor, currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Rounds to the currency's standard decimal places
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: self.amount.round_dp(self.currency.decimal_places()),
            currency: self.currency,
        }
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Multiplies by a scalar (quantity, rate factor)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Chain assets get capped display precision; full precision stays
        // available through amount().
        let dp = self.currency.decimal_places().min(8);
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

/// A percentage rate (discount, tax)
///
/// Invoice rates live in the 0-100% domain; [`Rate::try_from_percent`]
/// enforces that at the boundary where user input arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.05 for 5%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.05 for 5%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// A zero rate
    pub fn zero() -> Self {
        Self { value: dec!(0) }
    }

    /// Creates a rate from a percentage (e.g., 5.0 for 5%)
    pub fn from_percent(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Creates a rate from a percentage, rejecting values outside 0-100
    pub fn try_from_percent(percentage: Decimal) -> Result<Self, MoneyError> {
        if percentage < dec!(0) || percentage > dec!(100) {
            return Err(MoneyError::RateOutOfRange(percentage));
        }
        Ok(Self::from_percent(percentage))
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percent(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a money amount
    pub fn apply(&self, money: &Money) -> Money {
        money.multiply(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent().round_dp(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(100.50), Currency::Usd);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::Usd);
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(10050, Currency::Usd);
        assert_eq!(m.amount(), dec!(100.50));

        let wei = Money::from_minor(1_000_000_000_000_000_000, Currency::Eth);
        assert_eq!(wei.amount(), dec!(1));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00), Currency::Matic);
        let b = Money::new(dec!(50.00), Currency::Matic);

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Money::new(dec!(100.00), Currency::Usd);
        let eth = Money::new(dec!(100.00), Currency::Eth);

        let result = usd.checked_add(&eth);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_non_negative_rejects() {
        let result = Money::non_negative(dec!(-1), Currency::Usd);
        assert!(matches!(result, Err(MoneyError::NegativeAmount(_))));

        assert!(Money::non_negative(dec!(0), Currency::Usd).is_ok());
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("matic".parse::<Currency>().unwrap(), Currency::Matic);
        // The front-end historically sent the chain name for its default
        assert_eq!("polygon".parse::<Currency>().unwrap(), Currency::Matic);
        assert!("DOGE".parse::<Currency>().is_err());
    }

    #[test]
    fn test_rate_bounds() {
        assert!(Rate::try_from_percent(dec!(0)).is_ok());
        assert!(Rate::try_from_percent(dec!(100)).is_ok());
        assert!(matches!(
            Rate::try_from_percent(dec!(100.01)),
            Err(MoneyError::RateOutOfRange(_))
        ));
        assert!(matches!(
            Rate::try_from_percent(dec!(-5)),
            Err(MoneyError::RateOutOfRange(_))
        ));
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::from_percent(dec!(5.0));
        let amount = Money::new(dec!(1000.00), Currency::Usd);

        let charge = rate.apply(&amount);
        assert_eq!(charge.amount(), dec!(50.00));
    }

    #[test]
    fn test_round_to_currency() {
        let m = Money::new(dec!(189.005), Currency::Usd).round_to_currency();
        // Banker's rounding is rust_decimal's round_dp default
        assert_eq!(m.amount(), dec!(189.00));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rate_roundtrips_percentage(pct in 0u32..=100u32) {
            let rate = Rate::try_from_percent(Decimal::from(pct)).unwrap();
            prop_assert_eq!(rate.as_percent(), Decimal::from(pct));
        }

        #[test]
        fn money_add_sub_roundtrip(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_minor(a, Currency::Usd);
            let mb = Money::from_minor(b, Currency::Usd);

            prop_assert_eq!((ma + mb) - mb, ma);
        }
    }
}
