//! Property-based test data generators

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};

/// A percentage in the valid 0-100 rate domain
pub fn percent() -> impl Strategy<Value = Decimal> {
    (0u32..=100u32).prop_map(Decimal::from)
}

/// A line-item quantity
pub fn quantity() -> impl Strategy<Value = u32> {
    0u32..10_000
}

/// A non-negative USD price
pub fn usd_price() -> impl Strategy<Value = Money> {
    (0i64..100_000_000).prop_map(|cents| Money::from_minor(cents, Currency::Usd))
}

/// One of the supported invoice currencies
pub fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::Usd),
        Just(Currency::Eth),
        Just(Currency::Matic),
    ]
}
