//! Invoice total computation
//!
//! The total is a pure function of four inputs:
//!
//! ```text
//! total = (quantity × unit_price) × (1 − discount/100) × (1 + tax/100)
//! ```
//!
//! computed stepwise (gross, then the discount, then tax on the discounted
//! amount) and rounded to the currency's decimal places at the end. Zero
//! quantity or a zero price yields a zero total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate};

/// The stepwise result of a total computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalBreakdown {
    /// quantity × unit price
    pub gross: Money,
    /// Discount deducted from the gross amount
    pub discount: Money,
    /// Gross after the discount
    pub discounted: Money,
    /// Tax charged on the discounted amount
    pub tax: Money,
    /// Discounted amount plus tax, rounded to the currency
    pub total: Money,
}

/// Computes the gross/discount/tax breakdown for a line
pub fn breakdown(quantity: u32, unit_price: Money, discount: Rate, tax: Rate) -> TotalBreakdown {
    let gross = unit_price.multiply(Decimal::from(quantity));
    let discount_amount = discount.apply(&gross);
    let discounted = gross - discount_amount;
    let tax_amount = tax.apply(&discounted);
    let total = (discounted + tax_amount).round_to_currency();

    TotalBreakdown {
        gross,
        discount: discount_amount,
        discounted,
        tax: tax_amount,
        total,
    }
}

/// Computes just the invoice total
pub fn invoice_total(quantity: u32, unit_price: Money, discount: Rate, tax: Rate) -> Money {
    breakdown(quantity, unit_price, discount, tax).total
}
