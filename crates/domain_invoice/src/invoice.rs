//! Invoice records and billing counterparties

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, InvoiceId, Money, Rate, WalletAddress};

use crate::totals::{self, TotalBreakdown};

/// An invoice, transient for the lifetime of a form session
///
/// The total is never stored here: it is a pure function of quantity, unit
/// price, discount, and tax, recomputed through [`Invoice::total`] whenever
/// one of them changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Identifier assigned once the record has been persisted
    pub id: Option<InvoiceId>,
    /// Human-readable invoice name ("Invoice #1")
    pub name: String,
    /// Billing counterparty reference chosen from the address book
    pub bill_to: String,
    /// Payer reference
    pub from: String,
    /// Currency the invoice is denominated in
    pub currency: Currency,
    /// Payer wallet address, stamped from the connected wallet at submission
    pub wallet: Option<WalletAddress>,
    /// Line item description
    pub item: String,
    /// Quantity of the line item
    pub quantity: u32,
    /// Unit price, non-negative, in the invoice currency
    pub unit_price: Decimal,
    /// Discount percentage applied to the gross amount
    pub discount: Rate,
    /// Tax percentage applied after the discount
    pub tax: Rate,
    /// Free-text note
    pub note: String,
    /// Issue date
    pub issue_date: NaiveDate,
    /// Due date, never earlier than the issue date
    pub due_date: NaiveDate,
}

impl Invoice {
    /// Creates a fresh draft with empty fields and today's dates
    pub fn draft() -> Self {
        let today = Utc::now().date_naive();

        Self {
            id: None,
            name: String::new(),
            bill_to: String::new(),
            from: String::new(),
            // The payment flow targets Polygon, so its native asset is the
            // default denomination.
            currency: Currency::Matic,
            wallet: None,
            item: String::new(),
            quantity: 0,
            unit_price: Decimal::ZERO,
            discount: Rate::zero(),
            tax: Rate::zero(),
            note: String::new(),
            issue_date: today,
            due_date: today,
        }
    }

    /// Returns the unit price as typed money in the invoice currency
    pub fn unit_price_money(&self) -> Money {
        Money::new(self.unit_price, self.currency)
    }

    /// Computes the invoice total from the current monetary fields
    pub fn total(&self) -> Money {
        self.total_breakdown().total
    }

    /// Computes the full gross/discount/tax breakdown
    pub fn total_breakdown(&self) -> TotalBreakdown {
        totals::breakdown(
            self.quantity,
            self.unit_price_money(),
            self.discount,
            self.tax,
        )
    }
}

/// A billing counterparty from the remote address book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    /// Remote identifier of the address-book entry
    pub id: String,
    /// Display name of the client
    pub name: String,
    /// The counterparty's wallet, when the address book carries one
    pub wallet: Option<WalletAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_draft_is_empty_and_dated_today() {
        let draft = Invoice::draft();
        assert!(draft.id.is_none());
        assert!(draft.name.is_empty());
        assert_eq!(draft.quantity, 0);
        assert_eq!(draft.unit_price, Decimal::ZERO);
        assert_eq!(draft.issue_date, draft.due_date);
        assert_eq!(draft.currency, Currency::Matic);
    }

    #[test]
    fn test_total_is_recomputed_from_fields() {
        let mut invoice = Invoice::draft();
        invoice.currency = Currency::Usd;
        invoice.quantity = 2;
        invoice.unit_price = dec!(100);
        invoice.discount = Rate::from_percent(dec!(10));
        invoice.tax = Rate::from_percent(dec!(5));

        assert_eq!(invoice.total().amount(), dec!(189.00));

        invoice.quantity = 0;
        assert!(invoice.total().is_zero());
    }
}
