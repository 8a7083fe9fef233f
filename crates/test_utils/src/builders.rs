//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Rate};
use domain_invoice::Invoice;

/// Builder for constructing invoice test data
pub struct InvoiceBuilder {
    invoice: Invoice,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    /// Creates a builder seeded with a plausible filled-in invoice
    pub fn new() -> Self {
        let mut invoice = Invoice::draft();
        invoice.name = "Invoice #1".to_string();
        invoice.bill_to = "64f0c2a7".to_string();
        invoice.from = "From Info".to_string();
        invoice.currency = Currency::Usd;
        invoice.item = "Consulting".to_string();
        invoice.quantity = 1;
        invoice.unit_price = dec!(100);

        Self { invoice }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.invoice.name = name.into();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.invoice.currency = currency;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.invoice.quantity = quantity;
        self
    }

    pub fn with_unit_price(mut self, price: Decimal) -> Self {
        self.invoice.unit_price = price;
        self
    }

    pub fn with_discount_percent(mut self, pct: Decimal) -> Self {
        self.invoice.discount = Rate::from_percent(pct);
        self
    }

    pub fn with_tax_percent(mut self, pct: Decimal) -> Self {
        self.invoice.tax = Rate::from_percent(pct);
        self
    }

    pub fn with_dates(mut self, issue: NaiveDate, due: NaiveDate) -> Self {
        self.invoice.issue_date = issue;
        self.invoice.due_date = due;
        self
    }

    pub fn build(self) -> Invoice {
        self.invoice
    }
}
