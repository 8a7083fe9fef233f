//! Pre-built test data for common entities

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, InvoiceId, Money, Rate, WalletAddress};
use domain_invoice::{Counterparty, Invoice, ResolvedInvoice};

/// Money values used across tests
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn usd_price() -> Money {
        Money::new(dec!(100.00), Currency::Usd)
    }
}

/// Wallet addresses used across tests
pub struct AddressFixtures;

impl AddressFixtures {
    /// The connected payer wallet
    pub fn payer() -> WalletAddress {
        WalletAddress::parse("0x1111111111111111111111111111111111111111").unwrap()
    }

    /// The payee wallet a short code resolves to
    pub fn payee() -> WalletAddress {
        WalletAddress::parse("0x2222222222222222222222222222222222222222").unwrap()
    }

    /// A counterparty wallet from the address book
    pub fn client_wallet() -> WalletAddress {
        WalletAddress::parse("0x3333333333333333333333333333333333333333").unwrap()
    }
}

/// Invoice data used across tests
pub struct InvoiceFixtures;

impl InvoiceFixtures {
    /// A filled-in, persisted invoice as the remote API would return it
    pub fn stored() -> Invoice {
        Invoice {
            id: Some(InvoiceId::new()),
            name: "Invoice #42".to_string(),
            bill_to: "64f0c2a7".to_string(),
            from: "From Info".to_string(),
            currency: Currency::Usd,
            wallet: Some(AddressFixtures::payer()),
            item: "Design work".to_string(),
            quantity: 2,
            unit_price: dec!(100),
            discount: Rate::from_percent(dec!(10)),
            tax: Rate::from_percent(dec!(5)),
            note: "net 30".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        }
    }

    /// A stored invoice together with the payee its short code resolves to
    pub fn resolved() -> ResolvedInvoice {
        ResolvedInvoice {
            invoice: Self::stored(),
            payee: AddressFixtures::payee(),
        }
    }

    /// A small address book
    pub fn counterparties() -> Vec<Counterparty> {
        vec![
            Counterparty {
                id: "64f0c2a7".to_string(),
                name: "Acme Studio".to_string(),
                wallet: Some(AddressFixtures::client_wallet()),
            },
            Counterparty {
                id: "64f0c2b9".to_string(),
                name: "North Labs".to_string(),
                wallet: None,
            },
        ]
    }
}
