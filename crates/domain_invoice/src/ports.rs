//! Invoice Domain Ports
//!
//! Port interfaces for the two external collaborators the form controller
//! depends on: the remote invoicing API (address book, short-code lookup,
//! invoice persistence) and the connected wallet (token transfer).
//!
//! Adapters implement these traits: a REST adapter over the remote API in
//! `infra_gateway`, mock adapters in `test_utils`. The wallet itself is an
//! external SDK concern, so only its port lives here; the embedding
//! application supplies the implementation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_invoice::{InvoiceForm, ports::{InvoicePort, WalletPort}};
//! use std::sync::Arc;
//!
//! let api: Arc<dyn InvoicePort> = Arc::new(RestInvoiceGateway::new(config)?);
//! let wallet: Arc<dyn WalletPort> = Arc::new(connected_wallet);
//! let form = InvoiceForm::create(api, wallet, connected_address).await;
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{
    Currency, DomainPort, Money, PortError, Rate, ShortCode, TokenAddress, TransferId,
    WalletAddress,
};

use crate::invoice::{Counterparty, Invoice};

/// A persisted invoice together with the payee wallet its short code
/// resolves to
#[derive(Debug, Clone)]
pub struct ResolvedInvoice {
    /// The stored invoice record
    pub invoice: Invoice,
    /// Wallet address the payment must be sent to
    pub payee: WalletAddress,
}

/// Request for persisting a new invoice
///
/// Built by the form controller at submission time, with the payer wallet
/// and counterparty references stamped from the current selections.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    /// Invoice name
    #[validate(length(min = 1, message = "invoice name must not be empty"))]
    pub name: String,
    /// Billing counterparty reference
    #[validate(length(min = 1, message = "a billing counterparty must be selected"))]
    pub bill_to: String,
    /// Payer reference
    pub from: String,
    /// Invoice currency
    pub currency: Currency,
    /// Connected payer wallet
    pub wallet: WalletAddress,
    /// Line item description
    pub item: String,
    /// Quantity
    pub quantity: u32,
    /// Unit price in the invoice currency
    pub unit_price: Money,
    /// Discount percentage
    pub discount: Rate,
    /// Tax percentage
    pub tax: Rate,
    /// Derived total, recomputed immediately before submission
    pub total: Money,
    /// Free-text note
    pub note: String,
    /// Issue date
    pub issue_date: NaiveDate,
    /// Due date
    pub due_date: NaiveDate,
}

/// Port to the remote invoicing API
#[async_trait]
pub trait InvoicePort: DomainPort {
    /// Fetches the known billing counterparties
    async fn address_book(&self) -> Result<Vec<Counterparty>, PortError>;

    /// Resolves a short code to a persisted invoice and its payee wallet
    async fn resolve_short_code(&self, code: &ShortCode) -> Result<ResolvedInvoice, PortError>;

    /// Persists a new invoice and returns the stored record
    async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<Invoice, PortError>;
}

/// Port to the connected wallet's transfer capability
#[async_trait]
pub trait WalletPort: DomainPort {
    /// Initiates a token transfer from the connected wallet
    ///
    /// Passing [`TokenAddress::NATIVE`] denominates the transfer in the
    /// chain's native asset. The returned id identifies the submitted
    /// transfer; no confirmation is awaited.
    async fn transfer(
        &self,
        to: &WalletAddress,
        amount: Money,
        token: TokenAddress,
    ) -> Result<TransferId, PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn request() -> CreateInvoiceRequest {
        let today = Utc::now().date_naive();
        CreateInvoiceRequest {
            name: "Invoice #1".to_string(),
            bill_to: "64f0c2".to_string(),
            from: "From Info".to_string(),
            currency: Currency::Usd,
            wallet: WalletAddress::parse("0x00a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3").unwrap(),
            item: "Design work".to_string(),
            quantity: 2,
            unit_price: Money::new(dec!(100), Currency::Usd),
            discount: Rate::from_percent(dec!(10)),
            tax: Rate::from_percent(dec!(5)),
            total: Money::new(dec!(189), Currency::Usd),
            note: String::new(),
            issue_date: today,
            due_date: today,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let mut req = request();
        req.name.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_counterparty_fails_validation() {
        let mut req = request();
        req.bill_to.clear();
        assert!(req.validate().is_err());
    }
}
