//! Mock port implementations
//!
//! Scripted, call-recording implementations of the domain ports. Tests
//! assert against the recorded calls to prove mode discipline (create mode
//! never transfers, pay mode never persists).

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use core_kernel::{
    DomainPort, InvoiceId, Money, PortError, ShortCode, TokenAddress, TransferId, WalletAddress,
};
use domain_invoice::{
    Counterparty, CreateInvoiceRequest, Invoice, InvoicePort, ResolvedInvoice, WalletPort,
};

/// Mock of the remote invoicing API
#[derive(Default)]
pub struct MockInvoicePort {
    address_book: Vec<Counterparty>,
    fail_address_book: AtomicBool,
    fail_create: AtomicBool,
    resolved: HashMap<String, ResolvedInvoice>,
    created: Mutex<Vec<CreateInvoiceRequest>>,
}

impl MockInvoicePort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the address-book response
    pub fn with_address_book(mut self, entries: Vec<Counterparty>) -> Self {
        self.address_book = entries;
        self
    }

    /// Makes address-book fetches fail with a connection error
    pub fn failing_address_book(self) -> Self {
        self.fail_address_book.store(true, Ordering::Relaxed);
        self
    }

    /// Scripts the resolution result for a short code
    pub fn with_resolved(mut self, code: &str, resolved: ResolvedInvoice) -> Self {
        self.resolved.insert(code.to_string(), resolved);
        self
    }

    /// Makes create-invoice calls fail with a service-unavailable error
    pub fn failing_create(self) -> Self {
        self.fail_create.store(true, Ordering::Relaxed);
        self
    }

    /// Returns the create-invoice requests received so far
    pub fn created_requests(&self) -> Vec<CreateInvoiceRequest> {
        self.created.lock().unwrap().clone()
    }

    /// Returns how many create-invoice calls were received
    pub fn create_call_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

impl DomainPort for MockInvoicePort {}

#[async_trait]
impl InvoicePort for MockInvoicePort {
    async fn address_book(&self) -> Result<Vec<Counterparty>, PortError> {
        if self.fail_address_book.load(Ordering::Relaxed) {
            return Err(PortError::connection("mock address-book failure"));
        }
        Ok(self.address_book.clone())
    }

    async fn resolve_short_code(&self, code: &ShortCode) -> Result<ResolvedInvoice, PortError> {
        self.resolved
            .get(code.as_str())
            .cloned()
            .ok_or_else(|| PortError::not_found("Invoice", code))
    }

    async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<Invoice, PortError> {
        if self.fail_create.load(Ordering::Relaxed) {
            return Err(PortError::ServiceUnavailable {
                service: "mock invoice api".to_string(),
            });
        }

        let invoice = Invoice {
            id: Some(InvoiceId::new()),
            name: request.name.clone(),
            bill_to: request.bill_to.clone(),
            from: request.from.clone(),
            currency: request.currency,
            wallet: Some(request.wallet.clone()),
            item: request.item.clone(),
            quantity: request.quantity,
            unit_price: request.unit_price.amount(),
            discount: request.discount,
            tax: request.tax,
            note: request.note.clone(),
            issue_date: request.issue_date,
            due_date: request.due_date,
        };

        self.created.lock().unwrap().push(request);
        Ok(invoice)
    }
}

/// A transfer recorded by [`MockWallet`]
#[derive(Debug, Clone)]
pub struct RecordedTransfer {
    pub to: WalletAddress,
    pub amount: Money,
    pub token: TokenAddress,
}

/// Mock of the connected wallet
#[derive(Default)]
pub struct MockWallet {
    transfers: Mutex<Vec<RecordedTransfer>>,
    fail: AtomicBool,
}

impl MockWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes transfers fail
    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::Relaxed);
        self
    }

    /// Returns the transfers initiated so far
    pub fn transfers(&self) -> Vec<RecordedTransfer> {
        self.transfers.lock().unwrap().clone()
    }

    /// Returns how many transfers were initiated
    pub fn transfer_count(&self) -> usize {
        self.transfers.lock().unwrap().len()
    }
}

impl DomainPort for MockWallet {}

#[async_trait]
impl WalletPort for MockWallet {
    async fn transfer(
        &self,
        to: &WalletAddress,
        amount: Money,
        token: TokenAddress,
    ) -> Result<TransferId, PortError> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(PortError::internal("mock wallet failure"));
        }

        self.transfers.lock().unwrap().push(RecordedTransfer {
            to: to.clone(),
            amount,
            token,
        });
        Ok(TransferId::new())
    }
}
