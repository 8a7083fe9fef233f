//! The invoice form controller
//!
//! [`InvoiceForm`] owns the transient invoice state for one form session and
//! dispatches submission to the correct external action for its mode. Its
//! collaborators (the remote API port, the wallet port, and the connected
//! wallet address) are injected at construction; the controller reads no
//! ambient session state.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use validator::Validate;

use core_kernel::{Currency, Money, Rate, ShortCode, TokenAddress, TransferId, WalletAddress};

use crate::error::InvoiceError;
use crate::invoice::{Counterparty, Invoice};
use crate::ports::{CreateInvoiceRequest, InvoicePort, WalletPort};

/// The mode a form session is in
///
/// The variant carries what the mode needs: creating needs the connected
/// payer wallet and the counterparty list, paying needs the resolved payee.
/// Paying without a payee wallet is therefore unrepresentable.
#[derive(Debug, Clone)]
pub enum FormMode {
    /// Drafting a new invoice
    Create {
        /// Counterparties fetched from the remote address book; empty when
        /// the fetch failed or returned nothing
        address_book: Vec<Counterparty>,
        /// The connected wallet that will be stamped as payer
        connected: WalletAddress,
    },
    /// Paying a previously created invoice; the record is read-only
    Pay {
        /// Wallet the transfer must be sent to
        payee: WalletAddress,
    },
}

/// A single-field edit to the invoice draft
///
/// Monetary patches are checked at this boundary: negative prices and
/// percentages outside 0-100 are rejected, as are date pairs where the due
/// date would precede the issue date.
#[derive(Debug, Clone)]
pub enum FieldPatch {
    Name(String),
    BillTo(String),
    From(String),
    Currency(Currency),
    Item(String),
    Quantity(u32),
    UnitPrice(Decimal),
    DiscountPercent(Decimal),
    TaxPercent(Decimal),
    Note(String),
    IssueDate(NaiveDate),
    DueDate(NaiveDate),
}

/// The outcome of a successful submission
///
/// The variants prove the mode discipline: creating yields a persisted
/// record and never a transfer, paying yields a transfer and never a write.
#[derive(Debug, Clone)]
pub enum Submission {
    /// Create mode: the invoice was persisted through the remote API
    Created {
        /// The stored record, as returned by the API
        invoice: Invoice,
    },
    /// Pay mode: a native-asset transfer of the total was initiated
    TransferInitiated {
        /// Identifier of the submitted transfer
        transfer_id: TransferId,
        /// Amount that was sent
        amount: Money,
        /// Recipient wallet
        payee: WalletAddress,
    },
}

/// Form controller for creating and paying invoices
pub struct InvoiceForm {
    invoice: Invoice,
    mode: FormMode,
    api: Arc<dyn InvoicePort>,
    wallet: Arc<dyn WalletPort>,
}

impl InvoiceForm {
    /// Opens a form in create mode with a fresh draft
    ///
    /// Fetches the billing counterparties from the remote API. A failed
    /// fetch degrades to an empty list and is logged; it does not block
    /// form usage.
    pub async fn create(
        api: Arc<dyn InvoicePort>,
        wallet: Arc<dyn WalletPort>,
        connected: WalletAddress,
    ) -> Self {
        let address_book = match api.address_book().await {
            Ok(entries) => {
                info!(count = entries.len(), "address book loaded");
                entries
            }
            Err(err) => {
                warn!(%err, "address book fetch failed, starting with an empty counterparty list");
                Vec::new()
            }
        };

        Self {
            invoice: Invoice::draft(),
            mode: FormMode::Create {
                address_book,
                connected,
            },
            api,
            wallet,
        }
    }

    /// Opens a form in pay mode by resolving a short code
    ///
    /// The resolved record is read-only; submission pays it. Resolution
    /// failure is logged and surfaced, since a pay session without a
    /// resolved payee wallet cannot exist.
    pub async fn from_short_code(
        api: Arc<dyn InvoicePort>,
        wallet: Arc<dyn WalletPort>,
        code: &ShortCode,
    ) -> Result<Self, InvoiceError> {
        let resolved = match api.resolve_short_code(code).await {
            Ok(resolved) => resolved,
            Err(err) => {
                error!(%code, %err, "failed to resolve invoice short code");
                return Err(err.into());
            }
        };

        info!(%code, name = %resolved.invoice.name, "invoice loaded for payment");

        Ok(Self {
            invoice: resolved.invoice,
            mode: FormMode::Pay {
                payee: resolved.payee,
            },
            api,
            wallet,
        })
    }

    /// Returns the current mode
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Returns the current invoice state
    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    /// Returns the counterparties available for billing selection
    ///
    /// Empty in pay mode and when the address-book fetch degraded.
    pub fn counterparties(&self) -> &[Counterparty] {
        match &self.mode {
            FormMode::Create { address_book, .. } => address_book,
            FormMode::Pay { .. } => &[],
        }
    }

    /// Computes the invoice total from the current fields
    ///
    /// Recomputed on every call; the total is never cached.
    pub fn total(&self) -> Money {
        self.invoice.total()
    }

    /// Applies a single-field edit to the draft
    ///
    /// Rejected entirely in pay mode, where the record is read-only.
    pub fn apply(&mut self, patch: FieldPatch) -> Result<(), InvoiceError> {
        if matches!(self.mode, FormMode::Pay { .. }) {
            return Err(InvoiceError::ReadOnly);
        }

        match patch {
            FieldPatch::Name(name) => self.invoice.name = name,
            FieldPatch::BillTo(bill_to) => self.invoice.bill_to = bill_to,
            FieldPatch::From(from) => self.invoice.from = from,
            FieldPatch::Currency(currency) => self.invoice.currency = currency,
            FieldPatch::Item(item) => self.invoice.item = item,
            FieldPatch::Quantity(quantity) => self.invoice.quantity = quantity,
            FieldPatch::UnitPrice(price) => {
                Money::non_negative(price, self.invoice.currency)?;
                self.invoice.unit_price = price;
            }
            FieldPatch::DiscountPercent(pct) => {
                self.invoice.discount = Rate::try_from_percent(pct)?;
            }
            FieldPatch::TaxPercent(pct) => {
                self.invoice.tax = Rate::try_from_percent(pct)?;
            }
            FieldPatch::Note(note) => self.invoice.note = note,
            FieldPatch::IssueDate(date) => {
                if date > self.invoice.due_date {
                    return Err(InvoiceError::DueBeforeIssue {
                        issue: date,
                        due: self.invoice.due_date,
                    });
                }
                self.invoice.issue_date = date;
            }
            FieldPatch::DueDate(date) => {
                if date < self.invoice.issue_date {
                    return Err(InvoiceError::DueBeforeIssue {
                        issue: self.invoice.issue_date,
                        due: date,
                    });
                }
                self.invoice.due_date = date;
            }
        }

        Ok(())
    }

    /// Submits the form session
    ///
    /// Create mode recomputes the total, stamps the payer wallet and
    /// counterparty references from the current selections, and persists
    /// the record through the remote API. Pay mode initiates a single
    /// native-asset transfer of the computed total to the resolved payee,
    /// fire-and-forget, with no confirmation or status polling.
    ///
    /// Failures are logged and returned; the form state is left unchanged,
    /// so the caller may retry or abandon the session.
    pub async fn submit(&self) -> Result<Submission, InvoiceError> {
        match &self.mode {
            FormMode::Create { connected, .. } => {
                let breakdown = self.invoice.total_breakdown();

                let request = CreateInvoiceRequest {
                    name: self.invoice.name.clone(),
                    bill_to: self.invoice.bill_to.clone(),
                    from: self.invoice.from.clone(),
                    currency: self.invoice.currency,
                    wallet: connected.clone(),
                    item: self.invoice.item.clone(),
                    quantity: self.invoice.quantity,
                    unit_price: self.invoice.unit_price_money(),
                    discount: self.invoice.discount,
                    tax: self.invoice.tax,
                    total: breakdown.total,
                    note: self.invoice.note.clone(),
                    issue_date: self.invoice.issue_date,
                    due_date: self.invoice.due_date,
                };
                request.validate()?;

                match self.api.create_invoice(request).await {
                    Ok(invoice) => {
                        info!(id = ?invoice.id, total = %breakdown.total, "invoice created");
                        Ok(Submission::Created { invoice })
                    }
                    Err(err) => {
                        error!(%err, "invoice creation failed");
                        Err(err.into())
                    }
                }
            }
            FormMode::Pay { payee } => {
                let amount = self.invoice.total();

                match self
                    .wallet
                    .transfer(payee, amount, TokenAddress::NATIVE)
                    .await
                {
                    Ok(transfer_id) => {
                        info!(%transfer_id, %payee, %amount, "transfer initiated");
                        Ok(Submission::TransferInitiated {
                            transfer_id,
                            amount,
                            payee: payee.clone(),
                        })
                    }
                    Err(err) => {
                        error!(%payee, %err, "wallet transfer failed");
                        Err(err.into())
                    }
                }
            }
        }
    }
}
