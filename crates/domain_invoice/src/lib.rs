//! Invoice Domain - Form State and Submission Dispatch
//!
//! This crate implements the invoice form controller: it owns the transient
//! invoice record for a form session, derives the invoice total from the
//! four monetary inputs, and dispatches submission to the correct external
//! action depending on the session mode.
//!
//! # Modes
//!
//! A form session is either:
//! - **Create**: a fresh draft plus the billing counterparties fetched from
//!   the remote API. Submission persists the record through
//!   [`ports::InvoicePort::create_invoice`] and the interaction ends.
//! - **Pay**: a persisted record resolved from a short code, read-only,
//!   carrying the payee wallet the lookup returned. Submission fires a
//!   single native-asset transfer of the computed total through
//!   [`ports::WalletPort::transfer`].
//!
//! The mode is a tagged variant, so paying without a resolved payee wallet
//! is unrepresentable.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_invoice::{InvoiceForm, FieldPatch};
//!
//! let mut form = InvoiceForm::create(api, wallet, connected).await;
//! form.apply(FieldPatch::Quantity(2))?;
//! form.apply(FieldPatch::UnitPrice(dec!(100)))?;
//! let submission = form.submit().await?;
//! ```

pub mod invoice;
pub mod totals;
pub mod form;
pub mod ports;
pub mod error;

pub use invoice::{Invoice, Counterparty};
pub use totals::{TotalBreakdown, breakdown, invoice_total};
pub use form::{InvoiceForm, FormMode, FieldPatch, Submission};
pub use ports::{InvoicePort, WalletPort, ResolvedInvoice, CreateInvoiceRequest};
pub use error::InvoiceError;
