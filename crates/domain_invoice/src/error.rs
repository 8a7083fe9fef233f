//! Invoice domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{MoneyError, PortError};

/// Errors that can occur in the invoice domain
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// The form is in pay mode, where the record is read-only
    #[error("Invoice record is read-only while paying")]
    ReadOnly,

    /// Due date ordering violated
    #[error("Due date {due} is earlier than issue date {issue}")]
    DueBeforeIssue { issue: NaiveDate, due: NaiveDate },

    /// A monetary field was rejected
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The create-invoice request failed validation
    #[error("Invalid invoice: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A port call failed
    #[error(transparent)]
    Port(#[from] PortError),
}
