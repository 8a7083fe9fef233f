//! Gateway Infrastructure - REST adapter to the remote invoicing API
//!
//! This crate provides the production implementation of
//! [`domain_invoice::InvoicePort`]: a reqwest-backed client for the remote
//! API that owns invoice persistence and the address book. It translates
//! between the API's wire format and the domain types, maps HTTP failures
//! into the [`core_kernel::PortError`] taxonomy, retries transient failures
//! with exponential backoff, and trips a circuit breaker when the remote
//! system keeps failing.
//!
//! # Endpoints
//!
//! - `GET  {base}/api/address-book` - billing counterparties
//! - `GET  {base}/api/create-shorten-url?code=<code>` - short-code lookup
//! - `POST {base}/api/invoice` - invoice persistence
//!
//! # Configuration
//!
//! The base URL and resilience knobs come from the environment
//! (`INVOICE_BASE_URL`, `INVOICE_TIMEOUT_SECS`, ...); see [`GatewayConfig`].

pub mod config;
pub mod dto;
pub mod rest;

pub use crate::config::GatewayConfig;
pub use crate::rest::RestInvoiceGateway;
