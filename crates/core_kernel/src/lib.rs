//! Core Kernel - Foundational types for the invoicing system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Wallet address and token address value objects
//! - Common identifiers and value objects
//! - Ports and adapters infrastructure

pub mod money;
pub mod wallet;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, Rate, MoneyError};
pub use wallet::{WalletAddress, TokenAddress, ShortCode, AddressError};
pub use identifiers::{InvoiceId, ClientId, TransferId};
pub use ports::{
    PortError, DomainPort, CircuitBreakerConfig,
    AdapterHealth, HealthCheckResult, HealthCheckable,
};
