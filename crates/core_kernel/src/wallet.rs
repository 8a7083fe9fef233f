//! Wallet and token address value objects
//!
//! Addresses follow the EVM convention: `0x` followed by 40 hex digits.
//! They are normalized to lowercase on construction so equality does not
//! depend on checksum casing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The sentinel address wallet SDKs use to denote the chain's native asset
/// instead of a token contract.
const NATIVE_SENTINEL: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// Errors that can occur parsing addresses and short codes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("Empty short code")]
    EmptyShortCode,
}

/// A blockchain wallet address identifying a payer or payee
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parses and normalizes an EVM address
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| AddressError::InvalidAddress(s.to_string()))?;

        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressError::InvalidAddress(s.to_string()));
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// Returns the normalized address string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identifies the asset a transfer is denominated in
///
/// Either a token contract address, or the native-asset sentinel the wallet
/// layer understands (see [`TokenAddress::NATIVE`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAddress(String);

impl TokenAddress {
    /// The chain's native asset, selected via the conventional sentinel
    /// address rather than a token contract address.
    pub const NATIVE: TokenAddress = TokenAddress(String::new());

    /// Creates a token address from a contract address
    pub fn contract(address: WalletAddress) -> Self {
        Self(address.0)
    }

    /// Returns true if this address denotes the chain's native asset
    pub fn is_native(&self) -> bool {
        self.0.is_empty() || self.0 == NATIVE_SENTINEL
    }

    /// Returns the on-wire address string
    pub fn as_str(&self) -> &str {
        if self.0.is_empty() {
            NATIVE_SENTINEL
        } else {
            &self.0
        }
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "native")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Opaque identifier used to look up a previously created invoice
///
/// Short codes arrive as the trailing segment of a share-link path
/// (`pay/<code>`); [`ShortCode::from_path_segment`] extracts it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a short code from its raw value
    pub fn new(code: impl Into<String>) -> Result<Self, AddressError> {
        let code = code.into();
        if code.is_empty() {
            return Err(AddressError::EmptyShortCode);
        }
        Ok(Self(code))
    }

    /// Extracts the code from a share-link path such as `pay/Ab3xYz`
    pub fn from_path_segment(path: &str) -> Result<Self, AddressError> {
        let segment = path.rsplit('/').next().unwrap_or("");
        Self::new(segment)
    }

    /// Returns the raw code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_address() {
        let addr = WalletAddress::parse("0xAbCd00000000000000000000000000000000Ef12").unwrap();
        assert_eq!(addr.as_str(), "0xabcd00000000000000000000000000000000ef12");
    }

    #[test]
    fn test_parse_rejects_bad_addresses() {
        assert!(WalletAddress::parse("abcd").is_err());
        assert!(WalletAddress::parse("0x1234").is_err());
        assert!(WalletAddress::parse("0xzzzz0000000000000000000000000000000000zz").is_err());
    }

    #[test]
    fn test_equality_ignores_checksum_casing() {
        let a = WalletAddress::parse("0xABCD00000000000000000000000000000000EF12").unwrap();
        let b = WalletAddress::parse("0xabcd00000000000000000000000000000000ef12").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_native_token_sentinel() {
        assert!(TokenAddress::NATIVE.is_native());
        assert_eq!(
            TokenAddress::NATIVE.as_str(),
            "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"
        );

        let contract = TokenAddress::contract(
            WalletAddress::parse("0x1200000000000000000000000000000000000034").unwrap(),
        );
        assert!(!contract.is_native());
    }

    #[test]
    fn test_short_code_from_path() {
        let code = ShortCode::from_path_segment("pay/Ab3xYz").unwrap();
        assert_eq!(code.as_str(), "Ab3xYz");

        // A bare code is accepted as-is
        let bare = ShortCode::from_path_segment("Ab3xYz").unwrap();
        assert_eq!(bare.as_str(), "Ab3xYz");

        assert_eq!(
            ShortCode::from_path_segment("pay/"),
            Err(AddressError::EmptyShortCode)
        );
    }
}
