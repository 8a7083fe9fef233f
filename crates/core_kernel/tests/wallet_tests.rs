//! Tests for wallet address and short code value objects

use core_kernel::{ShortCode, TokenAddress, WalletAddress};

#[test]
fn test_address_roundtrips_through_serde() {
    let addr = WalletAddress::parse("0x00a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3").unwrap();
    let json = serde_json::to_string(&addr).unwrap();
    assert_eq!(json, "\"0x00a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3\"");

    let back: WalletAddress = serde_json::from_str(&json).unwrap();
    assert_eq!(back, addr);
}

#[test]
fn test_native_token_is_the_sentinel_address() {
    let native = TokenAddress::NATIVE;
    assert!(native.is_native());
    // 40 e's, the convention wallet SDKs use for the chain's base asset
    assert_eq!(native.as_str().len(), 42);
    assert!(native.as_str().trim_start_matches("0x").chars().all(|c| c == 'e'));
}

#[test]
fn test_short_code_takes_trailing_path_segment() {
    assert_eq!(
        ShortCode::from_path_segment("update/fj3Ka9").unwrap().as_str(),
        "fj3Ka9"
    );
    assert!(ShortCode::from_path_segment("").is_err());
}
