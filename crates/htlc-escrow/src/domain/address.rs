//! # External Addresses
//!
//! Validated Bitcoin receiving addresses.
//!
//! ## Format rules
//!
//! | Step | Rule |
//! |------|------|
//! | 1 | non-empty, ASCII alphanumeric, `MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN` chars |
//! | 2 | decodes as base58check or bech32/bech32m with a valid checksum |
//! | 3 | valid for the declared network |
//! | 4 | script type matches the declared [`BtcAddressType`] |

use super::errors::EscrowError;
use super::value_objects::{BtcAddressType, Network};
use bitcoin::address::{Address, AddressType, NetworkUnchecked};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shortest accepted address (base58 P2PKH lower bound is 26; 14 is the bech32 minimum).
pub const MIN_ADDRESS_LEN: usize = 14;

/// Longest accepted address (bech32 limit).
pub const MAX_ADDRESS_LEN: usize = 90;

/// A Bitcoin receiving address validated against its network and type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawExternalAddress")]
pub struct ExternalAddress {
    network: Network,
    address_type: BtcAddressType,
    raw: String,
}

impl ExternalAddress {
    /// Validate `raw` and build the address.
    pub fn parse(
        network: Network,
        address_type: BtcAddressType,
        raw: &str,
    ) -> Result<Self, EscrowError> {
        validate_address(network, address_type, raw)?;
        Ok(Self {
            network,
            address_type,
            raw: raw.to_string(),
        })
    }

    /// Network the address belongs to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Declared address type.
    pub fn address_type(&self) -> BtcAddressType {
        self.address_type
    }

    /// Address string as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for ExternalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Unvalidated wire form, only used for deserialization.
#[derive(Deserialize)]
struct RawExternalAddress {
    network: Network,
    address_type: BtcAddressType,
    raw: String,
}

impl TryFrom<RawExternalAddress> for ExternalAddress {
    type Error = EscrowError;

    fn try_from(value: RawExternalAddress) -> Result<Self, Self::Error> {
        ExternalAddress::parse(value.network, value.address_type, &value.raw)
    }
}

/// Check `raw` against the format rules for `address_type` on `network`.
pub fn validate_address(
    network: Network,
    address_type: BtcAddressType,
    raw: &str,
) -> Result<(), EscrowError> {
    if raw.is_empty() {
        return Err(EscrowError::InvalidAddressFormat("empty address".to_string()));
    }
    if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&raw.len()) {
        return Err(EscrowError::InvalidAddressFormat(format!(
            "length {} outside {}..={}",
            raw.len(),
            MIN_ADDRESS_LEN,
            MAX_ADDRESS_LEN
        )));
    }
    if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(EscrowError::InvalidAddressFormat(
            "non-alphanumeric character".to_string(),
        ));
    }

    let parsed: Address<NetworkUnchecked> = raw
        .parse()
        .map_err(|e: bitcoin::address::ParseError| {
            EscrowError::InvalidAddressFormat(e.to_string())
        })?;

    if !parsed.is_valid_for_network(network.to_bitcoin()) {
        return Err(EscrowError::InvalidAddressFormat(format!(
            "not a {} address",
            network
        )));
    }

    let actual = parsed.assume_checked().address_type();
    if !type_matches(address_type, actual) {
        return Err(EscrowError::InvalidAddressFormat(format!(
            "expected {} address, decoded {:?}",
            address_type, actual
        )));
    }

    Ok(())
}

fn type_matches(expected: BtcAddressType, actual: Option<AddressType>) -> bool {
    match (expected, actual) {
        (BtcAddressType::Legacy, Some(AddressType::P2pkh)) => true,
        (BtcAddressType::SegWit, Some(AddressType::P2sh)) => true,
        (BtcAddressType::NativeSegWit, Some(AddressType::P2wpkh))
        | (BtcAddressType::NativeSegWit, Some(AddressType::P2wsh)) => true,
        (BtcAddressType::Taproot, Some(AddressType::P2tr)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TESTNET_LEGACY: &str = "miJ19RACTc7Sow64gbznCnCz3p4Ey2NP18";
    const TESTNET_SEGWIT: &str = "2MsLZ5FqqYpjM1Q1W4X81zMVZTF9gdbhVwd";
    const TESTNET_NATIVE: &str = "tb1qqypqxpq9qcrsszg2pvxq6rs0zqg3yyc5r7fxez";
    const TESTNET_TAPROOT: &str =
        "tb1pqypqxpq9qcrsszg2pvxq6rs0zqg3yyc5z5tpwxqergd3c8g7rusqe7ea7u";
    const MAINNET_LEGACY: &str = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2";
    const MAINNET_SEGWIT: &str = "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy";
    const MAINNET_NATIVE: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
    const MAINNET_TAPROOT: &str =
        "bc1p5d7rjq7g6rdk2yhzks9smlaqtedr4dekq08ge8ztwac72sfr9rusxg3297";

    #[test]
    fn test_accepts_every_type_on_both_networks() {
        let cases = [
            (Network::Testnet, BtcAddressType::Legacy, TESTNET_LEGACY),
            (Network::Testnet, BtcAddressType::SegWit, TESTNET_SEGWIT),
            (Network::Testnet, BtcAddressType::NativeSegWit, TESTNET_NATIVE),
            (Network::Testnet, BtcAddressType::Taproot, TESTNET_TAPROOT),
            (Network::Mainnet, BtcAddressType::Legacy, MAINNET_LEGACY),
            (Network::Mainnet, BtcAddressType::SegWit, MAINNET_SEGWIT),
            (Network::Mainnet, BtcAddressType::NativeSegWit, MAINNET_NATIVE),
            (Network::Mainnet, BtcAddressType::Taproot, MAINNET_TAPROOT),
        ];
        for (network, kind, raw) in cases {
            let addr = ExternalAddress::parse(network, kind, raw)
                .unwrap_or_else(|e| panic!("{} rejected: {}", raw, e));
            assert_eq!(addr.as_str(), raw);
            assert_eq!(addr.network(), network);
            assert_eq!(addr.address_type(), kind);
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            validate_address(Network::Testnet, BtcAddressType::Legacy, ""),
            Err(EscrowError::InvalidAddressFormat(_))
        ));
    }

    #[test]
    fn test_rejects_whitespace_and_symbols() {
        let padded = format!(" {}", TESTNET_LEGACY);
        assert!(validate_address(Network::Testnet, BtcAddressType::Legacy, &padded).is_err());
        assert!(validate_address(Network::Testnet, BtcAddressType::Legacy, "miJ19-ACTc7Sow64gbz").is_err());
    }

    #[test]
    fn test_rejects_bad_checksum() {
        // last character altered
        let corrupted = "miJ19RACTc7Sow64gbznCnCz3p4Ey2NP19";
        assert!(matches!(
            validate_address(Network::Testnet, BtcAddressType::Legacy, corrupted),
            Err(EscrowError::InvalidAddressFormat(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_network() {
        assert!(validate_address(Network::Mainnet, BtcAddressType::Legacy, TESTNET_LEGACY).is_err());
        assert!(validate_address(Network::Testnet, BtcAddressType::NativeSegWit, MAINNET_NATIVE).is_err());
    }

    #[test]
    fn test_rejects_type_mismatch() {
        assert!(validate_address(Network::Testnet, BtcAddressType::Taproot, TESTNET_NATIVE).is_err());
        assert!(validate_address(Network::Testnet, BtcAddressType::Legacy, TESTNET_SEGWIT).is_err());
        assert!(validate_address(Network::Mainnet, BtcAddressType::NativeSegWit, MAINNET_TAPROOT).is_err());
    }

    #[test]
    fn test_rejects_overlong() {
        let long = "a".repeat(MAX_ADDRESS_LEN + 1);
        assert!(validate_address(Network::Testnet, BtcAddressType::NativeSegWit, &long).is_err());
    }

    #[test]
    fn test_deserialize_revalidates() {
        let json = format!(
            r#"{{"network":"Testnet","address_type":"Legacy","raw":"{}"}}"#,
            TESTNET_LEGACY
        );
        let addr: ExternalAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(addr.as_str(), TESTNET_LEGACY);

        let bad = r#"{"network":"Mainnet","address_type":"Legacy","raw":"miJ19RACTc7Sow64gbznCnCz3p4Ey2NP18"}"#;
        assert!(serde_json::from_str::<ExternalAddress>(bad).is_err());
    }
}
