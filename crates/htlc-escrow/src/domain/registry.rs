//! # Address Registry
//!
//! Binds an on-chain account to one BTC receiving address per network.

use super::address::ExternalAddress;
use super::errors::{AccountId, EscrowError};
use super::value_objects::{BtcAddressType, Network};
use std::collections::HashMap;
use tracing::debug;

/// Per-account, per-network address table.
#[derive(Debug, Default)]
pub struct AddressRegistry {
    entries: HashMap<(AccountId, Network), ExternalAddress>,
}

impl AddressRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and upsert the `(account, network)` binding.
    ///
    /// Returns the previous binding, if one was overwritten. Nothing changes
    /// when validation fails.
    pub fn register(
        &mut self,
        account: AccountId,
        network: Network,
        address_type: BtcAddressType,
        raw: &str,
    ) -> Result<Option<ExternalAddress>, EscrowError> {
        let address = ExternalAddress::parse(network, address_type, raw)?;
        debug!(
            "[registry] 0x{} -> {} ({}, {})",
            hex::encode(account),
            address,
            network,
            address_type
        );
        Ok(self.entries.insert((account, network), address))
    }

    /// Registered address for `(account, network)`.
    pub fn lookup(
        &self,
        account: &AccountId,
        network: Network,
    ) -> Result<&ExternalAddress, EscrowError> {
        self.entries
            .get(&(*account, network))
            .ok_or(EscrowError::AddressNotFound {
                account: *account,
                network,
            })
    }

    /// All bindings of `account`, ordered by network.
    pub fn addresses_of(&self, account: &AccountId) -> Vec<&ExternalAddress> {
        Network::ALL
            .iter()
            .filter_map(|network| self.entries.get(&(*account, *network)))
            .collect()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: AccountId = [0xA1; 20];
    const BOB: AccountId = [0xB0; 20];
    const LEGACY: &str = "miJ19RACTc7Sow64gbznCnCz3p4Ey2NP18";
    const LEGACY_2: &str = "mfhbFyM6FcD1t2n7BTw483rdx4AnY7xhJp";
    const MAINNET_NATIVE: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";

    #[test]
    fn test_register_then_lookup() {
        let mut registry = AddressRegistry::new();
        registry
            .register(ALICE, Network::Testnet, BtcAddressType::Legacy, LEGACY)
            .unwrap();

        let addr = registry.lookup(&ALICE, Network::Testnet).unwrap();
        assert_eq!(addr.as_str(), LEGACY);
        assert_eq!(addr.address_type(), BtcAddressType::Legacy);
    }

    #[test]
    fn test_reregistration_overwrites() {
        let mut registry = AddressRegistry::new();
        registry
            .register(ALICE, Network::Testnet, BtcAddressType::Legacy, LEGACY)
            .unwrap();
        let previous = registry
            .register(ALICE, Network::Testnet, BtcAddressType::Legacy, LEGACY_2)
            .unwrap();

        assert_eq!(previous.unwrap().as_str(), LEGACY);
        assert_eq!(registry.lookup(&ALICE, Network::Testnet).unwrap().as_str(), LEGACY_2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invalid_registration_keeps_prior_binding() {
        let mut registry = AddressRegistry::new();
        registry
            .register(ALICE, Network::Testnet, BtcAddressType::Legacy, LEGACY)
            .unwrap();
        let result = registry.register(ALICE, Network::Testnet, BtcAddressType::Taproot, LEGACY);

        assert!(matches!(result, Err(EscrowError::InvalidAddressFormat(_))));
        assert_eq!(registry.lookup(&ALICE, Network::Testnet).unwrap().as_str(), LEGACY);
    }

    #[test]
    fn test_lookup_is_per_network_and_account() {
        let mut registry = AddressRegistry::new();
        registry
            .register(ALICE, Network::Testnet, BtcAddressType::Legacy, LEGACY)
            .unwrap();

        assert!(matches!(
            registry.lookup(&ALICE, Network::Mainnet),
            Err(EscrowError::AddressNotFound { network: Network::Mainnet, .. })
        ));
        assert!(registry.lookup(&BOB, Network::Testnet).is_err());
    }

    #[test]
    fn test_addresses_of_orders_by_network() {
        let mut registry = AddressRegistry::new();
        registry
            .register(ALICE, Network::Testnet, BtcAddressType::Legacy, LEGACY)
            .unwrap();
        registry
            .register(ALICE, Network::Mainnet, BtcAddressType::NativeSegWit, MAINNET_NATIVE)
            .unwrap();

        let all = registry.addresses_of(&ALICE);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].network(), Network::Mainnet);
        assert_eq!(all[1].network(), Network::Testnet);
        assert!(registry.addresses_of(&BOB).is_empty());
    }
}
