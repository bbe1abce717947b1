//! # Inbound Ports
//!
//! API trait defining what the escrow can do.

use crate::domain::{
    AccountId, Amount, BtcAddressType, EscrowError, ExternalAddress, Hash, Network, Payout,
    Timestamp, TokenId, Transfer, TransferId,
};
use crate::events::EscrowEvent;

/// Request to lock tokens under a new transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferInParams {
    /// Counterparty entitled to claim.
    pub receiver: AccountId,
    /// Token to escrow.
    pub token: TokenId,
    /// Amount in the token's smallest unit.
    pub amount: Amount,
    /// Declared preimage length in bytes.
    pub secret_length: u32,
    /// Keccak-256 of the preimage.
    pub hash_lock: Hash,
    /// Absolute expiry, seconds since epoch.
    pub time_lock: Timestamp,
    /// BTC network of the swap.
    pub network: Network,
    /// Type of `claim_btc_addr`.
    pub addr_type: BtcAddressType,
    /// Receiver's BTC address for the external leg.
    pub claim_btc_addr: String,
}

/// Result of a successful operation plus the events it emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt<T> {
    /// Operation output.
    pub output: T,
    /// Events emitted, in order.
    pub events: Vec<EscrowEvent>,
}

impl<T> Receipt<T> {
    /// Build a receipt.
    pub fn new(output: T, events: Vec<EscrowEvent>) -> Self {
        Self { output, events }
    }
}

/// Escrow API - inbound port.
pub trait EscrowApi: Send + Sync {
    /// Bind `account`'s BTC address for `network`, overwriting any prior one.
    fn register_address(
        &self,
        account: AccountId,
        network: Network,
        address_type: BtcAddressType,
        address: &str,
    ) -> Result<Receipt<()>, EscrowError>;

    /// Registered address of `account` on `network`.
    fn lookup_address(
        &self,
        account: &AccountId,
        network: Network,
    ) -> Result<ExternalAddress, EscrowError>;

    /// Debit `sender` and lock the tokens under a new transfer.
    fn transfer_in(
        &self,
        sender: AccountId,
        params: TransferInParams,
    ) -> Result<Receipt<TransferId>, EscrowError>;

    /// Release a transfer to its receiver by revealing the preimage.
    fn claim(&self, transfer_id: &TransferId, preimage: &[u8]) -> Result<Receipt<Payout>, EscrowError>;

    /// Return an expired transfer to its sender.
    fn refund(&self, transfer_id: &TransferId) -> Result<Receipt<Payout>, EscrowError>;

    /// Transfer by id.
    fn get_transfer(&self, transfer_id: &TransferId) -> Result<Transfer, EscrowError>;
}
