//! # Domain Entities
//!
//! Core entities for the HTLC escrow.

use super::address::ExternalAddress;
use super::errors::{AccountId, Amount, Hash, Timestamp, TokenId};
use super::value_objects::{TransferState, TransferId};
use serde::{Deserialize, Serialize};

/// Hashed time-locked transfer held in escrow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique identifier.
    pub id: TransferId,
    /// Account whose tokens are locked; refund beneficiary.
    pub sender: AccountId,
    /// Counterparty entitled to claim.
    pub receiver: AccountId,
    /// Escrowed token.
    pub token: TokenId,
    /// Amount locked.
    pub amount: Amount,
    /// Hash-lock: Keccak-256 of the secret.
    pub hash_lock: Hash,
    /// Declared secret length in bytes.
    pub secret_length: u32,
    /// Time-lock: claim allowed strictly before, refund at or after.
    pub time_lock: Timestamp,
    /// Sender's BTC refund destination, if registered.
    pub refund_btc_addr: Option<ExternalAddress>,
    /// Receiver's BTC claim destination.
    pub claim_btc_addr: ExternalAddress,
    /// Current state.
    pub state: TransferState,
    /// Preimage (only set after claim).
    pub preimage: Option<Vec<u8>>,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Store sequence number used in id derivation.
    pub nonce: u64,
}

/// Parameters for creating a transfer record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferParams {
    /// Unique identifier.
    pub id: TransferId,
    /// Sender account.
    pub sender: AccountId,
    /// Receiver account.
    pub receiver: AccountId,
    /// Escrowed token.
    pub token: TokenId,
    /// Amount locked.
    pub amount: Amount,
    /// Cryptographic hash of secret.
    pub hash_lock: Hash,
    /// Declared secret length.
    pub secret_length: u32,
    /// Expiration timestamp.
    pub time_lock: Timestamp,
    /// Sender refund address.
    pub refund_btc_addr: Option<ExternalAddress>,
    /// Receiver claim address.
    pub claim_btc_addr: ExternalAddress,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Sequence number.
    pub nonce: u64,
}

impl Transfer {
    /// Create a new locked transfer.
    pub fn new(params: TransferParams) -> Self {
        Self {
            id: params.id,
            sender: params.sender,
            receiver: params.receiver,
            token: params.token,
            amount: params.amount,
            hash_lock: params.hash_lock,
            secret_length: params.secret_length,
            time_lock: params.time_lock,
            refund_btc_addr: params.refund_btc_addr,
            claim_btc_addr: params.claim_btc_addr,
            state: TransferState::Locked,
            preimage: None,
            created_at: params.created_at,
            nonce: params.nonce,
        }
    }

    /// Check if the time-lock has been reached.
    pub fn is_expired(&self, current_time: Timestamp) -> bool {
        current_time >= self.time_lock
    }

    /// Check if claiming is allowed (ignoring the preimage).
    pub fn can_claim(&self, current_time: Timestamp) -> bool {
        self.state == TransferState::Locked && !self.is_expired(current_time)
    }

    /// Check if refund is allowed.
    pub fn can_refund(&self, current_time: Timestamp) -> bool {
        self.state == TransferState::Locked && self.is_expired(current_time)
    }

    /// Payout owed to `beneficiary` for this transfer.
    pub fn payout_to(&self, beneficiary: AccountId) -> Payout {
        Payout {
            transfer_id: self.id,
            beneficiary,
            token: self.token,
            amount: self.amount,
        }
    }
}

/// Funds to release from escrow after a terminal transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Finalized transfer.
    pub transfer_id: TransferId,
    /// Account to credit.
    pub beneficiary: AccountId,
    /// Token to credit.
    pub token: TokenId,
    /// Amount to credit.
    pub amount: Amount,
}
