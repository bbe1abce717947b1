//! # Transfer Id Derivation
//!
//! `id = keccak256(TAG ‖ domain_key ‖ sender ‖ receiver ‖ token ‖ amount ‖
//! hash_lock ‖ time_lock ‖ secret_length ‖ nonce)`, integers big-endian.
//!
//! The domain key binds ids to one escrow instance and the nonce is the
//! store's strictly increasing sequence, so two otherwise identical requests
//! never collide and an id cannot be precomputed without knowing the sequence.

use crate::domain::{AccountId, Amount, Hash, Timestamp, TokenId, TransferId};
use sha3::{Digest, Keccak256};

/// Domain separation tag.
pub const TRANSFER_ID_TAG: &[u8] = b"htlc-escrow/transfer-id/v1";

/// Fields that define a transfer for id derivation.
#[derive(Clone, Copy, Debug)]
pub struct TransferIdInput<'a> {
    /// Sender account.
    pub sender: &'a AccountId,
    /// Receiver account.
    pub receiver: &'a AccountId,
    /// Token.
    pub token: &'a TokenId,
    /// Amount.
    pub amount: Amount,
    /// Hash-lock.
    pub hash_lock: &'a Hash,
    /// Time-lock.
    pub time_lock: Timestamp,
    /// Declared secret length.
    pub secret_length: u32,
}

/// Derive the transfer id for `input` at sequence `nonce`.
pub fn derive_transfer_id(domain_key: &Hash, input: &TransferIdInput<'_>, nonce: u64) -> TransferId {
    let mut hasher = Keccak256::new();
    hasher.update(TRANSFER_ID_TAG);
    hasher.update(domain_key);
    hasher.update(input.sender);
    hasher.update(input.receiver);
    hasher.update(input.token);
    hasher.update(input.amount.to_be_bytes());
    hasher.update(input.hash_lock);
    hasher.update(input.time_lock.to_be_bytes());
    hasher.update(input.secret_length.to_be_bytes());
    hasher.update(nonce.to_be_bytes());
    TransferId(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: AccountId = [1u8; 20];
    const RECEIVER: AccountId = [2u8; 20];
    const TOKEN: TokenId = [3u8; 20];
    const HASH_LOCK: Hash = [4u8; 32];

    fn input() -> TransferIdInput<'static> {
        TransferIdInput {
            sender: &SENDER,
            receiver: &RECEIVER,
            token: &TOKEN,
            amount: 10,
            hash_lock: &HASH_LOCK,
            time_lock: 1_700_000_020,
            secret_length: 32,
        }
    }

    #[test]
    fn test_deterministic() {
        let key = [0u8; 32];
        assert_eq!(
            derive_transfer_id(&key, &input(), 0),
            derive_transfer_id(&key, &input(), 0)
        );
    }

    #[test]
    fn test_nonce_changes_id() {
        let key = [0u8; 32];
        assert_ne!(
            derive_transfer_id(&key, &input(), 0),
            derive_transfer_id(&key, &input(), 1)
        );
    }

    #[test]
    fn test_domain_key_changes_id() {
        assert_ne!(
            derive_transfer_id(&[0u8; 32], &input(), 0),
            derive_transfer_id(&[9u8; 32], &input(), 0)
        );
    }

    #[test]
    fn test_every_field_is_bound() {
        let key = [0u8; 32];
        let base = derive_transfer_id(&key, &input(), 0);
        let other_account = [7u8; 20];
        let other_hash = [7u8; 32];

        let variants = [
            TransferIdInput { sender: &other_account, ..input() },
            TransferIdInput { receiver: &other_account, ..input() },
            TransferIdInput { token: &other_account, ..input() },
            TransferIdInput { amount: 11, ..input() },
            TransferIdInput { hash_lock: &other_hash, ..input() },
            TransferIdInput { time_lock: 1_700_000_021, ..input() },
            TransferIdInput { secret_length: 31, ..input() },
        ];
        for variant in variants {
            assert_ne!(derive_transfer_id(&key, &variant, 0), base);
        }
    }
}
