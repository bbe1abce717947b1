//! # Transfer Store
//!
//! Owns every transfer and enforces the lock → claim/refund state machine.
//!
//! The time-lock splits the timeline into a claim window `[created, time_lock)`
//! and a refund window `[time_lock, ∞)`. Both transitions require `Locked`, so
//! at most one of them can ever succeed for a given transfer.

use super::entities::{Payout, Transfer};
use super::errors::{AccountId, EscrowError, Timestamp};
use super::value_objects::{TransferId, TransferState};
use crate::algorithms::verify_preimage;
use std::collections::HashMap;
use tracing::debug;

/// In-memory transfer table keyed by transfer id.
#[derive(Debug, Default)]
pub struct TransferStore {
    transfers: HashMap<TransferId, Transfer>,
    /// Next sequence number; advanced on every successful create.
    sequence: u64,
}

impl TransferStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number the next created transfer will use.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Whether `transfer_id` is known.
    pub fn contains(&self, transfer_id: &TransferId) -> bool {
        self.transfers.contains_key(transfer_id)
    }

    /// Insert a new transfer in the `Locked` state.
    pub fn create(&mut self, transfer_id: TransferId, mut transfer: Transfer) -> Result<(), EscrowError> {
        if self.transfers.contains_key(&transfer_id) {
            return Err(EscrowError::DuplicateTransferId(transfer_id));
        }
        transfer.id = transfer_id;
        transfer.state = TransferState::Locked;
        transfer.preimage = None;
        self.transfers.insert(transfer_id, transfer);
        self.sequence += 1;
        debug!("[store] created {} (sequence {})", transfer_id, self.sequence);
        Ok(())
    }

    /// Transfer by id.
    pub fn get(&self, transfer_id: &TransferId) -> Result<&Transfer, EscrowError> {
        self.transfers
            .get(transfer_id)
            .ok_or(EscrowError::NotFound(*transfer_id))
    }

    /// Flip a locked transfer to `Claimed` if `preimage` opens it before expiry.
    ///
    /// Checks, in order: existence, `Locked` state, preimage length and hash,
    /// `now < time_lock`. State is untouched on any failure.
    pub fn transition_to_claimed(
        &mut self,
        transfer_id: &TransferId,
        preimage: &[u8],
        now: Timestamp,
    ) -> Result<Payout, EscrowError> {
        let transfer = self
            .transfers
            .get_mut(transfer_id)
            .ok_or(EscrowError::NotFound(*transfer_id))?;

        if !transfer.state.can_transition_to(TransferState::Claimed) {
            return Err(EscrowError::AlreadyFinalized(*transfer_id));
        }

        if !verify_preimage(preimage, &transfer.hash_lock, transfer.secret_length) {
            return Err(EscrowError::HashMismatch);
        }

        if transfer.is_expired(now) {
            return Err(EscrowError::Expired {
                time_lock: transfer.time_lock,
                now,
            });
        }

        transfer.state = TransferState::Claimed;
        transfer.preimage = Some(preimage.to_vec());
        Ok(transfer.payout_to(transfer.receiver))
    }

    /// Flip a locked transfer to `Refunded` once its time-lock has passed.
    pub fn transition_to_refunded(
        &mut self,
        transfer_id: &TransferId,
        now: Timestamp,
    ) -> Result<Payout, EscrowError> {
        let transfer = self
            .transfers
            .get_mut(transfer_id)
            .ok_or(EscrowError::NotFound(*transfer_id))?;

        if !transfer.state.can_transition_to(TransferState::Refunded) {
            return Err(EscrowError::AlreadyFinalized(*transfer_id));
        }

        if !transfer.is_expired(now) {
            return Err(EscrowError::NotYetExpired {
                time_lock: transfer.time_lock,
                now,
            });
        }

        transfer.state = TransferState::Refunded;
        Ok(transfer.payout_to(transfer.sender))
    }

    /// Locked transfers whose time-lock has passed, ordered by time-lock.
    pub fn refundable(&self, now: Timestamp) -> Vec<&Transfer> {
        let mut due: Vec<&Transfer> = self
            .transfers
            .values()
            .filter(|t| t.can_refund(now))
            .collect();
        due.sort_by_key(|t| (t.time_lock, t.nonce));
        due
    }

    /// Transfers where `account` is sender or receiver, in creation order.
    pub fn transfers_of(&self, account: &AccountId) -> Vec<&Transfer> {
        let mut found: Vec<&Transfer> = self
            .transfers
            .values()
            .filter(|t| t.sender == *account || t.receiver == *account)
            .collect();
        found.sort_by_key(|t| t.nonce);
        found
    }

    /// Number of transfers ever created.
    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}
