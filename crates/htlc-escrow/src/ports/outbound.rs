//! # Outbound Ports
//!
//! Traits for the external collaborators the escrow relies on: token custody
//! and the execution environment's clock.

use crate::domain::{AccountId, Amount, LedgerError, Timestamp, TokenId};

/// Token custody capability - outbound port.
///
/// `debit` moves tokens from an account into escrow, `credit` moves them
/// from escrow to an account. Implementations must make each call atomic.
pub trait TokenLedger: Send + Sync {
    /// Move `amount` of `token` from `from` into escrow.
    fn debit(&self, from: &AccountId, token: &TokenId, amount: Amount) -> Result<(), LedgerError>;

    /// Move `amount` of `token` from escrow to `to`.
    fn credit(&self, to: &AccountId, token: &TokenId, amount: Amount) -> Result<(), LedgerError>;

    /// Amount of `token` currently held in escrow.
    fn escrow_balance(&self, token: &TokenId) -> Amount;
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in seconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
