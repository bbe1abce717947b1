//! # Domain Errors
//!
//! Error types for the HTLC escrow.

use super::value_objects::{Network, TransferId};
use thiserror::Error;

/// Hash type (32-byte Keccak-256).
pub type Hash = [u8; 32];

/// On-chain account identifier (20-byte).
pub type AccountId = [u8; 20];

/// Fungible token identifier (20-byte contract address).
pub type TokenId = [u8; 20];

/// Token quantity in the token's smallest unit.
pub type Amount = u128;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Escrow error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EscrowError {
    /// External-chain address failed format validation.
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    /// Unknown discriminant for a closed enumeration.
    #[error("Invalid {kind} value: {value}")]
    InvalidEnum {
        /// Enumeration name.
        kind: &'static str,
        /// Rejected discriminant.
        value: u8,
    },

    /// A transfer with this id already exists.
    #[error("Duplicate transfer id: {0}")]
    DuplicateTransferId(TransferId),

    /// Transfer not found.
    #[error("Transfer not found: {0}")]
    NotFound(TransferId),

    /// No address registered for (account, network).
    #[error("No address registered for account 0x{} on {network}", hex::encode(.account))]
    AddressNotFound {
        /// Account that was looked up.
        account: AccountId,
        /// Network that was looked up.
        network: Network,
    },

    /// Transfer already reached a terminal state.
    #[error("Transfer {0} already finalized")]
    AlreadyFinalized(TransferId),

    /// Preimage does not open the hash-lock.
    #[error("Preimage does not match hash-lock")]
    HashMismatch,

    /// Claim attempted at or after the time-lock.
    #[error("Transfer expired at {time_lock} (now {now})")]
    Expired {
        /// Transfer time-lock.
        time_lock: Timestamp,
        /// Time of the attempt.
        now: Timestamp,
    },

    /// Refund attempted before the time-lock.
    #[error("Transfer not expired until {time_lock} (now {now})")]
    NotYetExpired {
        /// Transfer time-lock.
        time_lock: Timestamp,
        /// Time of the attempt.
        now: Timestamp,
    },

    /// Amount must be positive.
    #[error("Invalid amount: must be greater than zero")]
    InvalidAmount,

    /// Declared secret length outside the accepted range.
    #[error("Invalid secret length {got}: must be within 1..={max}")]
    InvalidSecretLength {
        /// Declared length.
        got: u32,
        /// Configured maximum.
        max: u32,
    },

    /// Time-lock does not leave the minimum lock duration.
    #[error("Time-lock {time_lock} too short: must be after {earliest}")]
    TimeLockTooShort {
        /// Requested time-lock.
        time_lock: Timestamp,
        /// The time-lock must be strictly greater than this.
        earliest: Timestamp,
    },

    /// Sender balance cannot cover the debit.
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount requested.
        required: Amount,
        /// Amount available.
        available: Amount,
    },

    /// Ledger refused the debit for a reason other than balance.
    #[error("Ledger debit failed: {0}")]
    LedgerDebitFailed(String),

    /// Payout failed after the transfer was finalized.
    ///
    /// Funds remain in escrow and require operator intervention.
    #[error("Ledger credit failed for transfer {transfer_id}: {reason} (operator intervention required)")]
    LedgerCreditFailed {
        /// Finalized transfer whose payout failed.
        transfer_id: TransferId,
        /// Ledger failure description.
        reason: String,
    },
}

impl EscrowError {
    /// Whether this failure left funds stranded and needs manual remediation.
    pub fn requires_operator(&self) -> bool {
        matches!(self, Self::LedgerCreditFailed { .. })
    }
}

/// Errors reported by the token ledger port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Account balance is too low.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount requested.
        required: Amount,
        /// Amount available.
        available: Amount,
    },

    /// Escrow holds less of the token than the credit requires.
    #[error("Escrow shortfall: required {required}, held {held}")]
    EscrowShortfall {
        /// Amount requested.
        required: Amount,
        /// Amount held in escrow.
        held: Amount,
    },

    /// Arithmetic overflow on a balance.
    #[error("Balance overflow")]
    Overflow,

    /// Backend unavailable or rejected the operation.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

impl From<LedgerError> for EscrowError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance {
                required,
                available,
            } => EscrowError::InsufficientFunds {
                required,
                available,
            },
            other => EscrowError::LedgerDebitFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_enum_error() {
        let err = EscrowError::InvalidEnum {
            kind: "Network",
            value: 7,
        };
        assert!(err.to_string().contains("Network"));
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_not_found_error_shows_id() {
        let err = EscrowError::NotFound(TransferId([0xAB; 32]));
        assert!(err.to_string().contains("0xabab"));
    }

    #[test]
    fn test_only_credit_failure_requires_operator() {
        let stranded = EscrowError::LedgerCreditFailed {
            transfer_id: TransferId([1u8; 32]),
            reason: "backend down".to_string(),
        };
        assert!(stranded.requires_operator());
        assert!(!EscrowError::HashMismatch.requires_operator());
        assert!(!EscrowError::InvalidAmount.requires_operator());
    }

    #[test]
    fn test_ledger_insufficient_balance_maps_to_insufficient_funds() {
        let err: EscrowError = LedgerError::InsufficientBalance {
            required: 10,
            available: 3,
        }
        .into();
        assert_eq!(
            err,
            EscrowError::InsufficientFunds {
                required: 10,
                available: 3
            }
        );
    }

    #[test]
    fn test_other_ledger_errors_map_to_debit_failed() {
        let err: EscrowError = LedgerError::Unavailable("timeout".to_string()).into();
        assert!(matches!(err, EscrowError::LedgerDebitFailed(msg) if msg.contains("timeout")));
    }
}
