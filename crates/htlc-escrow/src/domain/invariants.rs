//! # Domain Invariants
//!
//! Request-level rules checked before any funds move.

use super::errors::{Amount, EscrowError, Timestamp};

/// Invariant: escrowed amount is positive.
pub fn invariant_positive_amount(amount: Amount) -> Result<(), EscrowError> {
    if amount == 0 {
        return Err(EscrowError::InvalidAmount);
    }
    Ok(())
}

/// Invariant: declared secret length within `1..=max`.
pub fn invariant_secret_length(secret_length: u32, max: u32) -> Result<(), EscrowError> {
    if secret_length == 0 || secret_length > max {
        return Err(EscrowError::InvalidSecretLength {
            got: secret_length,
            max,
        });
    }
    Ok(())
}

/// Invariant: time-lock leaves at least the minimum lock duration.
///
/// `time_lock` must be strictly greater than `now + min_lock_duration_secs`.
pub fn invariant_time_lock_margin(
    time_lock: Timestamp,
    now: Timestamp,
    min_lock_duration_secs: u64,
) -> Result<(), EscrowError> {
    let earliest = now.saturating_add(min_lock_duration_secs);
    if time_lock <= earliest {
        return Err(EscrowError::TimeLockTooShort {
            time_lock,
            earliest,
        });
    }
    Ok(())
}
