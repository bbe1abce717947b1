//! # Escrow Configuration
//!
//! Defaults plus environment overrides.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `HTLC_MIN_LOCK_SECS` | `10` | time-lock must exceed `now` by more than this |
//! | `HTLC_MAX_SECRET_LENGTH` | `1024` | largest accepted preimage, bytes |
//! | `HTLC_DOMAIN_KEY` | zeros | 64 hex chars, keys transfer id derivation |

use crate::domain::Hash;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Default minimum lock duration in seconds.
pub const DEFAULT_MIN_LOCK_DURATION_SECS: u64 = 10;

/// Default maximum preimage length in bytes.
pub const DEFAULT_MAX_SECRET_LENGTH: u32 = 1024;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable present but unparsable.
    #[error("Invalid value for {var}: {reason}")]
    InvalidVar {
        /// Variable name.
        var: &'static str,
        /// Parse failure.
        reason: String,
    },

    /// Maximum secret length of zero would reject every transfer.
    #[error("max_secret_length must be positive")]
    ZeroMaxSecretLength,
}

/// Escrow configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowConfig {
    /// A new transfer's time-lock must be strictly greater than `now` plus this.
    pub min_lock_duration_secs: u64,
    /// Largest declared secret length accepted on transfer-in.
    pub max_secret_length: u32,
    /// Key identifying this escrow instance in transfer id derivation.
    pub domain_key: Hash,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            min_lock_duration_secs: DEFAULT_MIN_LOCK_DURATION_SECS,
            max_secret_length: DEFAULT_MAX_SECRET_LENGTH,
            domain_key: [0u8; 32],
        }
    }
}

impl EscrowConfig {
    /// Create configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let min_lock_duration_secs = match env::var("HTLC_MIN_LOCK_SECS") {
            Ok(v) => v.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidVar {
                var: "HTLC_MIN_LOCK_SECS",
                reason: e.to_string(),
            })?,
            Err(_) => defaults.min_lock_duration_secs,
        };

        let max_secret_length = match env::var("HTLC_MAX_SECRET_LENGTH") {
            Ok(v) => v.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidVar {
                var: "HTLC_MAX_SECRET_LENGTH",
                reason: e.to_string(),
            })?,
            Err(_) => defaults.max_secret_length,
        };

        let domain_key = match env::var("HTLC_DOMAIN_KEY") {
            Ok(v) => parse_domain_key(&v)?,
            Err(_) => defaults.domain_key,
        };

        let config = Self {
            min_lock_duration_secs,
            max_secret_length,
            domain_key,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_secret_length == 0 {
            return Err(ConfigError::ZeroMaxSecretLength);
        }
        Ok(())
    }

    /// Override the minimum lock duration.
    pub fn with_min_lock_duration(mut self, secs: u64) -> Self {
        self.min_lock_duration_secs = secs;
        self
    }

    /// Override the domain key.
    pub fn with_domain_key(mut self, key: Hash) -> Self {
        self.domain_key = key;
        self
    }
}

fn parse_domain_key(value: &str) -> Result<Hash, ConfigError> {
    let bytes = hex::decode(value.trim_start_matches("0x")).map_err(|e| ConfigError::InvalidVar {
        var: "HTLC_DOMAIN_KEY",
        reason: e.to_string(),
    })?;
    bytes.try_into().map_err(|b: Vec<u8>| ConfigError::InvalidVar {
        var: "HTLC_DOMAIN_KEY",
        reason: format!("expected 32 bytes, got {}", b.len()),
    })
}
