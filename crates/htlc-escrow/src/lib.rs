//! # HTLC Escrow
//!
//! Token side of a token ↔ BTC atomic swap, built on hash time-locked
//! transfers.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A sender locks fungible tokens under a hash-lock and an absolute
//! time-lock. The receiver releases them by revealing the preimage before
//! expiry; after expiry the sender takes them back. Each transfer reaches
//! exactly one terminal state and pays out at most once.
//!
//! ## Guarantees
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | Claim before expiry | `now < time_lock` |
//! | Refund at or after expiry | `now >= time_lock` |
//! | Preimage binding | length equals declared length, Keccak-256 matches |
//! | Single payout | `Locked` is the only non-terminal state |
//! | Custody | debits and credits go through [`TokenLedger`] |
//!
//! ## Module Structure
//!
//! ```text
//! htlc-escrow/
//! ├── domain/          # Transfer, ExternalAddress, registry, store, errors
//! ├── algorithms/      # Secrets, hash-locks, transfer id derivation
//! ├── ports/           # EscrowApi, TokenLedger, TimeSource
//! ├── adapters/        # In-memory ledger, manual clock
//! ├── events.rs        # EscrowEvent
//! ├── config.rs        # EscrowConfig
//! └── service.rs       # EscrowService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryTokenLedger, ManualClock};
pub use algorithms::{
    create_hash_lock, derive_transfer_id, generate_secret, verify_preimage, TransferIdInput,
};
pub use config::{ConfigError, EscrowConfig};
pub use domain::{
    AccountId, AddressRegistry, Amount, BtcAddressType, EscrowError, ExternalAddress, Hash,
    LedgerError, Network, Payout, SecureSecret, Timestamp, TokenId, Transfer, TransferId,
    TransferState, TransferStore,
};
pub use events::EscrowEvent;
pub use ports::{EscrowApi, Receipt, SystemTimeSource, TimeSource, TokenLedger, TransferInParams};
pub use service::EscrowService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
