//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-process implementations of the outbound ports.

mod clock;
mod token_ledger;

pub use clock::ManualClock;
pub use token_ledger::InMemoryTokenLedger;
