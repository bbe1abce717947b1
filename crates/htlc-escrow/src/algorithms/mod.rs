//! # Algorithms Module
//!
//! Hash-lock verification and transfer id derivation.

pub mod secret;
pub mod transfer_id;

pub use secret::{create_hash_lock, generate_secret, verify_preimage};
pub use transfer_id::{derive_transfer_id, TransferIdInput, TRANSFER_ID_TAG};
