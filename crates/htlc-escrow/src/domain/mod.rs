//! # Domain Module
//!
//! Core domain types for the HTLC escrow: value objects, entities, errors,
//! and the two stores that own all escrow state.

pub mod address;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod registry;
pub mod secure_secret;
pub mod store;
pub mod value_objects;

pub use address::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use registry::AddressRegistry;
pub use secure_secret::SecureSecret;
pub use store::TransferStore;
pub use value_objects::*;
