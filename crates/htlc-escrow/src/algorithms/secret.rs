//! # Secret Generation and Verification
//!
//! Hash-lock operations. The hash is Keccak-256 over the raw preimage bytes,
//! the same value as `keccak256(abi.encodePacked(preimage))` on an EVM chain.

use crate::domain::{Hash, SecureSecret};
use rand::RngCore;
use sha3::{Digest, Keccak256};

/// Generate a cryptographically secure random preimage of `len` bytes.
pub fn generate_secret(len: usize) -> SecureSecret {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    SecureSecret::new(bytes)
}

/// Create a hash-lock from a preimage.
pub fn create_hash_lock(preimage: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(preimage);
    hasher.finalize().into()
}

/// Verify that a preimage opens a hash-lock with the declared length.
pub fn verify_preimage(preimage: &[u8], hash_lock: &Hash, secret_length: u32) -> bool {
    if preimage.len() != secret_length as usize {
        return false;
    }
    create_hash_lock(preimage) == *hash_lock
}
