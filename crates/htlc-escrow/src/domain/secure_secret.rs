//! # Secure Secret Type
//!
//! Wrapper for HTLC preimages that zeroizes memory on drop.
//!
//! A preimage is the only thing standing between the receiver and the locked
//! funds until it is revealed on claim, so it should not linger in memory.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure preimage that zeroizes on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureSecret {
    inner: Vec<u8>,
}

impl SecureSecret {
    /// Create a new secure secret, taking ownership of the bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { inner: bytes }
    }

    /// Create from a slice (copies).
    pub fn from_slice(slice: &[u8]) -> Self {
        Self {
            inner: slice.to_vec(),
        }
    }

    /// Get the secret bytes.
    ///
    /// Avoid keeping references to the returned slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Length in bytes, the `secret_length` declared on transfer-in.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for SecureSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the actual secret
        f.write_str("SecureSecret(***)")
    }
}

// Hex on the wire, never raw bytes
impl Serialize for SecureSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(&self.inner))
    }
}

impl<'de> Deserialize<'de> for SecureSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        Ok(Self::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_secret_creation() {
        let secret = SecureSecret::new(vec![0xABu8; 32]);
        assert_eq!(secret.as_bytes()[0], 0xAB);
        assert_eq!(secret.len(), 32);
    }

    #[test]
    fn test_secure_secret_debug_hides_value() {
        let secret = SecureSecret::new(vec![0xABu8; 32]);
        let debug_str = format!("{:?}", secret);
        assert!(!debug_str.contains("AB"));
        assert!(!debug_str.contains("171"));
        assert!(debug_str.contains("***"));
    }

    #[test]
    fn test_secure_secret_serializes_as_hex() {
        let secret = SecureSecret::from_slice(&[0x01, 0xff]);
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"01ff\"");

        let back: SecureSecret = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_bytes(), &[0x01, 0xff]);
    }

    #[test]
    fn test_secure_secret_rejects_bad_hex() {
        assert!(serde_json::from_str::<SecureSecret>("\"zz\"").is_err());
    }
}
