//! # Domain Value Objects
//!
//! Immutable value types for the HTLC escrow.

use super::errors::{EscrowError, Hash};
use serde::{Deserialize, Serialize};
use std::fmt;

/// External-chain network selector.
///
/// Wire discriminants: `Mainnet = 0`, `Testnet = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Bitcoin mainnet.
    Mainnet = 0,
    /// Bitcoin testnet.
    Testnet = 1,
}

impl Network {
    /// All variants in discriminant order.
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

    /// The matching `bitcoin` crate network.
    pub fn to_bitcoin(self) -> bitcoin::Network {
        match self {
            Network::Mainnet => bitcoin::Network::Bitcoin,
            Network::Testnet => bitcoin::Network::Testnet,
        }
    }
}

impl TryFrom<u8> for Network {
    type Error = EscrowError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Network::Mainnet),
            1 => Ok(Network::Testnet),
            _ => Err(EscrowError::InvalidEnum {
                kind: "Network",
                value,
            }),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// Bitcoin receiving address type.
///
/// Wire discriminants: `Legacy = 0`, `SegWit = 1`, `NativeSegWit = 2`, `Taproot = 3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BtcAddressType {
    /// Base58 P2PKH (`1...`, `m...`/`n...`).
    Legacy = 0,
    /// Base58 P2SH-wrapped segwit (`3...`, `2...`).
    SegWit = 1,
    /// Bech32 v0 witness program (`bc1q...`, `tb1q...`).
    NativeSegWit = 2,
    /// Bech32m v1 witness program (`bc1p...`, `tb1p...`).
    Taproot = 3,
}

impl TryFrom<u8> for BtcAddressType {
    type Error = EscrowError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BtcAddressType::Legacy),
            1 => Ok(BtcAddressType::SegWit),
            2 => Ok(BtcAddressType::NativeSegWit),
            3 => Ok(BtcAddressType::Taproot),
            _ => Err(EscrowError::InvalidEnum {
                kind: "BtcAddressType",
                value,
            }),
        }
    }
}

impl fmt::Display for BtcAddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BtcAddressType::Legacy => "legacy",
            BtcAddressType::SegWit => "segwit",
            BtcAddressType::NativeSegWit => "native-segwit",
            BtcAddressType::Taproot => "taproot",
        };
        f.write_str(name)
    }
}

/// Transfer state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferState {
    /// Funds held in escrow, awaiting claim or expiry.
    #[default]
    Locked,
    /// Preimage revealed, funds paid to the receiver.
    Claimed,
    /// Time-lock passed, funds returned to the sender.
    Refunded,
}

impl TransferState {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: TransferState) -> bool {
        matches!(
            (self, next),
            (Self::Locked, Self::Claimed) | (Self::Locked, Self::Refunded)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Claimed | Self::Refunded)
    }
}

/// Transfer identifier (32-byte keyed hash).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransferId(pub Hash);

impl TransferId {
    /// Raw bytes.
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransferId({})", self)
    }
}

impl From<Hash> for TransferId {
    fn from(hash: Hash) -> Self {
        Self(hash)
    }
}
