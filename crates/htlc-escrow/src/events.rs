//! # Escrow Events
//!
//! Domain events emitted by successful escrow operations. Each operation
//! returns its events in a [`Receipt`](crate::ports::Receipt) and appends them
//! to the service journal.
//!
//! | Event | Emitted by |
//! |-------|------------|
//! | `AddressRegistered` | `register_address` |
//! | `NewTransferIn` | `transfer_in` |
//! | `Claimed` | `claim` |
//! | `Refunded` | `refund` |

use crate::domain::{AccountId, Amount, ExternalAddress, Network, TokenId, TransferId};
use serde::{Deserialize, Serialize};

/// Escrow domain event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum EscrowEvent {
    /// An account bound a BTC address for a network.
    AddressRegistered {
        /// Registering account.
        account: AccountId,
        /// Network of the binding.
        network: Network,
        /// The new address.
        address: ExternalAddress,
    },

    /// Tokens locked under a new transfer.
    NewTransferIn {
        /// New transfer id.
        transfer_id: TransferId,
        /// Sender account.
        sender: AccountId,
        /// Receiver account.
        receiver: AccountId,
        /// Escrowed token.
        token: TokenId,
        /// Amount locked.
        amount: Amount,
        /// Sender's registered refund address on the transfer network, if any.
        refund_btc_addr: Option<ExternalAddress>,
    },

    /// Transfer claimed; carries the preimage so the counterparty can settle
    /// the external leg.
    Claimed {
        /// Claimed transfer.
        transfer_id: TransferId,
        /// Revealed preimage.
        #[serde(with = "hex_bytes")]
        preimage: Vec<u8>,
    },

    /// Transfer refunded to its sender.
    Refunded {
        /// Refunded transfer.
        transfer_id: TransferId,
    },
}

impl EscrowEvent {
    /// Transfer this event concerns, if any.
    pub fn transfer_id(&self) -> Option<TransferId> {
        match self {
            EscrowEvent::AddressRegistered { .. } => None,
            EscrowEvent::NewTransferIn { transfer_id, .. }
            | EscrowEvent::Claimed { transfer_id, .. }
            | EscrowEvent::Refunded { transfer_id } => Some(*transfer_id),
        }
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}
