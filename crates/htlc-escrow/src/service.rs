//! # Escrow Service
//!
//! Orchestrates the address registry, the transfer store and the token
//! ledger behind the [`EscrowApi`] port.
//!
//! ## Atomicity
//!
//! Every state-changing call holds the store write lock from its first check
//! to its last effect, so mutations are globally serialized:
//!
//! - `transfer_in`: duplicate id is rejected before the debit, and a create
//!   that still fails after the debit is compensated by crediting back.
//! - `claim` / `refund`: the transition commits first, then the payout. A
//!   payout failure surfaces as `LedgerCreditFailed`; the transfer stays
//!   terminal so the payout can never be attempted twice.

use crate::algorithms::{derive_transfer_id, TransferIdInput};
use crate::config::EscrowConfig;
use crate::domain::{
    invariant_positive_amount, invariant_secret_length, invariant_time_lock_margin, AccountId,
    AddressRegistry, BtcAddressType, EscrowError, ExternalAddress, Network, Payout, Timestamp,
    Transfer, TransferId, TransferParams, TransferStore,
};
use crate::events::EscrowEvent;
use crate::ports::inbound::{EscrowApi, Receipt, TransferInParams};
use crate::ports::outbound::{TimeSource, TokenLedger};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

const SUBSYSTEM: &str = "htlc-escrow";

/// HTLC escrow service.
pub struct EscrowService<L: TokenLedger, C: TimeSource> {
    config: EscrowConfig,
    registry: RwLock<AddressRegistry>,
    store: RwLock<TransferStore>,
    ledger: Arc<L>,
    clock: Arc<C>,
    journal: Mutex<Vec<EscrowEvent>>,
}

impl<L: TokenLedger, C: TimeSource> EscrowService<L, C> {
    /// Create a service with empty stores.
    pub fn new(config: EscrowConfig, ledger: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            config,
            registry: RwLock::new(AddressRegistry::new()),
            store: RwLock::new(TransferStore::new()),
            ledger,
            clock,
            journal: Mutex::new(Vec::new()),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EscrowConfig {
        &self.config
    }

    /// The ledger this service pays out through.
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// All registered addresses of `account`.
    pub fn addresses_of(&self, account: &AccountId) -> Vec<ExternalAddress> {
        self.registry
            .read()
            .addresses_of(account)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Transfers where `account` is sender or receiver, in creation order.
    pub fn transfers_of(&self, account: &AccountId) -> Vec<Transfer> {
        self.store
            .read()
            .transfers_of(account)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Locked transfers that may be refunded right now.
    pub fn refundable_transfers(&self) -> Vec<TransferId> {
        let now = self.clock.now();
        self.store
            .read()
            .refundable(now)
            .into_iter()
            .map(|t| t.id)
            .collect()
    }

    /// Snapshot of every event emitted so far.
    pub fn events(&self) -> Vec<EscrowEvent> {
        self.journal.lock().clone()
    }

    /// Take and clear the event journal.
    pub fn drain_events(&self) -> Vec<EscrowEvent> {
        std::mem::take(&mut *self.journal.lock())
    }

    fn emit<T>(&self, output: T, events: Vec<EscrowEvent>) -> Receipt<T> {
        self.journal.lock().extend(events.iter().cloned());
        Receipt::new(output, events)
    }

    fn validate_transfer_in(
        &self,
        params: &TransferInParams,
        now: Timestamp,
    ) -> Result<ExternalAddress, EscrowError> {
        invariant_positive_amount(params.amount)?;
        invariant_secret_length(params.secret_length, self.config.max_secret_length)?;
        invariant_time_lock_margin(params.time_lock, now, self.config.min_lock_duration_secs)?;
        ExternalAddress::parse(params.network, params.addr_type, &params.claim_btc_addr)
    }

    /// Credit a payout after its transition committed.
    fn pay_out(&self, payout: &Payout) -> Result<(), EscrowError> {
        self.ledger
            .credit(&payout.beneficiary, &payout.token, payout.amount)
            .map_err(|e| {
                escrow_telemetry::log_transfer_event!(
                    error,
                    SUBSYSTEM,
                    "Credit failed; funds stranded in escrow, operator intervention required",
                    payout.transfer_id,
                    beneficiary = %hex::encode(payout.beneficiary),
                    amount = %payout.amount,
                    reason = %e
                );
                EscrowError::LedgerCreditFailed {
                    transfer_id: payout.transfer_id,
                    reason: e.to_string(),
                }
            })
    }
}

impl<L: TokenLedger, C: TimeSource> EscrowApi for EscrowService<L, C> {
    fn register_address(
        &self,
        account: AccountId,
        network: Network,
        address_type: BtcAddressType,
        address: &str,
    ) -> Result<Receipt<()>, EscrowError> {
        let mut registry = self.registry.write();
        registry
            .register(account, network, address_type, address)
            .map_err(|e| {
                escrow_telemetry::log_event!(
                    warn,
                    SUBSYSTEM,
                    "Address registration rejected",
                    account = %hex::encode(account),
                    reason = %e
                );
                e
            })?;
        let address = registry.lookup(&account, network)?.clone();
        drop(registry);

        escrow_telemetry::log_event!(
            info,
            SUBSYSTEM,
            "Address registered",
            account = %hex::encode(account),
            network = %network,
            address = %address
        );

        Ok(self.emit(
            (),
            vec![EscrowEvent::AddressRegistered {
                account,
                network,
                address,
            }],
        ))
    }

    fn lookup_address(
        &self,
        account: &AccountId,
        network: Network,
    ) -> Result<ExternalAddress, EscrowError> {
        self.registry.read().lookup(account, network).cloned()
    }

    fn transfer_in(
        &self,
        sender: AccountId,
        params: TransferInParams,
    ) -> Result<Receipt<TransferId>, EscrowError> {
        let _span = escrow_telemetry::subsystem_span!(
            "transfer_in",
            subsystem = SUBSYSTEM,
            amount = %params.amount
        )
        .entered();

        let now = self.clock.now();
        let claim_btc_addr = self.validate_transfer_in(&params, now).map_err(|e| {
            escrow_telemetry::log_event!(warn, SUBSYSTEM, "Transfer-in rejected", reason = %e);
            e
        })?;
        let refund_btc_addr = self
            .registry
            .read()
            .lookup(&sender, params.network)
            .ok()
            .cloned();

        let mut store = self.store.write();
        let nonce = store.sequence();
        let transfer_id = derive_transfer_id(
            &self.config.domain_key,
            &TransferIdInput {
                sender: &sender,
                receiver: &params.receiver,
                token: &params.token,
                amount: params.amount,
                hash_lock: &params.hash_lock,
                time_lock: params.time_lock,
                secret_length: params.secret_length,
            },
            nonce,
        );
        if store.contains(&transfer_id) {
            return Err(EscrowError::DuplicateTransferId(transfer_id));
        }

        self.ledger
            .debit(&sender, &params.token, params.amount)
            .map_err(|e| {
                escrow_telemetry::log_transfer_event!(
                    warn,
                    SUBSYSTEM,
                    "Debit refused",
                    transfer_id,
                    reason = %e
                );
                EscrowError::from(e)
            })?;

        let transfer = Transfer::new(TransferParams {
            id: transfer_id,
            sender,
            receiver: params.receiver,
            token: params.token,
            amount: params.amount,
            hash_lock: params.hash_lock,
            secret_length: params.secret_length,
            time_lock: params.time_lock,
            refund_btc_addr: refund_btc_addr.clone(),
            claim_btc_addr,
            created_at: now,
            nonce,
        });

        if let Err(create_err) = store.create(transfer_id, transfer) {
            // Undo the debit so the failed call has no effect.
            self.pay_out(&Payout {
                transfer_id,
                beneficiary: sender,
                token: params.token,
                amount: params.amount,
            })?;
            return Err(create_err);
        }

        escrow_telemetry::log_transfer_event!(
            info,
            SUBSYSTEM,
            "Transfer locked",
            transfer_id,
            time_lock = params.time_lock,
            refund_address = refund_btc_addr.is_some()
        );

        Ok(self.emit(
            transfer_id,
            vec![EscrowEvent::NewTransferIn {
                transfer_id,
                sender,
                receiver: params.receiver,
                token: params.token,
                amount: params.amount,
                refund_btc_addr,
            }],
        ))
    }

    fn claim(&self, transfer_id: &TransferId, preimage: &[u8]) -> Result<Receipt<Payout>, EscrowError> {
        let _span = escrow_telemetry::subsystem_span!(
            "claim",
            subsystem = SUBSYSTEM,
            transfer_id = %transfer_id
        )
        .entered();

        let now = self.clock.now();
        let mut store = self.store.write();
        let payout = store
            .transition_to_claimed(transfer_id, preimage, now)
            .map_err(|e| {
                escrow_telemetry::log_transfer_event!(warn, SUBSYSTEM, "Claim rejected", transfer_id, reason = %e);
                e
            })?;
        self.pay_out(&payout)?;

        escrow_telemetry::log_transfer_event!(
            info,
            SUBSYSTEM,
            "Transfer claimed",
            transfer_id,
            amount = %payout.amount
        );

        let receipt = self.emit(
            payout,
            vec![EscrowEvent::Claimed {
                transfer_id: *transfer_id,
                preimage: preimage.to_vec(),
            }],
        );
        drop(store);
        Ok(receipt)
    }

    fn refund(&self, transfer_id: &TransferId) -> Result<Receipt<Payout>, EscrowError> {
        let _span = escrow_telemetry::subsystem_span!(
            "refund",
            subsystem = SUBSYSTEM,
            transfer_id = %transfer_id
        )
        .entered();

        let now = self.clock.now();
        let mut store = self.store.write();
        let payout = store.transition_to_refunded(transfer_id, now).map_err(|e| {
            escrow_telemetry::log_transfer_event!(warn, SUBSYSTEM, "Refund rejected", transfer_id, reason = %e);
            e
        })?;
        self.pay_out(&payout)?;

        escrow_telemetry::log_transfer_event!(
            info,
            SUBSYSTEM,
            "Transfer refunded",
            transfer_id,
            amount = %payout.amount
        );

        let receipt = self.emit(
            payout,
            vec![EscrowEvent::Refunded {
                transfer_id: *transfer_id,
            }],
        );
        drop(store);
        Ok(receipt)
    }

    fn get_transfer(&self, transfer_id: &TransferId) -> Result<Transfer, EscrowError> {
        self.store.read().get(transfer_id).cloned()
    }
}
