//! In-Memory Token Ledger Adapter
//!
//! Implements the `TokenLedger` port over in-process balance tables.

use crate::domain::{AccountId, Amount, LedgerError, TokenId};
use crate::ports::outbound::TokenLedger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// In-memory token custody.
///
/// Balances and escrow holdings live behind a single lock so each debit and
/// credit is atomic.
#[derive(Default)]
pub struct InMemoryTokenLedger {
    books: RwLock<Books>,
    /// Fault injection: reject every credit while set.
    fail_credits: AtomicBool,
}

#[derive(Default)]
struct Books {
    balances: HashMap<(AccountId, TokenId), Amount>,
    escrow: HashMap<TokenId, Amount>,
}

impl InMemoryTokenLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `account` `amount` fresh tokens.
    pub fn mint(&self, account: AccountId, token: TokenId, amount: Amount) -> Result<(), LedgerError> {
        let mut books = self.books.write();
        let balance = books.balances.entry((account, token)).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Balance of `account` in `token`.
    pub fn balance_of(&self, account: &AccountId, token: &TokenId) -> Amount {
        self.books
            .read()
            .balances
            .get(&(*account, *token))
            .copied()
            .unwrap_or(0)
    }

    /// Make every subsequent credit fail (or succeed again).
    pub fn set_fail_credits(&self, fail: bool) {
        self.fail_credits.store(fail, Ordering::SeqCst);
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn debit(&self, from: &AccountId, token: &TokenId, amount: Amount) -> Result<(), LedgerError> {
        let mut books = self.books.write();
        let available = books.balances.get(&(*from, *token)).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        let held = books.escrow.get(token).copied().unwrap_or(0);
        let new_held = held.checked_add(amount).ok_or(LedgerError::Overflow)?;

        books.balances.insert((*from, *token), available - amount);
        books.escrow.insert(*token, new_held);

        debug!("[ledger] debit {} from 0x{}", amount, hex::encode(from));
        Ok(())
    }

    fn credit(&self, to: &AccountId, token: &TokenId, amount: Amount) -> Result<(), LedgerError> {
        if self.fail_credits.load(Ordering::SeqCst) {
            warn!("[ledger] credit rejected by fault injection");
            return Err(LedgerError::Unavailable("credits disabled".to_string()));
        }

        let mut books = self.books.write();
        let held = books.escrow.get(token).copied().unwrap_or(0);
        if held < amount {
            return Err(LedgerError::EscrowShortfall {
                required: amount,
                held,
            });
        }
        let balance = books.balances.get(&(*to, *token)).copied().unwrap_or(0);
        let new_balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;

        books.escrow.insert(*token, held - amount);
        books.balances.insert((*to, *token), new_balance);

        debug!("[ledger] credit {} to 0x{}", amount, hex::encode(to));
        Ok(())
    }

    fn escrow_balance(&self, token: &TokenId) -> Amount {
        self.books.read().escrow.get(token).copied().unwrap_or(0)
    }
}
