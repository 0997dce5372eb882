//! The coin ledger: per-user balance plus an ordered transaction log.
//!
//! The ledger owns the in-memory state for at most one user at a time and
//! writes through a [`LedgerStore`] on every mutation.  Writes are fail
//! closed: if the store rejects the new state, the in-memory state is left
//! untouched, so the two invariants always hold:
//!
//! - `balance == sum(earned) - sum(spent)` over the log
//! - `balance >= 0` (a spend that would break this is rejected whole)

use chrono::Utc;
use tracing::{debug, info};

use papermint_shared::error::LedgerError;
use papermint_shared::models::{LedgerState, Transaction, TransactionKind, User};
use papermint_shared::types::{TransactionId, UserId};

/// Persistence collaborator, keyed by user id.
///
/// Absence of stored state is not a failure: `load` for an unknown user
/// returns [`LedgerState::zero`].  Implementations map their own failures to
/// [`LedgerError::PersistenceUnavailable`].
pub trait LedgerStore {
    fn load(&self, user: UserId) -> Result<LedgerState, LedgerError>;
    fn save(&mut self, user: UserId, state: &LedgerState) -> Result<(), LedgerError>;
    fn clear(&mut self, user: UserId) -> Result<(), LedgerError>;
}

/// Identity collaborator: the only thing the ledger needs from it is the
/// ability to bump the user's lifetime stats after a successful earn.
pub trait UserDirectory {
    /// Add `coins` to `total_earnings` and 1 to `tools_used`, persist the
    /// user, and return the updated record.
    fn record_tool_use(&mut self, user: UserId, coins: u64) -> Result<User, LedgerError>;
}

/// Coin ledger bound to the currently signed-in user.
pub struct Ledger<S: LedgerStore> {
    store: S,
    active: Option<ActiveLedger>,
}

struct ActiveLedger {
    user: UserId,
    state: LedgerState,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            active: None,
        }
    }

    /// Bind the ledger to `user`, loading their persisted state (or the
    /// zero state if they have none).
    pub fn load(&mut self, user: UserId) -> Result<&LedgerState, LedgerError> {
        let state = self.store.load(user)?;
        debug!(%user, balance = state.balance, transactions = state.transactions.len(), "ledger loaded");
        let active = self.active.insert(ActiveLedger { user, state });
        Ok(&active.state)
    }

    /// Detach from the current user without touching their stored state.
    pub fn detach(&mut self) {
        self.active = None;
    }

    /// The bound user, if any.
    pub fn user(&self) -> Option<UserId> {
        self.active.as_ref().map(|a| a.user)
    }

    /// Current balance; zero when no user is bound.
    pub fn balance(&self) -> u64 {
        self.active.as_ref().map(|a| a.state.balance).unwrap_or(0)
    }

    /// Transaction log, newest first; empty when no user is bound.
    pub fn transactions(&self) -> &[Transaction] {
        self.active
            .as_ref()
            .map(|a| a.state.transactions.as_slice())
            .unwrap_or(&[])
    }

    /// Immutable copy of the current state for the UI layer.
    pub fn snapshot(&self) -> LedgerState {
        self.active
            .as_ref()
            .map(|a| a.state.clone())
            .unwrap_or_else(LedgerState::zero)
    }

    /// Credit `amount` coins for one use of `tool_name`.
    ///
    /// Appends an `Earned` transaction described as `Used <tool_name>`,
    /// persists the new state, then bumps the user's lifetime stats through
    /// `users`.  Returns the updated balance.
    pub fn earn<D: UserDirectory>(
        &mut self,
        amount: u64,
        tool_name: &str,
        users: &mut D,
    ) -> Result<u64, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let active = self.active.as_mut().ok_or(LedgerError::NotAuthenticated)?;

        let next = appended(
            &active.state,
            TransactionKind::Earned,
            amount,
            format!("Used {tool_name}"),
        );
        // Persist before committing; a failed write leaves `state` as it was.
        self.store.save(active.user, &next)?;
        active.state = next;

        let user = users.record_tool_use(active.user, amount)?;
        info!(
            user = %active.user,
            amount,
            balance = active.state.balance,
            total_earnings = user.total_earnings,
            tool = tool_name,
            "coins earned"
        );
        Ok(active.state.balance)
    }

    /// Debit `amount` coins, e.g. for a reward redemption.
    ///
    /// Rejects with [`LedgerError::InsufficientBalance`] when the balance
    /// does not cover `amount`; the rejection is side-effect free.  Returns
    /// the updated balance.
    pub fn spend(&mut self, amount: u64, description: &str) -> Result<u64, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let active = self.active.as_mut().ok_or(LedgerError::NotAuthenticated)?;
        if active.state.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: active.state.balance,
            });
        }

        let next = appended(
            &active.state,
            TransactionKind::Spent,
            amount,
            description.to_string(),
        );
        self.store.save(active.user, &next)?;
        active.state = next;

        info!(
            user = %active.user,
            amount,
            balance = active.state.balance,
            "coins spent"
        );
        Ok(active.state.balance)
    }

    /// Delete the bound user's stored balance and log, then detach.
    pub fn logout(&mut self) -> Result<(), LedgerError> {
        if let Some(active) = self.active.take() {
            self.store.clear(active.user)?;
            info!(user = %active.user, "ledger cleared on logout");
        }
        Ok(())
    }
}

/// Build the successor state with one transaction prepended.  Balance and
/// log always change together.
fn appended(
    state: &LedgerState,
    kind: TransactionKind,
    amount: u64,
    description: String,
) -> LedgerState {
    let tx = Transaction {
        id: next_transaction_id(state),
        kind,
        amount,
        description,
        timestamp: Utc::now(),
    };
    let balance = match kind {
        TransactionKind::Earned => state.balance.saturating_add(amount),
        // Callers check sufficiency first; saturation is unreachable.
        TransactionKind::Spent => state.balance.saturating_sub(amount),
    };
    let mut transactions = Vec::with_capacity(state.transactions.len() + 1);
    transactions.push(tx);
    transactions.extend_from_slice(&state.transactions);
    LedgerState {
        balance,
        transactions,
    }
}

/// Millisecond-clock id, bumped past the newest recorded id so two
/// transactions within the same millisecond still order strictly.
fn next_transaction_id(state: &LedgerState) -> TransactionId {
    let now = Utc::now().timestamp_millis().max(0) as u64;
    match state.newest_transaction_id() {
        Some(TransactionId(newest)) if newest >= now => TransactionId(newest + 1),
        _ => TransactionId(now),
    }
}
