//! Persisted ledger state, one `coins_<userId>` / `transactions_<userId>`
//! key pair per user.
//!
//! The balance is stored as decimal text and the log as a JSON array,
//! newest first.  `save_ledger` writes both keys inside one SQLite
//! transaction so the pair can never diverge on disk.

use rusqlite::params;

use papermint_shared::constants::{KEY_COINS_PREFIX, KEY_TRANSACTIONS_PREFIX};
use papermint_shared::error::LedgerError;
use papermint_shared::models::{LedgerState, Transaction};
use papermint_shared::types::UserId;

use papermint_core::ledger::LedgerStore;

use crate::database::{Database, SharedDatabase};
use crate::error::{Result, StoreError};

/// Storage key for a user's balance.
pub fn coins_key(user: UserId) -> String {
    format!("{KEY_COINS_PREFIX}{user}")
}

/// Storage key for a user's transaction log.
pub fn transactions_key(user: UserId) -> String {
    format!("{KEY_TRANSACTIONS_PREFIX}{user}")
}

impl Database {
    /// Load the persisted ledger for `user`.  Absence of either key is not
    /// a failure; missing parts default to the zero state.
    pub fn load_ledger(&self, user: UserId) -> Result<LedgerState> {
        let balance = match self.kv_get(&coins_key(user))? {
            Some(text) => text
                .parse::<u64>()
                .map_err(|e| StoreError::Corrupt(format!("balance for {user}: {e}")))?,
            None => 0,
        };
        let transactions: Vec<Transaction> = match self.kv_get(&transactions_key(user))? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        Ok(LedgerState {
            balance,
            transactions,
        })
    }

    /// Persist balance and log together, atomically.
    pub fn save_ledger(&mut self, user: UserId, state: &LedgerState) -> Result<()> {
        let balance_text = state.balance.to_string();
        let transactions_json = serde_json::to_string(&state.transactions)?;
        let now = chrono::Utc::now().to_rfc3339();

        let tx = self.conn_mut().transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![coins_key(user), balance_text, now],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![transactions_key(user), transactions_json, now],
        )?;
        tx.commit()?;

        tracing::debug!(%user, balance = state.balance, "ledger persisted");
        Ok(())
    }

    /// Delete the persisted ledger for `user` (balance and log together).
    pub fn clear_ledger(&mut self, user: UserId) -> Result<()> {
        let tx = self.conn_mut().transaction()?;
        tx.execute("DELETE FROM kv WHERE key = ?1", params![coins_key(user)])?;
        tx.execute(
            "DELETE FROM kv WHERE key = ?1",
            params![transactions_key(user)],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl LedgerStore for SharedDatabase {
    fn load(&self, user: UserId) -> std::result::Result<LedgerState, LedgerError> {
        Ok(lock(self)?.load_ledger(user)?)
    }

    fn save(&mut self, user: UserId, state: &LedgerState) -> std::result::Result<(), LedgerError> {
        Ok(lock(self)?.save_ledger(user, state)?)
    }

    fn clear(&mut self, user: UserId) -> std::result::Result<(), LedgerError> {
        Ok(lock(self)?.clear_ledger(user)?)
    }
}

/// Lock the shared handle, mapping poisoning to a persistence failure.
pub(crate) fn lock(
    db: &SharedDatabase,
) -> std::result::Result<std::sync::MutexGuard<'_, Database>, LedgerError> {
    db.lock()
        .map_err(|e| LedgerError::PersistenceUnavailable(format!("lock poisoned: {e}")))
}
