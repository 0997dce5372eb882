//! The signed-in user record, stored as JSON under the `user` key, and the
//! store-backed implementation of the core's `UserDirectory` contract.

use papermint_shared::constants::KEY_CURRENT_USER;
use papermint_shared::error::LedgerError;
use papermint_shared::models::User;
use papermint_shared::types::UserId;

use papermint_core::ledger::UserDirectory;

use crate::database::{Database, SharedDatabase};
use crate::error::Result;
use crate::ledger::lock;

impl Database {
    /// Persist `user` as the current session identity.
    pub fn save_current_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.kv_put(KEY_CURRENT_USER, &json)?;
        Ok(())
    }

    /// Load the current session identity, if someone is signed in.
    pub fn load_current_user(&self) -> Result<Option<User>> {
        match self.kv_get(KEY_CURRENT_USER)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Forget the current session identity.  Returns `true` if one was
    /// stored.
    pub fn clear_current_user(&self) -> Result<bool> {
        self.kv_delete(KEY_CURRENT_USER)
    }
}

impl UserDirectory for SharedDatabase {
    fn record_tool_use(&mut self, user: UserId, coins: u64) -> std::result::Result<User, LedgerError> {
        let db = lock(self)?;
        let mut current = db
            .load_current_user()
            .map_err(LedgerError::from)?
            .filter(|u| u.id == user)
            .ok_or(LedgerError::NotAuthenticated)?;

        current.total_earnings += coins;
        current.tools_used += 1;
        db.save_current_user(&current).map_err(LedgerError::from)?;
        Ok(current)
    }
}
