//! Domain model structs shared between the core, the store and the app layer.
//!
//! Persisted types (`User`, `Transaction`, `LedgerState`) derive `Serialize`
//! and `Deserialize`; session-scoped types (`UploadItem`, `ProcessedArtifact`)
//! are ephemeral and never written to storage.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{TransactionId, UserId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The signed-in user.  Stats are only ever bumped through the ledger's
/// earn path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// URL of a generated avatar image.
    pub avatar_url: String,
    /// When the account was created.
    pub joined_at: DateTime<Utc>,
    /// Lifetime coins earned across all tool uses.
    pub total_earnings: u64,
    /// Number of tool uses (counts uses, not distinct tools).
    pub tools_used: u64,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earned,
    Spent,
}

/// One immutable entry in a user's transaction log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Always positive; the sign is carried by `kind`.
    pub amount: u64,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// A user's coin balance together with the transaction log, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerState {
    pub balance: u64,
    pub transactions: Vec<Transaction>,
}

impl LedgerState {
    /// The state of a user who has never earned or spent a coin.
    pub fn zero() -> Self {
        Self {
            balance: 0,
            transactions: Vec::new(),
        }
    }

    /// Recompute the balance from the log: earned minus spent.
    ///
    /// Returns `None` if the log would drive the balance negative at any
    /// point when replayed oldest-first, which no well-formed ledger does.
    pub fn replayed_balance(&self) -> Option<u64> {
        let mut balance: u64 = 0;
        for tx in self.transactions.iter().rev() {
            match tx.kind {
                TransactionKind::Earned => balance = balance.checked_add(tx.amount)?,
                TransactionKind::Spent => balance = balance.checked_sub(tx.amount)?,
            }
        }
        Some(balance)
    }

    /// Whether the stored balance matches a replay of the log.
    pub fn is_consistent(&self) -> bool {
        self.replayed_balance() == Some(self.balance)
    }

    /// Id of the newest transaction, if any.  The log is newest-first, so
    /// this is the first entry.
    pub fn newest_transaction_id(&self) -> Option<TransactionId> {
        self.transactions.first().map(|tx| tx.id)
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::zero()
    }
}

// ---------------------------------------------------------------------------
// Session items
// ---------------------------------------------------------------------------

/// A file accepted into a processing session.  Held only while the session
/// is in its upload phase; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    pub name: String,
    pub size_bytes: u64,
    /// Opaque raw content handle.
    pub data: Bytes,
}

/// The output record produced for one input file after processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedArtifact {
    pub name: String,
    pub size_bytes: u64,
    /// Opaque download handle.
    pub data: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: u64, kind: TransactionKind, amount: u64) -> Transaction {
        Transaction {
            id: TransactionId(id),
            kind,
            amount,
            description: String::new(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_zero_state_consistent() {
        assert!(LedgerState::zero().is_consistent());
    }

    #[test]
    fn test_replay_matches_balance() {
        let state = LedgerState {
            balance: 7,
            transactions: vec![
                tx(3, TransactionKind::Spent, 5),
                tx(2, TransactionKind::Earned, 6),
                tx(1, TransactionKind::Earned, 6),
            ],
        };
        assert_eq!(state.replayed_balance(), Some(7));
        assert!(state.is_consistent());
    }

    #[test]
    fn test_overspent_log_is_inconsistent() {
        let state = LedgerState {
            balance: 0,
            transactions: vec![tx(1, TransactionKind::Spent, 5)],
        };
        assert_eq!(state.replayed_balance(), None);
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_newest_transaction_id_is_front() {
        let state = LedgerState {
            balance: 12,
            transactions: vec![
                tx(9, TransactionKind::Earned, 6),
                tx(4, TransactionKind::Earned, 6),
            ],
        };
        assert_eq!(state.newest_transaction_id(), Some(TransactionId(9)));
    }
}
