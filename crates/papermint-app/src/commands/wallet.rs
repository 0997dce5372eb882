//! Wallet commands: the balance view and reward redemption.

use serde::Serialize;
use tracing::info;

use papermint_shared::catalog::{redemption_description, reward_by_id, REWARDS};
use papermint_shared::models::{Transaction, TransactionKind};

use crate::commands::catalog::RewardDto;
use crate::error::{AppError, Result};
use crate::events::AppEvent;
use crate::state::App;

/// One ledger entry as shown in the history list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub amount: u64,
    pub description: String,
    pub timestamp: String,
}

impl From<&Transaction> for TransactionDto {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.0,
            kind: match tx.kind {
                TransactionKind::Earned => "earned",
                TransactionKind::Spent => "spent",
            },
            amount: tx.amount,
            description: tx.description.clone(),
            timestamp: tx.timestamp.to_rfc3339(),
        }
    }
}

/// Everything the wallet page needs in one payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDto {
    pub balance: u64,
    pub total_earnings: u64,
    /// Newest first.
    pub transactions: Vec<TransactionDto>,
    pub rewards: Vec<RewardDto>,
}

fn overview_locked(guard: &crate::state::AppState) -> Result<WalletDto> {
    let user = guard.user.as_ref().ok_or(AppError::NotSignedIn)?;
    let balance = guard.ledger.balance();
    Ok(WalletDto {
        balance,
        total_earnings: user.total_earnings,
        transactions: guard
            .ledger
            .transactions()
            .iter()
            .map(TransactionDto::from)
            .collect(),
        rewards: REWARDS
            .iter()
            .map(|reward| RewardDto::resolve(reward, balance))
            .collect(),
    })
}

/// The wallet page payload for the signed-in user.
pub fn overview(app: &App) -> Result<WalletDto> {
    let guard = app.lock_state()?;
    overview_locked(&guard)
}

/// Redeem a reward, debiting its coin price.
///
/// The whole check-debit-persist sequence runs under the state lock, so a
/// second redeem submitted while the first is in flight sees the already
/// debited balance and fails cleanly when it no longer covers the price.
pub fn redeem(app: &App, reward_id: &str) -> Result<WalletDto> {
    let reward =
        reward_by_id(reward_id).ok_or_else(|| AppError::UnknownReward(reward_id.to_string()))?;

    let (wallet, description) = {
        let mut guard = app.lock_state()?;
        if guard.user.is_none() {
            return Err(AppError::NotSignedIn);
        }
        let description = redemption_description(reward);
        let balance = guard.ledger.spend(reward.coins, &description)?;
        info!(reward = reward.id, coins = reward.coins, balance, "reward redeemed");
        (overview_locked(&guard)?, description)
    };

    app.emit(AppEvent::CoinsSpent {
        amount: reward.coins,
        description,
        balance: wallet.balance,
    });
    Ok(wallet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{auth, sessions};
    use crate::state::App;
    use bytes::Bytes;
    use papermint_core::time::NoDelay;
    use papermint_core::transform::SimulatedCompression;
    use papermint_shared::error::LedgerError;
    use papermint_store::Database;
    use std::sync::Arc;

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        let app = App::new(
            db,
            Arc::new(NoDelay),
            Arc::new(SimulatedCompression::default()),
        );
        auth::login(&app, "mira@example.com").unwrap();
        (dir, app)
    }

    async fn run_tool(app: &App, tool_id: &str) {
        sessions::open_session(app, tool_id).unwrap();
        sessions::add_files(app, vec![("doc.pdf".to_string(), Bytes::from_static(b"x"))]).unwrap();
        sessions::process_files(app).await.unwrap();
    }

    #[tokio::test]
    async fn test_overview_reflects_ledger() {
        let (_dir, app) = app();
        run_tool(&app, "ocr-text").await; // 12 coins

        let wallet = overview(&app).unwrap();
        assert_eq!(wallet.balance, 12);
        assert_eq!(wallet.total_earnings, 12);
        assert_eq!(wallet.transactions.len(), 1);
        assert_eq!(wallet.transactions[0].kind, "earned");
        assert_eq!(wallet.transactions[0].description, "Used OCR Text Recognition");
        assert!(wallet.rewards.iter().all(|r| !r.affordable));
    }

    #[tokio::test]
    async fn test_redeem_debits_and_logs() {
        let (_dir, app) = app();
        for _ in 0..9 {
            run_tool(&app, "ocr-text").await;
        }
        // 108 coins, enough for google-play-50 at 100.

        let wallet = redeem(&app, "google-play-50").unwrap();
        assert_eq!(wallet.balance, 8);
        assert_eq!(wallet.transactions[0].kind, "spent");
        assert_eq!(
            wallet.transactions[0].description,
            "Redeemed Google Play Gift Card (₹50)"
        );
        // Lifetime earnings are untouched by spending.
        assert_eq!(wallet.total_earnings, 108);
    }

    #[tokio::test]
    async fn test_redeem_insufficient_balance() {
        let (_dir, app) = app();
        run_tool(&app, "rotate-pdf").await; // 2 coins

        let err = redeem(&app, "upi-50").unwrap_err();
        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::InsufficientBalance {
                required: 120,
                available: 2
            })
        ));
        assert_eq!(overview(&app).unwrap().balance, 2);
    }

    #[test]
    fn test_redeem_unknown_reward() {
        let (_dir, app) = app();
        assert!(matches!(
            redeem(&app, "free-money"),
            Err(AppError::UnknownReward(_))
        ));
    }

    #[test]
    fn test_overview_requires_sign_in() {
        let (_dir, app) = app();
        auth::logout(&app).unwrap();
        assert!(matches!(overview(&app), Err(AppError::NotSignedIn)));
    }
}
