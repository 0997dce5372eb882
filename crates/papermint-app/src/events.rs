//! Events pushed to the UI layer over a broadcast channel.

use serde::Serialize;
use tokio::sync::broadcast;

use papermint_shared::types::UserId;

/// Capacity of the event channel; slow receivers lose oldest events.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum AppEvent {
    SignedIn {
        user_id: UserId,
        name: String,
    },
    SignedOut,
    CoinsEarned {
        amount: u64,
        tool: String,
        balance: u64,
    },
    CoinsSpent {
        amount: u64,
        description: String,
        balance: u64,
    },
    SessionCompleted {
        tool: String,
        artifacts: usize,
    },
    DownloadStarted {
        name: String,
    },
}

/// Fire an event, tolerating the case where no UI is subscribed yet.
pub fn emit(tx: &broadcast::Sender<AppEvent>, event: AppEvent) {
    if tx.send(event).is_err() {
        tracing::debug!("no event subscribers");
    }
}
