//! Application state shared across all command functions.
//!
//! [`AppState`] is wrapped in `Arc<Mutex<_>>` inside [`App`]; every command
//! locks it for the full read-modify-persist sequence, which is also what
//! keeps rapid double-submissions (e.g. two redeem clicks) from interleaving.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;

use papermint_core::ledger::Ledger;
use papermint_core::session::ProcessingSession;
use papermint_core::time::Timer;
use papermint_core::transform::{SimulatedCompression, Transform};
use papermint_shared::models::User;
use papermint_store::database::SharedDatabase;
use papermint_store::Database;

use crate::error::{AppError, Result};
use crate::events::{self, AppEvent, EVENT_CHANNEL_CAPACITY};
use crate::timer::TokioTimer;

/// Central application state.
pub struct AppState {
    /// Handle to the local SQLite database.
    pub db: SharedDatabase,

    /// The signed-in user, mirrored from the `user` storage key.
    /// `None` while signed out.
    pub user: Option<User>,

    /// Coin ledger bound to the signed-in user.
    pub ledger: Ledger<SharedDatabase>,

    /// The processing session currently on screen, if any.
    pub session: Option<ProcessingSession>,

    /// Bumped whenever `session` is replaced or dropped.  A processing run
    /// that started under an older epoch must not complete against the
    /// session that took its place.
    pub(crate) session_epoch: u64,
}

impl AppState {
    pub fn new(db: SharedDatabase) -> Self {
        Self {
            ledger: Ledger::new(db.clone()),
            db,
            user: None,
            session: None,
            session_epoch: 0,
        }
    }

    /// Re-read the stored user after the ledger bumped their stats.
    pub(crate) fn refresh_user(&mut self) -> Result<()> {
        let stored = self
            .db
            .lock()
            .map_err(|_| AppError::StatePoisoned)?
            .load_current_user()?;
        self.user = stored;
        Ok(())
    }
}

/// The assembled application: state plus the injected collaborators.
#[derive(Clone)]
pub struct App {
    state: Arc<Mutex<AppState>>,
    pub(crate) timer: Arc<dyn Timer>,
    pub(crate) transform: Arc<dyn Transform>,
    events: broadcast::Sender<AppEvent>,
}

impl App {
    /// Assemble an application around an open database and explicit
    /// collaborators.  Tests inject an instant timer here.
    pub fn new(db: Database, timer: Arc<dyn Timer>, transform: Arc<dyn Transform>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(AppState::new(db.into_shared()))),
            timer,
            transform,
            events,
        }
    }

    /// Open the default on-disk database with the production collaborators.
    pub fn open_default() -> Result<Self> {
        let db = Database::new()?;
        Ok(Self::new(
            db,
            Arc::new(TokioTimer),
            Arc::new(SimulatedCompression::default()),
        ))
    }

    /// Subscribe to application events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    pub(crate) fn lock_state(&self) -> Result<MutexGuard<'_, AppState>> {
        self.state.lock().map_err(|_| AppError::StatePoisoned)
    }

    pub(crate) fn emit(&self, event: AppEvent) {
        events::emit(&self.events, event);
    }
}
