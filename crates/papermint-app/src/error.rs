use thiserror::Error;

use papermint_shared::error::{IntakeError, LedgerError, SessionError};
use papermint_store::StoreError;

/// Errors surfaced to the UI layer by the command functions.
///
/// Everything here is recoverable; the kind tag tells the shell what to
/// show and whether the triggering control should stay enabled.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No user is signed in")]
    NotSignedIn,

    #[error("No processing session is open")]
    NoSession,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown reward: {0}")]
    UnknownReward(String),

    #[error("No artifact at index {0}")]
    NoSuchArtifact(usize),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Application state lock poisoned")]
    StatePoisoned,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
