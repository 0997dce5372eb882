use thiserror::Error;

/// Errors produced by the coin ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Earn/spend called with a zero amount.  Unreachable through the UI
    /// (amounts come from the static catalogs) but checked anyway.
    #[error("Amount must be a positive number of coins")]
    InvalidAmount,

    /// Spend exceeds the current balance.  No mutation is performed.
    #[error("Insufficient coin balance: need {required}, have {available}")]
    InsufficientBalance { required: u64, available: u64 },

    /// Ledger operation attempted with no signed-in user.
    #[error("No user is signed in")]
    NotAuthenticated,

    /// The persistence write failed; the in-memory state was rolled back.
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

/// Errors produced when files enter a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// File extension is not on the accepted-type allow-list.
    #[error("Unsupported file type: {name}")]
    UnsupportedFileType { name: String },

    /// Adding the files would exceed the per-session cap.  Files accepted
    /// before the cap was hit are kept.
    #[error("Too many files: added {added}, rejected {rejected} (limit {limit})")]
    TooManyFiles {
        added: usize,
        rejected: usize,
        limit: usize,
    },
}

/// Errors produced by the processing session state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Processing requested with an empty item list.
    #[error("No files selected")]
    NoFilesSelected,

    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// Items cannot change while processing or after completion.
    #[error("Files cannot be changed right now")]
    Busy,

    /// The session was closed; no further mutation is permitted.
    #[error("Session is closed")]
    Closed,
}
