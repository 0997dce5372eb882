//! # papermint-app
//!
//! Orchestration layer: wires the [`papermint_core`] ledger and session
//! machine to the SQLite store, a tokio timer and a broadcast event stream,
//! and exposes the command functions a UI shell would invoke.

pub mod commands;
pub mod error;
pub mod events;
pub mod format;
pub mod state;
pub mod timer;

use papermint_shared::constants::APP_NAME;
use tracing_subscriber::{fmt, EnvFilter};

pub use error::AppError;
pub use state::App;

/// Initialise structured logging for the application process.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("papermint_app=debug,papermint_core=debug,papermint_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Starting {APP_NAME}");
}
