//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees
//! that migrations are run before any other operation.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::migrations;

/// Handle shared between the ledger, the auth service and the command layer.
/// `rusqlite::Connection` is `Send` but not `Sync`, hence the mutex.
///
/// This is a newtype over `Arc<Mutex<Database>>` (rather than an alias) so
/// the store crate can implement the core's `LedgerStore` / `UserDirectory`
/// traits for it without violating the orphan rule.
#[derive(Clone)]
pub struct SharedDatabase(Arc<Mutex<Database>>);

impl SharedDatabase {
    /// Lock the underlying database, mirroring `Mutex::lock`.
    pub fn lock(&self) -> std::sync::LockResult<std::sync::MutexGuard<'_, Database>> {
        self.0.lock()
    }
}

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/papermint/papermint.db`
    /// - macOS:   `~/Library/Application Support/com.papermint.papermint/papermint.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\papermint\papermint\data\papermint.db`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "papermint", "papermint").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("papermint.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        // Run schema migrations.
        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    ///
    /// Callers should prefer the typed helpers, but direct access is
    /// occasionally needed for transactions or ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Return a mutable reference to the underlying connection.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }

    /// Wrap the database in the shared handle used across threads.
    pub fn into_shared(self) -> SharedDatabase {
        SharedDatabase(Arc::new(Mutex::new(self)))
    }
}
