//! # papermint-store
//!
//! Local persistence for the Papermint application, backed by SQLite.
//!
//! Everything is stored in a single key-value table mirroring the logical
//! layout the rest of the system speaks: `user` for the signed-in identity,
//! `coins_<userId>` for a balance, `transactions_<userId>` for a transaction
//! log.  The crate exposes a synchronous [`Database`] handle plus
//! implementations of the core's `LedgerStore` and `UserDirectory`
//! collaborator traits.

pub mod database;
pub mod kv;
pub mod ledger;
pub mod migrations;
pub mod users;

mod error;

pub use database::Database;
pub use error::StoreError;
