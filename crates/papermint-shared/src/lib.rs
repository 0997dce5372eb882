//! # papermint-shared
//!
//! Domain models, identifiers, error taxonomy, constants and static catalogs
//! shared by every Papermint crate.  Nothing in here performs I/O; the structs
//! derive `Serialize`/`Deserialize` so they can be persisted by the store and
//! handed to the UI layer unchanged.

pub mod achievements;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod models;
pub mod types;
