//! Command functions invoked by the UI shell.
//!
//! Each sub-module groups related commands by domain.  Every function takes
//! the assembled [`App`](crate::state::App) and returns a serialisable DTO
//! or a recoverable [`AppError`](crate::error::AppError).

pub mod auth;
pub mod catalog;
pub mod downloads;
pub mod profile;
pub mod sessions;
pub mod wallet;
