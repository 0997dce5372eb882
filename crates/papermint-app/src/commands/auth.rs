//! Sign-in, sign-up and sign-out.
//!
//! Identity is mocked: signing in mints a fresh local account rather than
//! calling any backend.  The rest of the system only relies on the stable
//! user id and the stored stats, so a real identity provider can replace
//! this module without touching the core.

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use papermint_shared::constants::AVATAR_SERVICE_URL;
use papermint_shared::models::User;
use papermint_shared::types::UserId;

use crate::error::{AppError, Result};
use crate::events::AppEvent;
use crate::state::App;

/// User payload handed to the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub joined_at: String,
    pub total_earnings: u64,
    pub tools_used: u64,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
            joined_at: user.joined_at.to_rfc3339(),
            total_earnings: user.total_earnings,
            tools_used: user.tools_used,
        }
    }
}

fn mint_user(name: &str, email: &str) -> User {
    let name = name.trim();
    User {
        id: UserId::new(),
        name: name.to_string(),
        email: email.trim().to_string(),
        avatar_url: format!("{AVATAR_SERVICE_URL}?name={name}&background=3b82f6&color=fff"),
        joined_at: Utc::now(),
        total_earnings: 0,
        tools_used: 0,
    }
}

fn establish(app: &App, user: User) -> Result<UserDto> {
    let user_id = user.id;
    let mut guard = app.lock_state()?;

    // A session opened under a previous identity must not credit this one.
    if let Some(session) = guard.session.as_mut() {
        session.close();
    }
    guard.session = None;
    guard.session_epoch += 1;

    guard
        .db
        .lock()
        .map_err(|_| AppError::StatePoisoned)?
        .save_current_user(&user)?;
    guard.ledger.load(user_id)?;
    let dto = UserDto::from(&user);

    info!(user = %user_id, name = %user.name, "signed in");
    guard.user = Some(user);
    drop(guard);

    app.emit(AppEvent::SignedIn {
        user_id,
        name: dto.name.clone(),
    });
    Ok(dto)
}

/// Sign in with an email address; the display name is its local part.
pub fn login(app: &App, email: &str) -> Result<UserDto> {
    let name = email.split('@').next().unwrap_or(email);
    establish(app, mint_user(name, email))
}

/// Create an account with an explicit display name.
pub fn signup(app: &App, name: &str, email: &str) -> Result<UserDto> {
    establish(app, mint_user(name, email))
}

/// Restore the stored session identity, if any, e.g. on app start.
pub fn restore_session(app: &App) -> Result<Option<UserDto>> {
    let mut guard = app.lock_state()?;
    let stored = guard
        .db
        .lock()
        .map_err(|_| AppError::StatePoisoned)?
        .load_current_user()?;

    match stored {
        Some(user) => {
            guard.ledger.load(user.id)?;
            let dto = UserDto::from(&user);
            info!(user = %user.id, "session restored");
            guard.user = Some(user);
            Ok(Some(dto))
        }
        None => Ok(None),
    }
}

/// Sign out: discards any open session, deletes the user's stored ledger
/// and forgets the identity.
pub fn logout(app: &App) -> Result<()> {
    let mut guard = app.lock_state()?;

    if let Some(session) = guard.session.as_mut() {
        session.close();
    }
    guard.session = None;
    guard.session_epoch += 1;

    guard.ledger.logout()?;
    guard
        .db
        .lock()
        .map_err(|_| AppError::StatePoisoned)?
        .clear_current_user()?;
    guard.user = None;
    drop(guard);

    info!("signed out");
    app.emit(AppEvent::SignedOut);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::App;
    use crate::timer::TokioTimer;
    use papermint_core::transform::SimulatedCompression;
    use papermint_store::Database;
    use std::sync::Arc;

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        let app = App::new(
            db,
            Arc::new(TokioTimer),
            Arc::new(SimulatedCompression::default()),
        );
        (dir, app)
    }

    #[test]
    fn test_login_derives_name_from_email() {
        let (_dir, app) = app();
        let user = login(&app, "mira@example.com").unwrap();
        assert_eq!(user.name, "mira");
        assert_eq!(user.email, "mira@example.com");
        assert_eq!(user.total_earnings, 0);
        assert_eq!(user.tools_used, 0);
        assert!(user.avatar_url.contains("name=mira"));
    }

    #[test]
    fn test_restore_round_trip() {
        let (_dir, app) = app();
        let created = signup(&app, "Mira", "mira@example.com").unwrap();

        let restored = restore_session(&app).unwrap().expect("stored user");
        assert_eq!(restored.id, created.id);
        assert_eq!(restored.name, "Mira");
    }

    #[test]
    fn test_logout_forgets_identity() {
        let (_dir, app) = app();
        login(&app, "mira@example.com").unwrap();
        logout(&app).unwrap();
        assert!(restore_session(&app).unwrap().is_none());
    }
}
