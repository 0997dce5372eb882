//! Profile page commands: stats, achievements, profile edits.

use serde::Serialize;
use tracing::info;

use papermint_shared::achievements;

use crate::commands::auth::UserDto;
use crate::error::{AppError, Result};
use crate::state::App;

/// One achievement row, resolved against the signed-in user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDto {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub requirement: &'static str,
    pub unlocked: bool,
}

/// The profile page payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub user: UserDto,
    /// Current spendable balance, distinct from lifetime earnings.
    pub balance: u64,
    pub achievements: Vec<AchievementDto>,
}

/// Everything the profile page shows.
pub fn overview(app: &App) -> Result<ProfileDto> {
    let guard = app.lock_state()?;
    let user = guard.user.as_ref().ok_or(AppError::NotSignedIn)?;

    let achievements = achievements::evaluate(user, guard.ledger.transactions())
        .into_iter()
        .map(|status| AchievementDto {
            id: status.achievement.id,
            name: status.achievement.name,
            description: status.achievement.description,
            requirement: status.achievement.requirement,
            unlocked: status.unlocked,
        })
        .collect();

    Ok(ProfileDto {
        user: UserDto::from(user),
        balance: guard.ledger.balance(),
        achievements,
    })
}

/// Update the display name and/or email.  Blank or omitted fields keep
/// their current value; stats and identity never change here.
pub fn update_profile(app: &App, name: Option<&str>, email: Option<&str>) -> Result<UserDto> {
    let mut guard = app.lock_state()?;
    let mut user = guard.user.clone().ok_or(AppError::NotSignedIn)?;

    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        user.name = name.to_string();
    }
    if let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) {
        user.email = email.to_string();
    }

    guard
        .db
        .lock()
        .map_err(|_| AppError::StatePoisoned)?
        .save_current_user(&user)?;
    info!(user = %user.id, "profile updated");

    let dto = UserDto::from(&user);
    guard.user = Some(user);
    Ok(dto)
}
