//! Processing-session commands: open a tool, stage files, run it, reset.
//!
//! `process_files` is the only asynchronous command.  The state lock is
//! released while the simulated processing delay runs, so closing the
//! session (or signing out) during the delay simply leaves a stale ticket
//! behind; redeeming it afterwards is a no-op and nothing is credited.

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use papermint_core::intake;
use papermint_core::session::{ProcessingSession, SessionState};
use papermint_shared::catalog::tool_by_id;
use papermint_shared::constants::PROCESSING_DELAY_MS;
use papermint_shared::models::UploadItem;

use crate::error::{AppError, Result};
use crate::events::AppEvent;
use crate::format;
use crate::state::App;

/// One staged upload as shown in the file list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDto {
    pub name: String,
    pub size_bytes: u64,
    /// e.g. `1.5 MB`
    pub size: String,
}

/// One processed output as shown on the completion screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDto {
    pub name: String,
    pub size_bytes: u64,
    pub size: String,
}

/// Snapshot of the open session for the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub tool_id: &'static str,
    pub tool_name: &'static str,
    pub coins: u64,
    pub state: &'static str,
    pub files: Vec<FileDto>,
    pub artifacts: Vec<ArtifactDto>,
}

fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Upload => "upload",
        SessionState::Processing => "processing",
        SessionState::Complete => "complete",
        SessionState::Closed => "closed",
    }
}

fn snapshot_of(session: &ProcessingSession) -> SessionDto {
    SessionDto {
        tool_id: session.tool().id,
        tool_name: session.tool().name,
        coins: session.tool().coins,
        state: state_label(session.state()),
        files: session
            .items()
            .iter()
            .map(|item| FileDto {
                name: item.name.clone(),
                size_bytes: item.size_bytes,
                size: format::file_size(item.size_bytes),
            })
            .collect(),
        artifacts: session
            .artifacts()
            .iter()
            .map(|artifact| ArtifactDto {
                name: artifact.name.clone(),
                size_bytes: artifact.size_bytes,
                size: format::file_size(artifact.size_bytes),
            })
            .collect(),
    }
}

/// Open a processing session for `tool_id`, replacing any session already
/// on screen.  Requires a signed-in user.
pub fn open_session(app: &App, tool_id: &str) -> Result<SessionDto> {
    let tool = *tool_by_id(tool_id).ok_or_else(|| AppError::UnknownTool(tool_id.to_string()))?;

    let mut guard = app.lock_state()?;
    if guard.user.is_none() {
        return Err(AppError::NotSignedIn);
    }
    if let Some(previous) = guard.session.as_mut() {
        previous.close();
    }
    let session = ProcessingSession::new(tool);
    let dto = snapshot_of(&session);
    guard.session = Some(session);
    guard.session_epoch += 1;
    Ok(dto)
}

/// Snapshot the open session.
pub fn session_overview(app: &App) -> Result<SessionDto> {
    let guard = app.lock_state()?;
    let session = guard.session.as_ref().ok_or(AppError::NoSession)?;
    Ok(snapshot_of(session))
}

/// Stage in-memory files (picker or drag-and-drop payload).
///
/// Partial success surfaces as an error after the acceptable prefix was
/// kept; the returned snapshot on success reflects everything staged.
pub fn add_files(app: &App, files: Vec<(String, Bytes)>) -> Result<SessionDto> {
    let mut items = Vec::with_capacity(files.len());
    for (name, data) in files {
        items.push(intake::upload_item(&name, data)?);
    }

    let mut guard = app.lock_state()?;
    let session = guard.session.as_mut().ok_or(AppError::NoSession)?;
    session.add_items(items)?;
    Ok(snapshot_of(session))
}

/// Stage files read from disk.
pub fn add_paths(app: &App, paths: &[impl AsRef<Path>]) -> Result<SessionDto> {
    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        intake::validate_file_name(&name).map_err(AppError::Intake)?;
        let data = Bytes::from(std::fs::read(path)?);
        items.push(UploadItem {
            name,
            size_bytes: data.len() as u64,
            data,
        })
    }

    let mut guard = app.lock_state()?;
    let session = guard.session.as_mut().ok_or(AppError::NoSession)?;
    session.add_items(items)?;
    Ok(snapshot_of(session))
}

/// Remove the staged file at `index`.
pub fn remove_file(app: &App, index: usize) -> Result<SessionDto> {
    let mut guard = app.lock_state()?;
    let session = guard.session.as_mut().ok_or(AppError::NoSession)?;
    session.remove_item(index)?;
    Ok(snapshot_of(session))
}

/// Drop every staged file ("Clear All").
pub fn clear_files(app: &App) -> Result<SessionDto> {
    let mut guard = app.lock_state()?;
    let session = guard.session.as_mut().ok_or(AppError::NoSession)?;
    session.clear_items()?;
    Ok(snapshot_of(session))
}

/// Run the tool over the staged files.
///
/// Moves the session to `Processing`, waits out the simulated delay with
/// the state lock released, then completes the run: artifacts appear, the
/// tool's coins are credited once and the user's lifetime stats are bumped.
/// If the session was closed or reset while the delay ran, the completion
/// is dropped and the snapshot reflects whatever state the session is in.
pub async fn process_files(app: &App) -> Result<SessionDto> {
    let (ticket, epoch) = {
        let mut guard = app.lock_state()?;
        let epoch = guard.session_epoch;
        let session = guard.session.as_mut().ok_or(AppError::NoSession)?;
        (session.start_processing()?, epoch)
    };

    app.timer
        .delay(Duration::from_millis(PROCESSING_DELAY_MS))
        .await;

    let mut events = Vec::new();
    let dto = {
        let mut guard = app.lock_state()?;
        // A session opened after this run started must not receive its
        // completion; the stale ticket dies with the run.
        let live = guard.session_epoch == epoch;
        let session = guard.session.as_mut().ok_or(AppError::NoSession)?;
        let earn = if live {
            session.finish(ticket, app.transform.as_ref())
        } else {
            None
        };
        let completed = snapshot_of(session);

        if let Some(earn) = earn {
            let mut users = guard.db.clone();
            let balance = guard.ledger.earn(earn.coins, earn.tool_name, &mut users)?;
            guard.refresh_user()?;
            info!(tool = earn.tool_id, coins = earn.coins, balance, "tool run credited");
            events.push(AppEvent::CoinsEarned {
                amount: earn.coins,
                tool: earn.tool_name.to_string(),
                balance,
            });
            events.push(AppEvent::SessionCompleted {
                tool: earn.tool_name.to_string(),
                artifacts: completed.artifacts.len(),
            });
        }
        completed
    };

    for event in events {
        app.emit(event);
    }
    Ok(dto)
}

/// "Process More Files": back to the upload phase for another run.
pub fn reset_session(app: &App) -> Result<SessionDto> {
    let mut guard = app.lock_state()?;
    let session = guard.session.as_mut().ok_or(AppError::NoSession)?;
    session.reset()?;
    Ok(snapshot_of(session))
}

/// Close and drop the session.  Safe to call with none open.
pub fn close_session(app: &App) -> Result<()> {
    let mut guard = app.lock_state()?;
    if let Some(session) = guard.session.as_mut() {
        session.close();
    }
    guard.session = None;
    guard.session_epoch += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::auth;
    use crate::state::App;
    use papermint_core::time::NoDelay;
    use papermint_core::transform::SimulatedCompression;
    use papermint_shared::error::SessionError;
    use papermint_store::Database;
    use std::sync::Arc;

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        let app = App::new(
            db,
            Arc::new(NoDelay),
            Arc::new(SimulatedCompression::default()),
        );
        auth::login(&app, "mira@example.com").unwrap();
        (dir, app)
    }

    fn staged(name: &str, size: usize) -> (String, Bytes) {
        (name.to_string(), Bytes::from(vec![0u8; size]))
    }

    #[test]
    fn test_open_requires_known_tool_and_user() {
        let (_dir, app) = app();
        assert!(matches!(
            open_session(&app, "does-not-exist"),
            Err(AppError::UnknownTool(_))
        ));

        auth::logout(&app).unwrap();
        assert!(matches!(
            open_session(&app, "compress-pdf"),
            Err(AppError::NotSignedIn)
        ));
    }

    #[test]
    fn test_staging_files() {
        let (_dir, app) = app();
        open_session(&app, "compress-pdf").unwrap();

        let dto = add_files(&app, vec![staged("a.pdf", 1024), staged("b.pdf", 2048)]).unwrap();
        assert_eq!(dto.state, "upload");
        assert_eq!(dto.files.len(), 2);
        assert_eq!(dto.files[0].size, "1 KB");

        let dto = remove_file(&app, 0).unwrap();
        assert_eq!(dto.files.len(), 1);
        assert_eq!(dto.files[0].name, "b.pdf");

        let dto = clear_files(&app).unwrap();
        assert!(dto.files.is_empty());
    }

    #[tokio::test]
    async fn test_full_run_credits_once() {
        let (_dir, app) = app();
        open_session(&app, "compress-pdf").unwrap();
        add_files(&app, vec![staged("report.pdf", 1000)]).unwrap();

        let dto = process_files(&app).await.unwrap();
        assert_eq!(dto.state, "complete");
        assert_eq!(dto.artifacts.len(), 1);
        assert_eq!(dto.artifacts[0].name, "processed_report.pdf");
        assert_eq!(dto.artifacts[0].size_bytes, 800);

        let user = auth::restore_session(&app).unwrap().unwrap();
        assert_eq!(user.total_earnings, 4);
        assert_eq!(user.tools_used, 1);
    }

    #[tokio::test]
    async fn test_reset_then_second_run_credits_again() {
        let (_dir, app) = app();
        open_session(&app, "merge-pdf").unwrap();
        add_files(&app, vec![staged("a.pdf", 10), staged("b.pdf", 10)]).unwrap();
        process_files(&app).await.unwrap();

        let dto = reset_session(&app).unwrap();
        assert_eq!(dto.state, "upload");
        assert!(dto.files.is_empty());
        assert!(dto.artifacts.is_empty());

        add_files(&app, vec![staged("c.pdf", 10)]).unwrap();
        process_files(&app).await.unwrap();

        let user = auth::restore_session(&app).unwrap().unwrap();
        assert_eq!(user.total_earnings, 10);
        assert_eq!(user.tools_used, 2);
    }

    #[tokio::test]
    async fn test_empty_session_refuses_to_process() {
        let (_dir, app) = app();
        open_session(&app, "compress-pdf").unwrap();
        assert!(matches!(
            process_files(&app).await,
            Err(AppError::Session(SessionError::NoFilesSelected))
        ));
        assert_eq!(session_overview(&app).unwrap().state, "upload");
    }

    #[tokio::test]
    async fn test_opening_another_tool_replaces_the_session() {
        let (_dir, app) = app();
        open_session(&app, "compress-pdf").unwrap();
        add_files(&app, vec![staged("a.pdf", 10)]).unwrap();

        let dto = open_session(&app, "merge-pdf").unwrap();
        assert_eq!(dto.tool_id, "merge-pdf");
        assert!(dto.files.is_empty());
    }

    /// Timer that parks every delay until the test releases it, so a test
    /// can interleave commands with an in-flight processing run.
    struct GatedTimer {
        gate: Arc<tokio::sync::Notify>,
    }

    impl papermint_core::time::Timer for GatedTimer {
        fn delay(&self, _duration: std::time::Duration) -> futures::future::BoxFuture<'static, ()> {
            let gate = self.gate.clone();
            Box::pin(async move { gate.notified().await })
        }
    }

    #[tokio::test]
    async fn test_close_during_processing_credits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        let gate = Arc::new(tokio::sync::Notify::new());
        let app = App::new(
            db,
            Arc::new(GatedTimer { gate: gate.clone() }),
            Arc::new(SimulatedCompression::default()),
        );
        auth::login(&app, "mira@example.com").unwrap();
        open_session(&app, "ocr-text").unwrap();
        add_files(&app, vec![staged("scan.png", 100)]).unwrap();

        let worker = {
            let app = app.clone();
            tokio::spawn(async move { process_files(&app).await })
        };
        while session_overview(&app).unwrap().state != "processing" {
            tokio::task::yield_now().await;
        }

        close_session(&app).unwrap();
        gate.notify_waiters();

        let result = worker.await.unwrap();
        assert!(matches!(result, Err(AppError::NoSession)));

        // Nothing was credited for the cancelled run.
        let user = auth::restore_session(&app).unwrap().unwrap();
        assert_eq!(user.total_earnings, 0);
        assert_eq!(user.tools_used, 0);
    }

    #[tokio::test]
    async fn test_replacement_session_ignores_stale_completion() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        let gate = Arc::new(tokio::sync::Notify::new());
        let app = App::new(
            db,
            Arc::new(GatedTimer { gate: gate.clone() }),
            Arc::new(SimulatedCompression::default()),
        );
        auth::login(&app, "mira@example.com").unwrap();
        open_session(&app, "ocr-text").unwrap();
        add_files(&app, vec![staged("scan.png", 100)]).unwrap();

        let worker = {
            let app = app.clone();
            tokio::spawn(async move { process_files(&app).await })
        };
        while session_overview(&app).unwrap().state != "processing" {
            tokio::task::yield_now().await;
        }

        // Replace the session mid-run, then let the old run's delay elapse.
        open_session(&app, "compress-pdf").unwrap();
        gate.notify_waiters();

        let dto = worker.await.unwrap().unwrap();
        assert_eq!(dto.tool_id, "compress-pdf");
        assert_eq!(dto.state, "upload");
        assert!(dto.artifacts.is_empty());

        let user = auth::restore_session(&app).unwrap().unwrap();
        assert_eq!(user.total_earnings, 0);
    }

    #[test]
    fn test_close_session_is_idempotent() {
        let (_dir, app) = app();
        open_session(&app, "compress-pdf").unwrap();
        close_session(&app).unwrap();
        close_session(&app).unwrap();
        assert!(matches!(session_overview(&app), Err(AppError::NoSession)));
    }
}
