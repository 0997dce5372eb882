//! Saving processed artifacts to disk.
//!
//! Artifacts are cloned out of the session under the lock and written with
//! the lock released; `Bytes` makes the clone a reference-count bump.
//! "Download All" staggers the writes so the UI can animate one row at a
//! time, the same cadence the completion screen uses.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use papermint_shared::constants::DOWNLOAD_STAGGER_MS;
use papermint_shared::models::ProcessedArtifact;

use crate::error::{AppError, Result};
use crate::events::AppEvent;
use crate::state::App;

fn artifact_at(app: &App, index: usize) -> Result<ProcessedArtifact> {
    let guard = app.lock_state()?;
    let session = guard.session.as_ref().ok_or(AppError::NoSession)?;
    session
        .artifacts()
        .get(index)
        .cloned()
        .ok_or(AppError::NoSuchArtifact(index))
}

fn all_artifacts(app: &App) -> Result<Vec<ProcessedArtifact>> {
    let guard = app.lock_state()?;
    let session = guard.session.as_ref().ok_or(AppError::NoSession)?;
    Ok(session.artifacts().to_vec())
}

fn write_artifact(dir: &Path, artifact: &ProcessedArtifact) -> Result<PathBuf> {
    let path = dir.join(&artifact.name);
    std::fs::write(&path, &artifact.data)?;
    info!(name = %artifact.name, bytes = artifact.size_bytes, "artifact saved");
    Ok(path)
}

/// Save the artifact at `index` into `dir`.  Returns the written path.
pub fn download_artifact(app: &App, index: usize, dir: &Path) -> Result<PathBuf> {
    let artifact = artifact_at(app, index)?;
    app.emit(AppEvent::DownloadStarted {
        name: artifact.name.clone(),
    });
    write_artifact(dir, &artifact)
}

/// Save every artifact of the completed session into `dir`, in order,
/// with a short stagger between files.  Returns the written paths.
pub async fn download_all(app: &App, dir: &Path) -> Result<Vec<PathBuf>> {
    let artifacts = all_artifacts(app)?;

    let mut paths = Vec::with_capacity(artifacts.len());
    for (i, artifact) in artifacts.iter().enumerate() {
        if i > 0 {
            app.timer
                .delay(Duration::from_millis(DOWNLOAD_STAGGER_MS))
                .await;
        }
        app.emit(AppEvent::DownloadStarted {
            name: artifact.name.clone(),
        });
        paths.push(write_artifact(dir, artifact)?);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{auth, sessions};
    use crate::state::App;
    use bytes::Bytes;
    use papermint_core::time::NoDelay;
    use papermint_core::transform::SimulatedCompression;
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

    async fn completed_session(app: &App) {
        sessions::open_session(app, "compress-pdf").unwrap();
        sessions::add_files(
            app,
            vec![
                ("a.pdf".to_string(), Bytes::from(vec![1u8; 100])),
                ("b.pdf".to_string(), Bytes::from(vec![2u8; 50])),
            ],
        )
        .unwrap();
        sessions::process_files(app).await.unwrap();
    }

    #[tokio::test]
    async fn test_download_one_writes_the_file() {
        let (dir, app) = app();
        completed_session(&app).await;

        let path = download_artifact(&app, 0, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "processed_a.pdf");
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_download_all_writes_every_artifact_in_order() {
        let (dir, app) = app();
        completed_session(&app).await;

        let paths = download_all(&app, dir.path()).await.unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["processed_a.pdf", "processed_b.pdf"]);
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[tokio::test]
    async fn test_download_out_of_range_fails() {
        let (dir, app) = app();
        completed_session(&app).await;
        assert!(download_artifact(&app, 9, dir.path()).is_err());
    }
}
