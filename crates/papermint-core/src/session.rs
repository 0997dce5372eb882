//! The processing-session state machine.
//!
//! One session drives one tool invocation through
//! `Upload -> Processing -> Complete`, with `Complete -> Upload` for
//! "process more" and a terminal `Closed` reachable from anywhere.
//!
//! The asynchronous part is split so the machine itself stays synchronous:
//! [`ProcessingSession::start_processing`] hands out a [`ProcessingTicket`],
//! the caller awaits its [`Timer`](crate::time::Timer), then redeems the
//! ticket with [`ProcessingSession::finish`].  A ticket from a session that
//! was closed or reset in the meantime is stale and redeems to nothing, which
//! is exactly the advisory cancellation the workflow needs: no artifacts, no
//! earn.

use tracing::{debug, info};

use papermint_shared::catalog::Tool;
use papermint_shared::constants::MAX_SESSION_FILES;
use papermint_shared::error::{IntakeError, SessionError};
use papermint_shared::models::{ProcessedArtifact, UploadItem};

use crate::intake;
use crate::transform::Transform;

/// Where the session currently is in its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Upload,
    Processing,
    Complete,
    Closed,
}

/// Proof that a processing run was started.  Redeemable exactly while the
/// session is still in the same run.
#[derive(Debug)]
pub struct ProcessingTicket {
    generation: u64,
}

/// Instruction to credit coins for a completed session, returned at most
/// once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarnRequest {
    pub tool_id: &'static str,
    pub tool_name: &'static str,
    pub coins: u64,
}

/// One upload -> process -> complete workflow for a single tool.
pub struct ProcessingSession {
    tool: Tool,
    items: Vec<UploadItem>,
    artifacts: Vec<ProcessedArtifact>,
    state: SessionState,
    /// Bumped on every reset and close; stale tickets carry an older value.
    generation: u64,
    /// Whether the current run already produced its earn.
    earned: bool,
}

impl ProcessingSession {
    pub fn new(tool: Tool) -> Self {
        debug!(tool = tool.id, "session opened");
        Self {
            tool,
            items: Vec::new(),
            artifacts: Vec::new(),
            state: SessionState::Upload,
            generation: 0,
            earned: false,
        }
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    pub fn artifacts(&self) -> &[ProcessedArtifact] {
        &self.artifacts
    }

    fn ensure_upload(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Upload => Ok(()),
            SessionState::Closed => Err(SessionError::Closed),
            SessionState::Processing | SessionState::Complete => Err(SessionError::Busy),
        }
    }

    /// Add files, re-validating the allow-list and the per-session cap.
    ///
    /// Partial success: items accepted before an unsupported file or the cap
    /// stay in the session; the error reports what was turned away.  Returns
    /// the number of items added.
    pub fn add_items(&mut self, incoming: Vec<UploadItem>) -> Result<usize, SessionError> {
        self.ensure_upload()?;

        let mut added = 0;
        let total = incoming.len();
        for item in incoming {
            if self.items.len() >= MAX_SESSION_FILES {
                debug!(added, rejected = total - added, "session file cap hit");
                return Err(IntakeError::TooManyFiles {
                    added,
                    rejected: total - added,
                    limit: MAX_SESSION_FILES,
                }
                .into());
            }
            intake::validate_file_name(&item.name)?;
            self.items.push(item);
            added += 1;
        }
        debug!(added, total = self.items.len(), "files added to session");
        Ok(added)
    }

    /// Remove the item at `index`, preserving the relative order of the
    /// rest.  Out-of-range indices remove nothing.
    pub fn remove_item(&mut self, index: usize) -> Result<Option<UploadItem>, SessionError> {
        self.ensure_upload()?;
        if index < self.items.len() {
            Ok(Some(self.items.remove(index)))
        } else {
            Ok(None)
        }
    }

    /// Drop every selected item ("Clear All").
    pub fn clear_items(&mut self) -> Result<(), SessionError> {
        self.ensure_upload()?;
        self.items.clear();
        Ok(())
    }

    /// `Upload -> Processing`.  Fails with [`SessionError::NoFilesSelected`]
    /// on an empty item list and stays in `Upload`.
    pub fn start_processing(&mut self) -> Result<ProcessingTicket, SessionError> {
        self.ensure_upload()?;
        if self.items.is_empty() {
            return Err(SessionError::NoFilesSelected);
        }
        self.state = SessionState::Processing;
        info!(
            tool = self.tool.id,
            files = self.items.len(),
            "processing started"
        );
        Ok(ProcessingTicket {
            generation: self.generation,
        })
    }

    /// `Processing -> Complete`, driven by the timer callback.
    ///
    /// Liveness is checked first: a ticket whose run was closed or reset
    /// redeems to `None` and the session does not move.  On success every
    /// item maps to one artifact, order preserved, and the earn instruction
    /// for the tool is returned exactly once per run.
    pub fn finish(
        &mut self,
        ticket: ProcessingTicket,
        transform: &dyn Transform,
    ) -> Option<EarnRequest> {
        if self.state != SessionState::Processing || ticket.generation != self.generation {
            debug!(tool = self.tool.id, "stale processing ticket discarded");
            return None;
        }

        self.artifacts = self.items.iter().map(|item| transform.apply(item)).collect();
        self.state = SessionState::Complete;
        info!(
            tool = self.tool.id,
            artifacts = self.artifacts.len(),
            "processing complete"
        );

        if self.earned {
            return None;
        }
        self.earned = true;
        Some(EarnRequest {
            tool_id: self.tool.id,
            tool_name: self.tool.name,
            coins: self.tool.coins,
        })
    }

    /// `Complete -> Upload` ("process more"): clears items and artifacts and
    /// invalidates any ticket still in flight.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Complete => {
                self.items.clear();
                self.artifacts.clear();
                self.earned = false;
                self.generation += 1;
                self.state = SessionState::Upload;
                Ok(())
            }
            SessionState::Closed => Err(SessionError::Closed),
            SessionState::Upload | SessionState::Processing => Err(SessionError::Busy),
        }
    }

    /// Terminal transition; discards items and artifacts and invalidates
    /// in-flight tickets.  Idempotent.
    pub fn close(&mut self) {
        if self.state != SessionState::Closed {
            debug!(tool = self.tool.id, "session closed");
        }
        self.items.clear();
        self.artifacts.clear();
        self.generation += 1;
        self.state = SessionState::Closed;
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }
}
