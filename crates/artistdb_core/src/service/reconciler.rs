//! Local-vs-remote reconciliation.
//!
//! # Responsibility
//! - Detect per-category content divergence against a snapshot.
//! - Persist each changed note: backup file first, remote update second.
//!
//! # Invariants
//! - An unchanged category produces no side effect at all.
//! - The backup write happens-before the remote update, so a crash between
//!   the two is recoverable by re-running.
//! - The progress sink is notified at most once per reconcile call, before
//!   any processing.

use crate::backup::{BackupError, BackupStore};
use crate::model::note::{now_epoch_ms, Category, ManagedNotes};
use crate::remote::client::NoteClient;
use crate::remote::ClientError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROGRESS_MESSAGE: &str = "Please wait...";

pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Reconciliation failure.
#[derive(Debug)]
pub enum ReconcileError {
    /// The local backup file could not be written.
    Backup(BackupError),
    /// The remote API reported its terminal failure status on update.
    RemoteAccess,
    /// Non-retryable client failure.
    Client(ClientError),
}

impl Display for ReconcileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backup(err) => write!(f, "{err}"),
            Self::RemoteAccess => {
                write!(f, "failed to access the remote API - is internet available?")
            }
            Self::Client(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReconcileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backup(err) => Some(err),
            Self::RemoteAccess => None,
            Self::Client(err) => Some(err),
        }
    }
}

impl From<BackupError> for ReconcileError {
    fn from(value: BackupError) -> Self {
        Self::Backup(value)
    }
}

impl From<ClientError> for ReconcileError {
    fn from(value: ClientError) -> Self {
        Self::Client(value)
    }
}

/// Sink for user-facing progress messages.
pub trait ProgressSink {
    /// Receives one progress message.
    fn notify(&mut self, message: &str);
}

/// Progress sink that discards all messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn notify(&mut self, _message: &str) {}
}

/// Outcome of one reconcile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Categories whose backup and remote copy were rewritten.
    pub updated: Vec<Category>,
}

impl ReconcileReport {
    /// Returns whether nothing diverged.
    pub fn is_clean(&self) -> bool {
        self.updated.is_empty()
    }
}

/// Writes back every category whose content diverged from the snapshot.
///
/// For each changed category the note's modification timestamp is set to the
/// current wall clock, the backup file is overwritten with the note content,
/// and only then is the remote update issued. Categories reconciled before a
/// later failure keep their written state; there is no rollback.
///
/// # Errors
/// - [`ReconcileError::Backup`] when a backup file cannot be written.
/// - [`ReconcileError::RemoteAccess`] when the API reports terminal failure
///   on an update.
pub fn reconcile<C: NoteClient>(
    client: &C,
    current: &mut ManagedNotes,
    snapshot: &ManagedNotes,
    backups: &BackupStore,
    progress: &mut dyn ProgressSink,
) -> ReconcileResult<ReconcileReport> {
    let changed: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|&category| current.get(category).content != snapshot.get(category).content)
        .collect();

    if changed.is_empty() {
        info!("event=reconcile module=reconciler status=clean");
        return Ok(ReconcileReport { updated: changed });
    }

    progress.notify(PROGRESS_MESSAGE);

    for &category in &changed {
        let note = current.get_mut(category);
        note.modified_at_ms = now_epoch_ms();

        info!("event=backup module=reconciler category={category}");
        backups.write(category, &note.content)?;

        info!("event=remote_update module=reconciler category={category}");
        let (_, status) = client.update_note(note)?;
        if status.is_failure() {
            return Err(ReconcileError::RemoteAccess);
        }
    }

    Ok(ReconcileReport { updated: changed })
}
