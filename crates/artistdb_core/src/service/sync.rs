//! Top-level sync orchestration.
//!
//! # Responsibility
//! - Drive one full run: locate (provisioning once if needed), snapshot,
//!   caller edit, reconcile.
//! - Collapse component errors into a single fatal taxonomy.
//!
//! # Invariants
//! - Provisioning happens at most once per run; a second miss is an
//!   invariant violation, not a reason to create more notes.
//! - The snapshot is taken before the caller edit and never mutated.

use crate::backup::BackupStore;
use crate::config::SyncConfig;
use crate::model::note::ManagedNotes;
use crate::remote::client::NoteClient;
use crate::service::locator::{locate, LocateError, LocateOutcome};
use crate::service::reconciler::{reconcile, ProgressSink, ReconcileError, ReconcileReport};
use crate::service::session::AuthError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SyncResult<T> = Result<T, SyncError>;

/// Fatal failure of one sync run.
#[derive(Debug)]
pub enum SyncError {
    /// Session authentication failed.
    Auth(AuthError),
    /// Locating or provisioning the managed notes failed.
    Locate(LocateError),
    /// Writing back a changed note failed.
    Reconcile(ReconcileError),
    /// Managed notes were still missing after provisioning them.
    ProvisionLookupFailed,
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth(err) => write!(f, "{err}"),
            Self::Locate(err) => write!(f, "{err}"),
            Self::Reconcile(err) => write!(f, "{err}"),
            Self::ProvisionLookupFailed => {
                write!(f, "managed notes not found after provisioning")
            }
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Auth(err) => Some(err),
            Self::Locate(err) => Some(err),
            Self::Reconcile(err) => Some(err),
            Self::ProvisionLookupFailed => None,
        }
    }
}

impl From<AuthError> for SyncError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<LocateError> for SyncError {
    fn from(value: LocateError) -> Self {
        Self::Locate(value)
    }
}

impl From<ReconcileError> for SyncError {
    fn from(value: ReconcileError) -> Self {
        Self::Reconcile(value)
    }
}

/// Runs one sync pass over an authenticated client.
///
/// Locates the managed pair (provisioning missing notes once and looking up
/// again), snapshots it, lets `edit` mutate the pair, then reconciles every
/// changed category.
///
/// # Errors
/// - [`SyncError::ProvisionLookupFailed`] when the pair is still incomplete
///   after provisioning; anything else propagates from the components.
pub fn sync_notes<C, F>(
    client: &C,
    config: &SyncConfig,
    backups: &BackupStore,
    progress: &mut dyn ProgressSink,
    edit: F,
) -> SyncResult<ReconcileReport>
where
    C: NoteClient,
    F: FnOnce(&mut ManagedNotes),
{
    let mut pair = match locate(client, config)? {
        LocateOutcome::Found(pair) => pair,
        LocateOutcome::Provisioned(created) => {
            info!(
                "event=sync module=sync status=provisioned count={}",
                created.len()
            );
            match locate(client, config)? {
                LocateOutcome::Found(pair) => pair,
                LocateOutcome::Provisioned(_) => return Err(SyncError::ProvisionLookupFailed),
            }
        }
    };

    let snapshot = pair.clone();
    edit(&mut pair);

    let report = reconcile(client, &mut pair, &snapshot, backups, progress)?;
    info!(
        "event=sync module=sync status=ok updated={}",
        report.updated.len()
    );
    Ok(report)
}
