//! Managed-note location and provisioning.
//!
//! # Responsibility
//! - Find the two managed notes in the tag-filtered remote listing by
//!   canonical first-line title.
//! - Create missing managed notes with canonical empty content.
//!
//! # Invariants
//! - Classification uses exact first-line equality; first match per
//!   category wins.
//! - Fetching stops as soon as both categories are populated.
//! - Provisioning never checks for existing notes; callers decide which
//!   categories are actually missing.

use crate::config::SyncConfig;
use crate::model::note::{Category, ManagedNotes, Note, NoteSummary};
use crate::remote::client::NoteClient;
use crate::remote::ClientError;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LocateResult<T> = Result<T, LocateError>;

/// Location/provisioning failure.
#[derive(Debug)]
pub enum LocateError {
    /// The listing retry bound was consumed by transient login failures.
    RetryExhausted {
        /// Number of listing attempts issued.
        attempts: u32,
    },
    /// The remote API reported its terminal failure status.
    RemoteAccess,
    /// Non-retryable client failure.
    Client(ClientError),
}

impl Display for LocateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RetryExhausted { attempts } => {
                write!(f, "failed to get the notes list after {attempts} attempts")
            }
            Self::RemoteAccess => {
                write!(f, "failed to access the remote API - is internet available?")
            }
            Self::Client(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LocateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Client(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ClientError> for LocateError {
    fn from(value: ClientError) -> Self {
        Self::Client(value)
    }
}

/// Result of one location pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    /// Both managed notes were found.
    Found(ManagedNotes),
    /// One or both notes were missing; the listed categories were created
    /// and the caller must locate again to obtain the populated pair.
    Provisioned(Vec<Category>),
}

/// Locates the managed note pair in the tag-filtered remote listing.
///
/// Summaries are fetched one by one and classified by canonical title until
/// both categories are populated. When the listing is exhausted first, the
/// missing categories are provisioned and [`LocateOutcome::Provisioned`] is
/// returned; no automatic re-fetch happens in this call.
///
/// # Errors
/// - [`LocateError::RetryExhausted`] when transient login failures consume
///   the listing retry bound.
/// - [`LocateError::RemoteAccess`] when the API reports terminal failure on
///   the listing or any individual fetch.
pub fn locate<C: NoteClient>(client: &C, config: &SyncConfig) -> LocateResult<LocateOutcome> {
    let summaries = list_with_retry(client, config)?;
    info!(
        "event=locate module=locator status=listed count={}",
        summaries.len()
    );

    let mut artists: Option<Note> = None;
    let mut vips: Option<Note> = None;

    for summary in summaries {
        if artists.is_some() && vips.is_some() {
            break;
        }

        let (note, status) = client.get_note(&summary.key)?;
        if status.is_failure() {
            return Err(LocateError::RemoteAccess);
        }

        debug!(
            "event=classify module=locator key={} title={:?}",
            summary.key,
            note.title()
        );
        match config.classify_title(note.title()) {
            Some(Category::Artists) if artists.is_none() => artists = Some(note),
            Some(Category::Vips) if vips.is_none() => vips = Some(note),
            _ => {}
        }
    }

    match (artists, vips) {
        (Some(artists), Some(vips)) => Ok(LocateOutcome::Found(ManagedNotes { artists, vips })),
        (artists, vips) => {
            let mut missing = Vec::new();
            if artists.is_none() {
                missing.push(Category::Artists);
            }
            if vips.is_none() {
                missing.push(Category::Vips);
            }
            provision_categories(client, config, &missing)?;
            Ok(LocateOutcome::Provisioned(missing))
        }
    }
}

/// Creates both managed notes with canonical empty content.
///
/// Existence is not checked; only call this when both notes are known to be
/// absent.
pub fn provision<C: NoteClient>(client: &C, config: &SyncConfig) -> LocateResult<()> {
    provision_categories(client, config, &Category::ALL)
}

/// Creates the managed notes for the given categories.
///
/// Each created note holds the canonical title as its only content line and
/// carries the configured domain tag.
pub fn provision_categories<C: NoteClient>(
    client: &C,
    config: &SyncConfig,
    categories: &[Category],
) -> LocateResult<()> {
    for &category in categories {
        let note = Note::new(config.title(category), vec![config.tag.clone()]);
        let (_, status) = client.add_note(&note)?;
        if status.is_failure() {
            return Err(LocateError::RemoteAccess);
        }
        info!("event=provision module=locator status=created category={category}");
    }
    Ok(())
}

fn list_with_retry<C: NoteClient>(
    client: &C,
    config: &SyncConfig,
) -> LocateResult<Vec<NoteSummary>> {
    let mut attempts = 0u32;
    while attempts < config.list_attempts {
        attempts += 1;
        match client.list_notes(&config.tag) {
            Ok((summaries, status)) => {
                if status.is_failure() {
                    return Err(LocateError::RemoteAccess);
                }
                return Ok(summaries);
            }
            Err(ClientError::LoginExpired) => {
                debug!("event=list_retry module=locator attempt={attempts}");
            }
            Err(other) => return Err(LocateError::Client(other)),
        }
    }
    Err(LocateError::RetryExhausted { attempts })
}
