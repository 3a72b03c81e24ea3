//! Remote note-service capability trait.
//!
//! # Responsibility
//! - Name the exact primitives the sync services require.
//! - Keep payload + status pairing identical across read and write calls.
//!
//! # Invariants
//! - Payloads returned with a failed [`ApiStatus`] are placeholders and must
//!   not be interpreted.
//! - `authenticate` must succeed before any other call is meaningful.

use crate::model::note::{Note, NoteSummary};
use crate::remote::{ApiStatus, ClientError};

/// Capability set of the remote note service.
///
/// Implementations own all transport concerns. The sync services use this
/// trait sequentially from a single thread; no interior synchronization is
/// required.
pub trait NoteClient {
    /// Validates credentials and binds the handle to a session.
    ///
    /// # Errors
    /// - [`ClientError::InvalidLogin`] when credentials are rejected.
    fn authenticate(&mut self, username: &str, password: &str) -> Result<(), ClientError>;

    /// Lists note summaries carrying the given tag.
    ///
    /// # Errors
    /// - [`ClientError::LoginExpired`] for transient mid-request login
    ///   failures; callers may retry.
    fn list_notes(&self, tag: &str) -> Result<(Vec<NoteSummary>, ApiStatus), ClientError>;

    /// Fetches one full note by key.
    fn get_note(&self, key: &str) -> Result<(Note, ApiStatus), ClientError>;

    /// Creates one note; the returned note carries the remote-assigned key.
    fn add_note(&self, note: &Note) -> Result<(Note, ApiStatus), ClientError>;

    /// Persists content, tags and modification timestamp of a keyed note.
    fn update_note(&self, note: &Note) -> Result<(Note, ApiStatus), ClientError>;
}
