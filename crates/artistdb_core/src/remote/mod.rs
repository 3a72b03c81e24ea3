//! Remote note-service boundary.
//!
//! # Responsibility
//! - Define the capability trait the sync services drive.
//! - Define the client-level error and status taxonomy.
//!
//! # Invariants
//! - Transport details (HTTP, auth tokens, wire retries) stay behind
//!   [`client::NoteClient`]; core never sees them.
//! - API-level failure is a status sentinel, not an error: callers must
//!   check [`ApiStatus`] on every successful call.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client;
pub mod memory;

/// Sentinel status value reported by the remote API on terminal failure.
pub const STATUS_FAILURE: i32 = -1;

/// Per-call status reported alongside remote API payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    /// The call completed and the payload is meaningful.
    Ok,
    /// Terminal API failure carrying the raw status sentinel.
    Failed(i32),
}

impl ApiStatus {
    /// Canonical failure status.
    pub fn failed() -> Self {
        Self::Failed(STATUS_FAILURE)
    }

    /// Returns whether this status signals terminal failure.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Client-level errors raised by [`client::NoteClient`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Credentials were rejected during authentication.
    InvalidLogin,
    /// A previously valid login failed mid-request; safe to retry.
    LoginExpired,
    /// Any other transport-level failure; fatal.
    Transport(String),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogin => write!(f, "invalid login credentials"),
            Self::LoginExpired => write!(f, "login failed mid-request"),
            Self::Transport(details) => write!(f, "transport failure: {details}"),
        }
    }
}

impl Error for ClientError {}
