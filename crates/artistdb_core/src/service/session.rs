//! Session authentication with bounded retry.
//!
//! # Responsibility
//! - Turn a username plus a password source into an authenticated client.
//! - Enforce a hard bound on consecutive invalid-login attempts.
//!
//! # Invariants
//! - Exactly one `authenticate` call is issued per attempt.
//! - An environment-supplied secret consumes the first attempt; invalid
//!   login then falls back to interactive prompting.
//! - Secrets are never logged.

use crate::remote::client::NoteClient;
use crate::remote::ClientError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication failure.
#[derive(Debug)]
pub enum AuthError {
    /// The attempt bound was consumed by consecutive invalid logins.
    TooManyAttempts {
        /// Number of authenticate calls issued.
        attempts: u32,
    },
    /// Interactive password prompting failed.
    Prompt(std::io::Error),
    /// Non-credential client failure; fatal.
    Client(ClientError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyAttempts { attempts } => {
                write!(f, "too many incorrect password attempts ({attempts})")
            }
            Self::Prompt(err) => write!(f, "failed to read password: {err}"),
            Self::Client(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TooManyAttempts { .. } => None,
            Self::Prompt(err) => Some(err),
            Self::Client(err) => Some(err),
        }
    }
}

impl From<ClientError> for AuthError {
    fn from(value: ClientError) -> Self {
        Self::Client(value)
    }
}

/// Source of interactively entered secrets.
///
/// Injected so core performs no terminal I/O of its own.
pub trait SecretPrompt {
    /// Reads one password attempt.
    fn read_secret(&mut self) -> std::io::Result<String>;
}

/// Authenticates the client, consuming at most `max_attempts` attempts.
///
/// `env_secret` is the non-interactive password read by the caller from the
/// configured environment variable; when present it is tried first. Each
/// invalid login consumes one attempt and moves on to the prompt; any other
/// client error aborts immediately.
///
/// # Errors
/// - [`AuthError::TooManyAttempts`] after `max_attempts` invalid logins.
/// - [`AuthError::Prompt`] when the interactive prompt fails.
/// - [`AuthError::Client`] for non-credential client failures.
pub fn authenticate<C: NoteClient>(
    client: &mut C,
    username: &str,
    env_secret: Option<String>,
    prompt: &mut dyn SecretPrompt,
    max_attempts: u32,
) -> AuthResult<()> {
    let mut env_secret = env_secret;
    let mut attempts = 0u32;

    while attempts < max_attempts {
        let password = match env_secret.take() {
            Some(secret) => secret,
            None => prompt.read_secret().map_err(AuthError::Prompt)?,
        };
        attempts += 1;

        match client.authenticate(username, &password) {
            Ok(()) => {
                info!("event=auth module=session status=ok attempt={attempts}");
                return Ok(());
            }
            Err(ClientError::InvalidLogin) => {
                warn!("event=auth module=session status=invalid_login attempt={attempts}");
            }
            Err(other) => return Err(AuthError::Client(other)),
        }
    }

    Err(AuthError::TooManyAttempts { attempts })
}
