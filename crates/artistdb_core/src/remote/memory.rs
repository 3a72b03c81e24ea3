//! In-memory reference client.
//!
//! # Responsibility
//! - Provide a deterministic [`NoteClient`] for tests and the CLI probe.
//! - Expose failure-injection knobs mirroring real API behavior: credential
//!   rejection, transient mid-request login failures, status sentinels.
//!
//! # Invariants
//! - Keys are generated once per note and never reused.
//! - Scripted listing failures are consumed in FIFO order.
//! - Calls are counted before status injection, so callers can assert on
//!   issued calls even when the injected status is a failure.

use crate::model::note::{now_epoch_ms, Note, NoteKey, NoteSummary};
use crate::remote::client::NoteClient;
use crate::remote::{ApiStatus, ClientError};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    notes: BTreeMap<NoteKey, Note>,
    list_failures: VecDeque<ClientError>,
    fail_list_status: bool,
    fail_get_status: bool,
    fail_add_status: bool,
    fail_update_status: bool,
    update_calls: BTreeMap<NoteKey, u32>,
    get_calls: u32,
    add_calls: u32,
    authenticated: bool,
    auth_calls: u32,
}

/// Deterministic in-process note store implementing [`NoteClient`].
#[derive(Default)]
pub struct InMemoryClient {
    /// Expected credentials; `None` accepts any pair.
    credentials: Option<(String, String)>,
    state: RefCell<MemoryState>,
}

impl InMemoryClient {
    /// Creates an empty client accepting any credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty client accepting only the given credentials.
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Some((username.into(), password.into())),
            state: RefCell::new(MemoryState::default()),
        }
    }

    /// Inserts one note directly into the store, assigning a fresh key.
    pub fn seed_note(&self, note: Note) -> NoteKey {
        let key = Uuid::new_v4().to_string();
        let mut stored = note;
        stored.key = Some(key.clone());
        self.state.borrow_mut().notes.insert(key.clone(), stored);
        key
    }

    /// Queues one scripted error for the next `list_notes` call.
    pub fn script_list_failure(&self, error: ClientError) {
        self.state.borrow_mut().list_failures.push_back(error);
    }

    /// Forces the listing status sentinel to failure.
    pub fn set_list_status_failure(&self, fail: bool) {
        self.state.borrow_mut().fail_list_status = fail;
    }

    /// Forces the per-note fetch status sentinel to failure.
    pub fn set_get_status_failure(&self, fail: bool) {
        self.state.borrow_mut().fail_get_status = fail;
    }

    /// Forces the note-creation status sentinel to failure.
    pub fn set_add_status_failure(&self, fail: bool) {
        self.state.borrow_mut().fail_add_status = fail;
    }

    /// Forces the note-update status sentinel to failure.
    pub fn set_update_status_failure(&self, fail: bool) {
        self.state.borrow_mut().fail_update_status = fail;
    }

    /// Returns the stored note for one key.
    pub fn note(&self, key: &str) -> Option<Note> {
        self.state.borrow().notes.get(key).cloned()
    }

    /// Returns stored notes carrying the given tag, in key order.
    pub fn notes_with_tag(&self, tag: &str) -> Vec<Note> {
        self.state
            .borrow()
            .notes
            .values()
            .filter(|note| note.tags.iter().any(|t| t == tag))
            .cloned()
            .collect()
    }

    /// Number of notes in the store.
    pub fn note_count(&self) -> usize {
        self.state.borrow().notes.len()
    }

    /// Number of `update_note` calls issued for one key.
    pub fn update_calls(&self, key: &str) -> u32 {
        self.state
            .borrow()
            .update_calls
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Total number of `get_note` calls issued.
    pub fn get_calls(&self) -> u32 {
        self.state.borrow().get_calls
    }

    /// Total number of `add_note` calls issued.
    pub fn add_calls(&self) -> u32 {
        self.state.borrow().add_calls
    }

    /// Total number of `authenticate` calls issued.
    pub fn auth_calls(&self) -> u32 {
        self.state.borrow().auth_calls
    }

    /// Whether the last authentication attempt succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().authenticated
    }
}

impl NoteClient for InMemoryClient {
    fn authenticate(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        let mut state = self.state.borrow_mut();
        state.auth_calls += 1;
        let accepted = match &self.credentials {
            Some((expected_user, expected_pass)) => {
                expected_user == username && expected_pass == password
            }
            None => true,
        };
        if accepted {
            state.authenticated = true;
            Ok(())
        } else {
            state.authenticated = false;
            Err(ClientError::InvalidLogin)
        }
    }

    fn list_notes(&self, tag: &str) -> Result<(Vec<NoteSummary>, ApiStatus), ClientError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.list_failures.pop_front() {
            return Err(error);
        }
        if state.fail_list_status {
            return Ok((Vec::new(), ApiStatus::failed()));
        }
        let summaries = state
            .notes
            .iter()
            .filter(|(_, note)| note.tags.iter().any(|t| t == tag))
            .map(|(key, note)| NoteSummary {
                key: key.clone(),
                tags: note.tags.clone(),
            })
            .collect();
        Ok((summaries, ApiStatus::Ok))
    }

    fn get_note(&self, key: &str) -> Result<(Note, ApiStatus), ClientError> {
        let mut state = self.state.borrow_mut();
        state.get_calls += 1;
        if state.fail_get_status {
            return Ok((placeholder_note(), ApiStatus::failed()));
        }
        match state.notes.get(key) {
            Some(note) => Ok((note.clone(), ApiStatus::Ok)),
            None => Err(ClientError::Transport(format!("unknown note key `{key}`"))),
        }
    }

    fn add_note(&self, note: &Note) -> Result<(Note, ApiStatus), ClientError> {
        let mut state = self.state.borrow_mut();
        state.add_calls += 1;
        if state.fail_add_status {
            return Ok((placeholder_note(), ApiStatus::failed()));
        }
        let key = Uuid::new_v4().to_string();
        let mut stored = note.clone();
        stored.key = Some(key.clone());
        stored.modified_at_ms = now_epoch_ms();
        state.notes.insert(key, stored.clone());
        Ok((stored, ApiStatus::Ok))
    }

    fn update_note(&self, note: &Note) -> Result<(Note, ApiStatus), ClientError> {
        let key = note
            .key
            .clone()
            .ok_or_else(|| ClientError::Transport("update requires a note key".to_string()))?;
        let mut state = self.state.borrow_mut();
        *state.update_calls.entry(key.clone()).or_insert(0) += 1;
        if state.fail_update_status {
            return Ok((note.clone(), ApiStatus::failed()));
        }
        if !state.notes.contains_key(&key) {
            return Err(ClientError::Transport(format!("unknown note key `{key}`")));
        }
        state.notes.insert(key, note.clone());
        Ok((note.clone(), ApiStatus::Ok))
    }
}

fn placeholder_note() -> Note {
    Note {
        key: None,
        content: String::new(),
        tags: Vec::new(),
        modified_at_ms: 0,
    }
}
