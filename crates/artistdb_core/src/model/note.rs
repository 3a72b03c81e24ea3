//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record exchanged with the remote service.
//! - Define the two managed categories and the located note pair.
//!
//! # Invariants
//! - `key` is assigned by the remote service and is `None` until the first
//!   remote write succeeds.
//! - The first content line is the canonical title used for classification.
//! - `modified_at_ms` is unix epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque identifier assigned by the remote note service.
pub type NoteKey = String;

/// The two managed list categories.
///
/// Categories are fixed by design; classification is driven solely by the
/// canonical title on the first content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// The artist list note.
    Artists,
    /// The VIP list note.
    Vips,
}

impl Category {
    /// All categories in stable order.
    pub const ALL: [Category; 2] = [Category::Artists, Category::Vips];

    /// Stable lowercase name used in logs and file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Artists => "artists",
            Self::Vips => "vips",
        }
    }

    /// Backup file name for this category.
    pub fn backup_file_name(self) -> &'static str {
        match self {
            Self::Artists => "artists.txt",
            Self::Vips => "vips.txt",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Remote-assigned key; `None` for notes not yet written remotely.
    pub key: Option<NoteKey>,
    /// Newline-delimited text. Line one is the canonical title.
    pub content: String,
    /// Plain string tags.
    pub tags: Vec<String>,
    /// Last-modified timestamp in unix epoch milliseconds.
    pub modified_at_ms: i64,
}

impl Note {
    /// Creates an unkeyed note stamped with the current wall clock.
    pub fn new(content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            key: None,
            content: content.into(),
            tags,
            modified_at_ms: now_epoch_ms(),
        }
    }

    /// Returns the canonical title (first content line).
    pub fn title(&self) -> &str {
        self.content.lines().next().unwrap_or("")
    }
}

/// Listing projection returned by the remote list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    /// Remote-assigned key of the full note.
    pub key: NoteKey,
    /// Plain string tags.
    pub tags: Vec<String>,
}

/// The located pair of managed notes, one per category.
///
/// A snapshot for change detection is simply a `clone()` of this value taken
/// at fetch time and compared by value later; snapshots are never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedNotes {
    pub artists: Note,
    pub vips: Note,
}

impl ManagedNotes {
    /// Returns the note for one category.
    pub fn get(&self, category: Category) -> &Note {
        match category {
            Category::Artists => &self.artists,
            Category::Vips => &self.vips,
        }
    }

    /// Returns a mutable reference to the note for one category.
    pub fn get_mut(&mut self, category: Category) -> &mut Note {
        match category {
            Category::Artists => &mut self.artists,
            Category::Vips => &mut self.vips,
        }
    }
}

/// Current wall clock as unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
