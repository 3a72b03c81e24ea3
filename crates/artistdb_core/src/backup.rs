//! Local plain-text backups of the managed notes.
//!
//! # Responsibility
//! - Own the per-category backup file paths.
//! - Overwrite a category's backup wholesale with current note content.
//!
//! # Invariants
//! - Backups are full-file writes; never appended to.
//! - A backup file holds exactly the note content, byte for byte.

use crate::model::note::Category;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub type BackupResult<T> = Result<T, BackupError>;

/// Backup write failure for one category.
#[derive(Debug)]
pub struct BackupError {
    /// Category whose backup could not be written.
    pub category: Category,
    /// Target path of the failed write.
    pub path: PathBuf,
    /// Underlying filesystem error.
    pub source: std::io::Error,
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to write {} backup at `{}`: {}",
            self.category,
            self.path.display(),
            self.source
        )
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Filesystem store for the two backup files.
#[derive(Debug, Clone)]
pub struct BackupStore {
    root: PathBuf,
}

impl BackupStore {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the backup file path for one category.
    pub fn path_for(&self, category: Category) -> PathBuf {
        self.root.join(category.backup_file_name())
    }

    /// Returns the store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Overwrites one category's backup file with the given content.
    pub fn write(&self, category: Category, content: &str) -> BackupResult<()> {
        let path = self.path_for(category);
        fs::write(&path, content).map_err(|source| BackupError {
            category,
            path,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::BackupStore;
    use crate::model::note::Category;
    use std::fs;

    #[test]
    fn write_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = BackupStore::new(dir.path());

        store.write(Category::Artists, "# Danbooru Artists\nA").unwrap();
        store.write(Category::Artists, "# Danbooru Artists\nB").unwrap();

        let written = fs::read_to_string(store.path_for(Category::Artists)).unwrap();
        assert_eq!(written, "# Danbooru Artists\nB");
    }

    #[test]
    fn categories_map_to_fixed_file_names() {
        let store = BackupStore::new("/tmp/backups");
        assert!(store.path_for(Category::Artists).ends_with("artists.txt"));
        assert!(store.path_for(Category::Vips).ends_with("vips.txt"));
    }

    #[test]
    fn write_into_missing_directory_reports_category_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = BackupStore::new(dir.path().join("missing"));

        let err = store.write(Category::Vips, "content").unwrap_err();
        assert_eq!(err.category, Category::Vips);
        assert!(err.path.ends_with("vips.txt"));
    }
}
