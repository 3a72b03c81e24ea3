//! Sync configuration.
//!
//! # Responsibility
//! - Hold the canonical titles, domain tag and retry bounds in one place.
//! - Keep call sites free of hard-coded literals.
//!
//! # Invariants
//! - Canonical titles are compared by exact equality against line one of
//!   note content; they must stay byte-stable across runs.

use crate::model::note::Category;
use std::path::PathBuf;

const DEFAULT_ARTISTS_TITLE: &str = "# Danbooru Artists";
const DEFAULT_VIPS_TITLE: &str = "# Danbooru VIPs";
const DEFAULT_TAG: &str = "danbooru";
const DEFAULT_PASSWORD_ENV_VAR: &str = "SN_PSWD";
const DEFAULT_AUTH_ATTEMPTS: u32 = 5;
const DEFAULT_LIST_ATTEMPTS: u32 = 5;

/// Configuration for one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Canonical title for the artists note.
    pub artists_title: String,
    /// Canonical title for the VIPs note.
    pub vips_title: String,
    /// Tag used to filter the remote listing and stamp created notes.
    pub tag: String,
    /// Environment variable supplying the password non-interactively.
    pub password_env_var: String,
    /// Maximum interactive authentication attempts.
    pub auth_attempts: u32,
    /// Maximum listing retries on a transient mid-request login failure.
    pub list_attempts: u32,
    /// Directory holding the per-category backup files.
    pub backup_dir: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            artists_title: DEFAULT_ARTISTS_TITLE.to_string(),
            vips_title: DEFAULT_VIPS_TITLE.to_string(),
            tag: DEFAULT_TAG.to_string(),
            password_env_var: DEFAULT_PASSWORD_ENV_VAR.to_string(),
            auth_attempts: DEFAULT_AUTH_ATTEMPTS,
            list_attempts: DEFAULT_LIST_ATTEMPTS,
            backup_dir: PathBuf::from("."),
        }
    }
}

impl SyncConfig {
    /// Returns the canonical title for one category.
    pub fn title(&self, category: Category) -> &str {
        match category {
            Category::Artists => self.artists_title.as_str(),
            Category::Vips => self.vips_title.as_str(),
        }
    }

    /// Classifies a title line into a category, if it matches one.
    pub fn classify_title(&self, title: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|&category| self.title(category) == title)
    }
}

#[cfg(test)]
mod tests {
    use super::SyncConfig;
    use crate::model::note::Category;

    #[test]
    fn defaults_carry_canonical_constants() {
        let config = SyncConfig::default();
        assert_eq!(config.title(Category::Artists), "# Danbooru Artists");
        assert_eq!(config.title(Category::Vips), "# Danbooru VIPs");
        assert_eq!(config.tag, "danbooru");
        assert_eq!(config.auth_attempts, 5);
        assert_eq!(config.list_attempts, 5);
    }

    #[test]
    fn classify_title_requires_exact_match() {
        let config = SyncConfig::default();
        assert_eq!(
            config.classify_title("# Danbooru Artists"),
            Some(Category::Artists)
        );
        assert_eq!(config.classify_title("# Danbooru VIPs"), Some(Category::Vips));
        assert_eq!(config.classify_title("# danbooru artists"), None);
        assert_eq!(config.classify_title(""), None);
    }
}
