//! Core sync logic for the managed artist/VIP note pair.
//! This crate is the single source of truth for reconciliation invariants.

pub mod backup;
pub mod config;
pub mod logging;
pub mod model;
pub mod remote;
pub mod service;

pub use backup::{BackupError, BackupResult, BackupStore};
pub use config::SyncConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{now_epoch_ms, Category, ManagedNotes, Note, NoteKey, NoteSummary};
pub use remote::client::NoteClient;
pub use remote::memory::InMemoryClient;
pub use remote::{ApiStatus, ClientError};
pub use service::locator::{
    locate, provision, provision_categories, LocateError, LocateOutcome, LocateResult,
};
pub use service::reconciler::{
    reconcile, NullProgress, ProgressSink, ReconcileError, ReconcileReport, ReconcileResult,
};
pub use service::session::{authenticate, AuthError, AuthResult, SecretPrompt};
pub use service::sync::{sync_notes, SyncError, SyncResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
