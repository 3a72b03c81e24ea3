//! CLI smoke entry point.
//!
//! # Responsibility
//! - Run one full sync pass against the in-memory client to verify
//!   `artistdb_core` wiring end to end.
//! - Keep output deterministic for quick local sanity checks.

use artistdb_core::{
    authenticate, core_version, default_log_level, init_logging, sync_notes, BackupStore,
    InMemoryClient, ProgressSink, SecretPrompt, SyncConfig,
};
use std::error::Error;
use std::fs;

struct StdoutProgress;

impl ProgressSink for StdoutProgress {
    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}

struct NoPrompt;

impl SecretPrompt for NoPrompt {
    fn read_secret(&mut self) -> std::io::Result<String> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "probe run is non-interactive",
        ))
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let log_dir = std::env::temp_dir().join("artistdb-logs");
    if let Some(dir) = log_dir.to_str() {
        if let Err(err) = init_logging(default_log_level(), dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("artistdb_core version={}", core_version());

    let config = SyncConfig::default();
    let backup_dir = std::env::temp_dir().join("artistdb-demo");
    fs::create_dir_all(&backup_dir)?;
    let backups = BackupStore::new(&backup_dir);

    let mut client = InMemoryClient::with_credentials("demo", "demo-secret");
    authenticate(
        &mut client,
        "demo",
        Some("demo-secret".to_string()),
        &mut NoPrompt,
        config.auth_attempts,
    )?;

    // Empty store: the first pass provisions both notes, the edit then adds
    // one artist row before reconciliation.
    let report = sync_notes(&client, &config, &backups, &mut StdoutProgress, |pair| {
        pair.artists.content.push_str("\nArtistA");
    })?;

    for category in &report.updated {
        println!(
            "updated {category}: backup at {}",
            backups.path_for(*category).display()
        );
    }
    if report.is_clean() {
        println!("nothing to update");
    }

    Ok(())
}
