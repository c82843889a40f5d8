//! Subcommand handlers

pub mod cloud;
pub mod completions;
pub mod config;
pub mod deck;
pub mod exchange;
pub mod present;

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::warn;

use prepdeck::deck::PrepRecord;
use prepdeck::storage::LocalStore;
use prepdeck::theme::current_theme;
use prepdeck::Config;

/// The local record store selected by the config.
pub fn local_store(config: &Config) -> Result<LocalStore> {
    Ok(LocalStore::new(config.record_path()?))
}

/// Read the current record.
///
/// A missing record starts from the configured default preset. An unreadable
/// one is reported and replaced by defaults.
pub fn load_record(config: &Config, store: &LocalStore) -> PrepRecord {
    match store.try_load() {
        Ok(Some(record)) => record,
        Ok(None) => fresh_record(config),
        Err(e) => {
            warn!(path = %store.path().display(), "unreadable record: {}", e);
            eprintln!(
                "{}",
                current_theme().error_text(&format!(
                    "Warning: ignoring unreadable record {}: {}",
                    store.path().display(),
                    e
                ))
            );
            fresh_record(config)
        }
    }
}

fn fresh_record(config: &Config) -> PrepRecord {
    let mut record = PrepRecord::default();
    if let Some(preset) = config.default_preset() {
        record.durations = preset.durations();
    }
    record
}

/// Run `$EDITOR` (default `vi`) on `path` and wait for it.
///
/// The variable may carry arguments, e.g. `code --wait`.
pub fn run_editor(path: &Path) -> Result<()> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("$EDITOR is empty");
    };

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to open editor '{}'", editor))?;
    if !status.success() {
        bail!("Editor '{}' exited with {}", editor, status);
    }
    Ok(())
}
