//! `prep export` and `prep import` handlers

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use humansize::{format_size, BINARY};
use tracing::info;

use prepdeck::deck::exchange::{import_str, ExportDocument};
use prepdeck::deck::PrepRecord;
use prepdeck::files::filename::{export_filename, validate_length};
use prepdeck::theme::current_theme;
use prepdeck::Config;

use super::{load_record, local_store};

/// Where an export goes.
///
/// No path or a directory gets the generated file name; anything else is
/// used as given.
pub fn export_target(path: Option<&Path>, record: &PrepRecord, with_title: bool) -> Result<PathBuf> {
    let title = record.title();
    let generated = || -> Result<String> {
        let title = with_title.then_some(title.as_str());
        let name = export_filename(title, Local::now().date_naive());
        validate_length(&name)?;
        Ok(name)
    };
    match path {
        None => Ok(PathBuf::from(generated()?)),
        Some(dir) if dir.is_dir() => Ok(dir.join(generated()?)),
        Some(file) => Ok(file.to_path_buf()),
    }
}

/// Write the record as an export document.
#[cfg(not(tarpaulin_include))]
pub fn handle_export(config: &Config, path: Option<&Path>, with_title: bool, force: bool) -> Result<()> {
    let store = local_store(config)?;
    let record = load_record(config, &store);

    let target = export_target(path, &record, with_title)?;
    if target.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite it.",
            target.display()
        );
    }

    let json = ExportDocument::new(&record, Utc::now()).to_json_pretty()?;
    fs::write(&target, &json).with_context(|| format!("Failed to write {}", target.display()))?;
    info!(path = %target.display(), bytes = json.len(), "exported deck");

    println!(
        "{}",
        current_theme().success_text(&format!(
            "Exported to {} ({})",
            target.display(),
            format_size(json.len(), BINARY)
        ))
    );
    Ok(())
}

/// Replace the record with the contents of a backup file.
#[cfg(not(tarpaulin_include))]
pub fn handle_import(config: &Config, path: &Path) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let record =
        import_str(&content).with_context(|| format!("Could not import {}", path.display()))?;

    let store = local_store(config)?;
    store
        .save(&record)
        .with_context(|| format!("Failed to save {}", store.path().display()))?;
    info!(path = %path.display(), "imported deck");

    println!(
        "{}",
        current_theme().success_text(&format!(
            "Imported \"{}\" ({}s total).",
            record.title(),
            record.durations.total()
        ))
    );
    Ok(())
}
