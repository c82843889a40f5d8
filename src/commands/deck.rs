//! Editing handlers: show, set, edit, link, duration, preset

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use prepdeck::deck::{coerce_duration, PrepRecord, Preset, SectionKey};
use prepdeck::player::render::format_duration;
use prepdeck::schedule::DurationSchedule;
use prepdeck::storage::LocalStore;
use prepdeck::theme::{current_theme, Theme};
use prepdeck::Config;

use super::{load_record, local_store, run_editor};

/// Load, modify and save the record in one step.
fn update_record<F>(config: &Config, change: F) -> Result<(LocalStore, PrepRecord)>
where
    F: FnOnce(&mut PrepRecord) -> Result<()>,
{
    let store = local_store(config)?;
    let mut record = load_record(config, &store);
    change(&mut record)?;
    store
        .save(&record)
        .with_context(|| format!("Failed to save {}", store.path().display()))?;
    Ok((store, record))
}

/// Print every section with its timing, then the totals.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let store = local_store(config)?;
    let record = load_record(config, &store);
    print!("{}", render_record(&record, &current_theme()));
    Ok(())
}

/// Text shown by `prep show`.
pub fn render_record(record: &PrepRecord, theme: &Theme) -> String {
    let schedule = DurationSchedule::from_durations(&record.durations);
    let mut out = String::new();

    out.push_str(&theme.accent_text(&record.title()));
    out.push('\n');

    for key in SectionKey::ALL {
        let index = key.index();
        out.push('\n');
        out.push_str(&theme.primary_text(&format!(
            "{}. {} ({}s, {} - {})",
            index + 1,
            key.title(),
            record.durations.get(key),
            format_duration(schedule.start_of(index)),
            format_duration(schedule.end_of(index)),
        )));
        out.push('\n');

        let text = record.text(key);
        if text.trim().is_empty() {
            out.push_str(&theme.secondary_text("   (empty)"));
            out.push('\n');
        } else {
            for line in text.lines() {
                out.push_str("   ");
                out.push_str(line);
                out.push('\n');
            }
        }
        if key == SectionKey::Example && !record.reference_link.is_empty() {
            out.push_str(&theme.secondary_text(&format!("   Link: {}", record.reference_link)));
            out.push('\n');
        }
    }

    out.push('\n');
    let deck = if record.deck_id.is_empty() {
        "not saved to cloud".to_string()
    } else {
        format!("deck {}", record.deck_id)
    };
    out.push_str(&theme.secondary_text(&format!(
        "Total {} | {}",
        format_duration(schedule.total()),
        deck
    )));
    out.push('\n');
    out
}

/// Replace a section's text. `-` reads it from stdin.
#[cfg(not(tarpaulin_include))]
pub fn handle_set(config: &Config, section: SectionKey, text: &str) -> Result<()> {
    let text = if text == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read text from stdin")?;
        buffer
    } else {
        text.to_string()
    };
    let text = text.trim_end().to_string();

    update_record(config, |record| {
        record.set_text(section, text);
        Ok(())
    })?;
    info!(%section, "section text replaced");
    println!(
        "{}",
        current_theme().success_text(&format!("Updated {}.", section.title()))
    );
    Ok(())
}

/// Edit a section in `$EDITOR` through a temporary file.
#[cfg(not(tarpaulin_include))]
pub fn handle_edit(config: &Config, section: SectionKey) -> Result<()> {
    let store = local_store(config)?;
    let mut record = load_record(config, &store);

    let path = std::env::temp_dir().join(format!(
        "prep-{}-{}.md",
        section.as_str(),
        std::process::id()
    ));
    fs::write(&path, record.text(section))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    let edited = run_editor(&path).and_then(|()| {
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    });
    let _ = fs::remove_file(&path);
    let edited = edited?;

    let theme = current_theme();
    let edited = edited.trim_end();
    if edited == record.text(section) {
        println!("{}", theme.secondary_text("No changes."));
        return Ok(());
    }

    record.set_text(section, edited);
    store
        .save(&record)
        .with_context(|| format!("Failed to save {}", store.path().display()))?;
    info!(%section, "section edited");
    println!("{}", theme.success_text(&format!("Updated {}.", section.title())));
    Ok(())
}

/// Print, set or clear the reference link.
#[cfg(not(tarpaulin_include))]
pub fn handle_link(config: &Config, url: Option<&str>, clear: bool) -> Result<()> {
    let theme = current_theme();

    if url.is_none() && !clear {
        let store = local_store(config)?;
        let record = load_record(config, &store);
        if record.reference_link.is_empty() {
            println!("{}", theme.secondary_text("No reference link set."));
        } else {
            println!("{}", record.reference_link);
        }
        return Ok(());
    }

    let url = url.unwrap_or_default();
    let (_, record) = update_record(config, |record| Ok(record.set_reference_link(url)?))?;
    if record.reference_link.is_empty() {
        println!("{}", theme.success_text("Reference link cleared."));
    } else {
        println!(
            "{}",
            theme.success_text(&format!("Reference link set to {}", record.reference_link))
        );
    }
    Ok(())
}

/// Set one section's duration, clamped into range.
#[cfg(not(tarpaulin_include))]
pub fn handle_duration(config: &Config, section: SectionKey, seconds: f64) -> Result<()> {
    let requested = serde_json::Number::from_f64(seconds).map(Value::Number);
    let secs = coerce_duration(requested.as_ref());

    let (_, record) = update_record(config, |record| {
        record.durations.set(section, secs);
        Ok(())
    })?;
    let theme = current_theme();
    println!(
        "{}",
        theme.success_text(&format!(
            "{} now lasts {}s (total {}).",
            section.title(),
            record.durations.get(section),
            format_duration(f64::from(record.durations.total()))
        ))
    );
    if f64::from(secs) != seconds {
        println!(
            "{}",
            theme.secondary_text("Durations are whole seconds between 3 and 90.")
        );
    }
    Ok(())
}

/// Replace all durations with a preset.
#[cfg(not(tarpaulin_include))]
pub fn handle_preset(config: &Config, preset: Preset) -> Result<()> {
    let (_, record) = update_record(config, |record| {
        record.durations = preset.durations();
        Ok(())
    })?;
    let [p, r, e, s] = record.durations.in_order();
    println!(
        "{}",
        current_theme().success_text(&format!(
            "Applied preset {}: {}/{}/{}/{}s, total {}.",
            preset,
            p,
            r,
            e,
            s,
            format_duration(f64::from(record.durations.total()))
        ))
    );
    Ok(())
}
