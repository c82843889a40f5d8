//! `prep cloud` handlers

use anyhow::{Context, Result};
use chrono::Local;

use prepdeck::cloud::{open_store, DeckRepository, DeckSummary};
use prepdeck::theme::{current_theme, Theme};
use prepdeck::Config;

use super::{load_record, local_store};

fn repository(config: &Config) -> Result<DeckRepository> {
    let store = open_store(&config.cloud, &config.cloud_directory()?)?;
    Ok(DeckRepository::new(store))
}

/// Save the current record, assigning a deck id on first save.
#[cfg(not(tarpaulin_include))]
pub fn handle_save(config: &Config) -> Result<()> {
    let repo = repository(config)?;
    let store = local_store(config)?;
    let mut record = load_record(config, &store);

    let id = repo.save_record(&mut record)?;
    // Persist a newly assigned id so the next save overwrites the same deck
    store
        .save(&record)
        .with_context(|| format!("Failed to save {}", store.path().display()))?;

    println!(
        "{}",
        current_theme().success_text(&format!(
            "Saved deck {} ({} backend).",
            id,
            repo.backend_name()
        ))
    );
    Ok(())
}

/// Replace the current record with cloud deck `id`.
#[cfg(not(tarpaulin_include))]
pub fn handle_load(config: &Config, id: &str) -> Result<()> {
    let repo = repository(config)?;
    let record = repo.load_record(id)?;

    let store = local_store(config)?;
    store
        .save(&record)
        .with_context(|| format!("Failed to save {}", store.path().display()))?;

    println!(
        "{}",
        current_theme().success_text(&format!("Loaded deck {}: \"{}\".", id, record.title()))
    );
    Ok(())
}

/// List cloud decks, newest first. The current deck is marked with `*`.
#[cfg(not(tarpaulin_include))]
pub fn handle_list(config: &Config) -> Result<()> {
    let repo = repository(config)?;
    let decks = repo.list_decks()?;
    let store = local_store(config)?;
    let current = load_record(config, &store).deck_id;

    print!("{}", render_list(&decks, &current, &current_theme()));
    Ok(())
}

/// Text shown by `prep cloud list`.
pub fn render_list(decks: &[DeckSummary], current_id: &str, theme: &Theme) -> String {
    if decks.is_empty() {
        return format!("{}\n", theme.secondary_text("No decks in cloud storage."));
    }
    let mut out = String::new();
    for deck in decks {
        let marker = if deck.id == current_id { "*" } else { " " };
        let modified = deck
            .last_modified
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        out.push_str(&format!(
            "{} {}  {}\n",
            marker,
            theme.primary_text(&deck.id),
            theme.secondary_text(&modified)
        ));
    }
    out.push_str(&theme.secondary_text(&format!("{} deck(s)", decks.len())));
    out.push('\n');
    out
}

/// Delete cloud deck `id`, unlinking the current record if it pointed there.
#[cfg(not(tarpaulin_include))]
pub fn handle_delete(config: &Config, id: &str) -> Result<()> {
    let repo = repository(config)?;
    repo.delete_deck(id)?;

    let store = local_store(config)?;
    let mut record = load_record(config, &store);
    if record.deck_id == id {
        record.deck_id.clear();
        store
            .save(&record)
            .with_context(|| format!("Failed to save {}", store.path().display()))?;
    }

    println!(
        "{}",
        current_theme().success_text(&format!("Deleted deck {}.", id))
    );
    Ok(())
}
