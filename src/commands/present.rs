//! `prep present` handler

use anyhow::{bail, Result};

use prepdeck::config;
use prepdeck::deck::Preset;
use prepdeck::player::{present, PresentError, PresentationOutcome};
use prepdeck::theme::current_theme;
use prepdeck::Config;

use super::{load_record, local_store};

/// Present the current record, optionally with a preset's durations.
///
/// The preset only applies to this run; the stored record is unchanged.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, preset: Option<Preset>) -> Result<()> {
    let store = local_store(config)?;
    let mut record = load_record(config, &store);
    if record.is_blank() {
        return Err(PresentError::EmptyDeck.into());
    }
    if let Some(preset) = preset {
        record.durations = preset.durations();
    }
    if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        bail!("`prep present` needs an interactive terminal");
    }

    let theme = current_theme();
    match present(&record, &config.present_options())? {
        PresentationOutcome::Exited => {}
        PresentationOutcome::Interrupted => {
            println!("{}", theme.secondary_text("Presentation interrupted."));
        }
        PresentationOutcome::Failed(message) => {
            println!(
                "{}",
                theme.error_text(&format!("Presentation stopped: {}", message))
            );
            if let Ok(path) = config::log_path() {
                println!(
                    "{}",
                    theme.secondary_text(&format!("Details in {}", path.display()))
                );
            }
        }
    }
    Ok(())
}
