//! Log file setup.
//!
//! The presentation view owns the terminal, so logs never go to stderr.
//! They are appended to `<data_dir>/prepdeck/prep.log` instead.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config;

/// Environment variable overriding the configured log level.
pub const LOG_ENV: &str = "PREPDECK_LOG";

const FALLBACK_DIRECTIVE: &str = "info";

/// First usable filter directive: `PREPDECK_LOG`, then the config, then `info`.
pub fn filter_directive(env_value: Option<&str>, config_level: &str) -> String {
    [env_value, Some(config_level)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty() && EnvFilter::try_new(directive).is_ok())
        .unwrap_or(FALLBACK_DIRECTIVE)
        .to_string()
}

/// Install the global subscriber writing to the log file.
///
/// Returns the log file path. Call once, before any other work.
pub fn init(config_level: &str) -> Result<PathBuf> {
    let path = config::log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let env_value = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(env_value.as_deref(), config_level);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_wins_over_config() {
        assert_eq!(filter_directive(Some("debug"), "warn"), "debug");
    }

    #[test]
    fn config_used_without_env() {
        assert_eq!(filter_directive(None, "prepdeck=trace"), "prepdeck=trace");
        assert_eq!(filter_directive(Some("  "), "warn"), "warn");
    }

    #[test]
    fn invalid_directives_fall_back() {
        assert_eq!(filter_directive(Some("prepdeck=loud"), "prepdeck=verbose"), "info");
        assert_eq!(filter_directive(None, ""), "info");
    }
}
