//! Configuration management
//!
//! `config.toml` lives in `<config_dir>/prepdeck/`. Every field has a default,
//! so a missing file or a partial file is fine. `PREPDECK_HOME` relocates both
//! configuration (`$PREPDECK_HOME/config`) and data (`$PREPDECK_HOME/data`).

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item, Table};
use tracing::{debug, warn};

use crate::cloud::DEFAULT_BUCKET;
use crate::deck::Preset;
use crate::player::{PresentOptions, DEFAULT_FRAME_INTERVAL};
use crate::player::input::{InputRouter, DEFAULT_RESET_KEY};
use crate::player::playback::DEFAULT_SUSPEND_THRESHOLD;
use crate::storage::RECORD_FILE_NAME;

/// Environment variable relocating all configuration and data.
pub const HOME_ENV: &str = "PREPDECK_HOME";

const APP_DIR: &str = "prepdeck";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "prep.log";

/// Shortest accepted frame interval.
const MIN_FRAME_INTERVAL_MS: u64 = 10;

/// The suspend threshold is at least this many frame intervals.
const SUSPEND_THRESHOLD_FRAMES: u32 = 3;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub presentation: PresentationConfig,
    pub storage: StorageConfig,
    pub cloud: CloudConfig,
    pub logging: LoggingConfig,
}

/// `[presentation]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Time between frames while playing (milliseconds)
    pub frame_interval_ms: u64,
    /// Frame gaps longer than this are treated as a suspension (milliseconds)
    pub suspend_threshold_ms: u64,
    /// Stop the clock while the terminal window is unfocused
    pub freeze_when_unfocused: bool,
    /// Key that restarts the presentation from the first slide
    pub reset_key: String,
    /// Preset applied to a brand-new record (empty = built-in defaults)
    pub default_preset: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL.as_millis() as u64,
            suspend_threshold_ms: DEFAULT_SUSPEND_THRESHOLD.as_millis() as u64,
            freeze_when_unfocused: false,
            reset_key: DEFAULT_RESET_KEY.to_string(),
            default_preset: String::new(),
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Record file location (empty = `<data_dir>/prepdeck/prep.json`)
    pub record_path: String,
}

/// Which object store backs `prep cloud`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudBackend {
    #[default]
    None,
    Directory,
    Http,
}

/// `[cloud]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub backend: CloudBackend,
    /// Base URL of the HTTP object store
    pub endpoint: String,
    pub bucket: String,
    /// Bearer token for the HTTP object store (empty = none)
    pub token: String,
    /// Root of the directory backend (empty = `<data_dir>/prepdeck/cloud`)
    pub directory: String,
    pub timeout_secs: u64,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            backend: CloudBackend::None,
            endpoint: String::new(),
            bucket: DEFAULT_BUCKET.to_string(),
            token: String::new(),
            directory: String::new(),
            timeout_secs: 10,
        }
    }
}

impl CloudConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `prepdeck=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn home_override() -> Option<PathBuf> {
    env::var_os(HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Directory holding `config.toml`.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = home_override() {
        return Ok(home.join("config"));
    }
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_DIR))
}

/// Directory holding the record, the log file and the directory backend.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = home_override() {
        return Ok(home.join("data"));
    }
    let base = dirs::data_dir().context("Could not determine data directory")?;
    Ok(base.join(APP_DIR))
}

/// Path of the log file.
pub fn log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOG_FILE_NAME))
}

impl Config {
    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load the configuration, or defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write the configuration, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Where the local record is stored.
    pub fn record_path(&self) -> Result<PathBuf> {
        let configured = self.storage.record_path.trim();
        if configured.is_empty() {
            Ok(data_dir()?.join(RECORD_FILE_NAME))
        } else {
            Ok(PathBuf::from(configured))
        }
    }

    /// Root of the directory cloud backend, before the bucket is appended.
    pub fn cloud_directory(&self) -> Result<PathBuf> {
        let configured = self.cloud.directory.trim();
        if configured.is_empty() {
            Ok(data_dir()?.join("cloud"))
        } else {
            Ok(PathBuf::from(configured))
        }
    }

    /// Preset for new records, ignoring (and logging) unknown names.
    pub fn default_preset(&self) -> Option<Preset> {
        let name = self.presentation.default_preset.trim();
        if name.is_empty() {
            return None;
        }
        match name.parse() {
            Ok(preset) => Some(preset),
            Err(e) => {
                warn!("ignoring presentation.default_preset: {}", e);
                None
            }
        }
    }

    /// Presentation tunables; out-of-range values fall back to defaults.
    pub fn present_options(&self) -> PresentOptions {
        let presentation = &self.presentation;
        let defaults = PresentOptions::default();

        let mut chars = presentation.reset_key.trim().chars();
        let reset_key = match (chars.next(), chars.next()) {
            (Some(c), None) if InputRouter::is_reserved(c) => {
                warn!(
                    value = %presentation.reset_key,
                    "presentation.reset_key is already bound to another action, using '{}'",
                    defaults.reset_key
                );
                defaults.reset_key
            }
            (Some(c), None) if !c.is_whitespace() => c,
            _ => {
                warn!(
                    value = %presentation.reset_key,
                    "presentation.reset_key must be a single character, using '{}'",
                    defaults.reset_key
                );
                defaults.reset_key
            }
        };

        let frame_interval =
            Duration::from_millis(presentation.frame_interval_ms.max(MIN_FRAME_INTERVAL_MS));
        let configured = if presentation.suspend_threshold_ms == 0 {
            defaults.suspend_threshold
        } else {
            Duration::from_millis(presentation.suspend_threshold_ms)
        };
        // Every regular frame gap must stay below the threshold or the clock never advances.
        let floor = frame_interval * SUSPEND_THRESHOLD_FRAMES;
        let suspend_threshold = if configured < floor {
            warn!(
                configured_ms = configured.as_millis() as u64,
                frame_interval_ms = frame_interval.as_millis() as u64,
                "presentation.suspend_threshold_ms is too close to the frame interval, using {} ms",
                floor.as_millis()
            );
            floor
        } else {
            configured
        };

        PresentOptions {
            frame_interval,
            suspend_threshold,
            freeze_when_unfocused: presentation.freeze_when_unfocused,
            reset_key,
        }
    }
}

/// Result of `migrate_config`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrateResult {
    /// The migrated file content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that did not exist before
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add fields missing from `content` with their default values.
///
/// Existing values, comments and ordering are preserved. Keys the user
/// turned into something other than a table are left alone.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: DocumentMut = content.parse().context("Failed to parse config file")?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?
        .parse()
        .context("Failed to render default config")?;

    let mut result = MigrateResult::default();

    for (section, item) in defaults.iter() {
        let Some(default_table) = item.as_table() else {
            continue;
        };
        if !doc.contains_key(section) {
            doc.insert(section, Item::Table(Table::new()));
            result.sections_added.push(section.to_string());
        }
        let Some(table) = doc.get_mut(section).and_then(Item::as_table_mut) else {
            warn!(section, "config key is not a table, skipping migration");
            continue;
        };
        for (key, value) in default_table.iter() {
            if !table.contains_key(key) {
                table.insert(key, value.clone());
                result.added_fields.push(format!("{}.{}", section, key));
            }
        }
    }

    result.content = doc.to_string();
    Ok(result)
}
