//! The persisted PREP record.
//!
//! This is the shape written to the local store on every edit and the
//! `prepData` object inside export files. Durations are always kept inside
//! `[MIN_DURATION_SECS, MAX_DURATION_SECS]`; anything that cannot be read as a
//! positive number becomes `DEFAULT_DURATION_SECS` instead of an error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::section::SectionKey;

/// Shortest allowed section duration in seconds.
pub const MIN_DURATION_SECS: u32 = 3;
/// Longest allowed section duration in seconds.
pub const MAX_DURATION_SECS: u32 = 90;
/// Duration used when a value is missing, non-numeric or not positive.
pub const DEFAULT_DURATION_SECS: u32 = 15;

/// Errors raised when editing or validating a record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Invalid reference link '{link}': {reason}. Expected an http(s) URL or an empty value.")]
    InvalidLink { link: String, reason: String },
}

/// Coerce an arbitrary JSON value into a valid duration.
///
/// Numbers (and numeric strings) are rounded and clamped into range;
/// missing, non-numeric and non-positive values become the default.
pub fn coerce_duration(value: Option<&Value>) -> u32 {
    let secs = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match secs {
        Some(s) if s.is_finite() && s > 0.0 => {
            (s.round() as u32).clamp(MIN_DURATION_SECS, MAX_DURATION_SECS)
        }
        _ => DEFAULT_DURATION_SECS,
    }
}

/// Validate a reference link. Empty (after trimming) is accepted.
///
/// Returns the trimmed link on success.
pub fn validate_link(link: &str) -> Result<String, RecordError> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let parsed = url::Url::parse(trimmed).map_err(|e| RecordError::InvalidLink {
        link: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(RecordError::InvalidLink {
            link: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

fn lenient_duration<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_duration(Some(&value)))
}

/// Per-section display durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionDurations {
    #[serde(deserialize_with = "lenient_duration")]
    pub point: u32,
    #[serde(deserialize_with = "lenient_duration")]
    pub reason: u32,
    #[serde(deserialize_with = "lenient_duration")]
    pub example: u32,
    #[serde(deserialize_with = "lenient_duration")]
    pub summary: u32,
}

impl Default for SectionDurations {
    fn default() -> Self {
        Self::uniform(DEFAULT_DURATION_SECS)
    }
}

impl SectionDurations {
    /// Same duration for every section (clamped into range).
    pub fn uniform(secs: u32) -> Self {
        let secs = secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
        Self {
            point: secs,
            reason: secs,
            example: secs,
            summary: secs,
        }
    }

    /// Build from a JSON object keyed by section name, coercing every entry.
    pub fn from_value(value: Option<&Value>) -> Self {
        let object = value.and_then(Value::as_object);
        let get = |key: SectionKey| coerce_duration(object.and_then(|o| o.get(key.as_str())));
        Self {
            point: get(SectionKey::Point),
            reason: get(SectionKey::Reason),
            example: get(SectionKey::Example),
            summary: get(SectionKey::Summary),
        }
    }

    pub fn get(&self, key: SectionKey) -> u32 {
        match key {
            SectionKey::Point => self.point,
            SectionKey::Reason => self.reason,
            SectionKey::Example => self.example,
            SectionKey::Summary => self.summary,
        }
    }

    /// Set one duration, clamped into range. Returns the stored value.
    pub fn set(&mut self, key: SectionKey, secs: u32) -> u32 {
        let secs = if secs == 0 {
            DEFAULT_DURATION_SECS
        } else {
            secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS)
        };
        match key {
            SectionKey::Point => self.point = secs,
            SectionKey::Reason => self.reason = secs,
            SectionKey::Example => self.example = secs,
            SectionKey::Summary => self.summary = secs,
        }
        secs
    }

    /// Durations in presentation order.
    pub fn in_order(&self) -> [u32; 4] {
        [self.point, self.reason, self.example, self.summary]
    }

    pub fn total(&self) -> u32 {
        self.in_order().iter().sum()
    }
}

/// Everything the user edits, as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrepRecord {
    pub point: String,
    pub reason: String,
    pub example: String,
    pub summary: String,
    pub reference_link: String,
    /// Empty until the deck is first saved to the cloud
    pub deck_id: String,
    pub durations: SectionDurations,
}

impl PrepRecord {
    pub fn text(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::Point => &self.point,
            SectionKey::Reason => &self.reason,
            SectionKey::Example => &self.example,
            SectionKey::Summary => &self.summary,
        }
    }

    pub fn set_text(&mut self, key: SectionKey, text: impl Into<String>) {
        let text = text.into();
        match key {
            SectionKey::Point => self.point = text,
            SectionKey::Reason => self.reason = text,
            SectionKey::Example => self.example = text,
            SectionKey::Summary => self.summary = text,
        }
    }

    /// Set the reference link after validating it.
    pub fn set_reference_link(&mut self, link: &str) -> Result<(), RecordError> {
        self.reference_link = validate_link(link)?;
        Ok(())
    }

    /// True when all four sections are blank.
    pub fn is_blank(&self) -> bool {
        SectionKey::ALL
            .iter()
            .all(|&key| self.text(key).trim().is_empty())
    }

    /// Title used for cloud decks and export filenames: first line of the point.
    pub fn title(&self) -> String {
        let first = self.point.lines().map(str::trim).find(|l| !l.is_empty());
        match first {
            Some(line) => {
                let line = line.trim_start_matches('#').trim();
                line.chars().take(60).collect()
            }
            None => "PREP speech".to_string(),
        }
    }
}
