//! Export, import and cloud deck documents.
//!
//! Three JSON shapes carry a record outside the local store:
//!
//! - the export document (`version`, `createdAt`, `appName`, `prepData`, plus
//!   a flattened `sections` array for interoperability)
//! - the cloud deck (`title`, `totalSec`, `durations`, `sections`,
//!   `referenceLink`)
//! - the legacy flat record (`point`, `reason`, ... at the top level)
//!
//! Import accepts all of them. Missing or unknown fields fall back to
//! defaults; the only hard failure besides unparseable JSON is a non-empty
//! reference link that is not a valid http(s) URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::record::{validate_link, PrepRecord, RecordError, SectionDurations};
use super::section::SectionKey;

/// Version written into export documents.
pub const EXPORT_VERSION: &str = "1.0";

/// Application name written into export documents.
pub const APP_NAME: &str = "prepdeck";

const EXPECTED_SHAPE: &str = "expected a JSON object with a `sections` array of \
{key, text, link} entries, a `prepData` object, or top-level point/reason/example/summary fields";

/// Errors raised while importing a document.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Import file is not valid JSON ({0}); {shape}", shape = EXPECTED_SHAPE)]
    Malformed(#[from] serde_json::Error),

    #[error("Import document has the wrong shape; {shape}", shape = EXPECTED_SHAPE)]
    WrongShape,

    #[error(transparent)]
    InvalidLink(#[from] RecordError),
}

/// One section in the flattened `sections` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub key: SectionKey,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

/// Flatten a record into section entries. Only the example carries the link.
pub fn section_entries(record: &PrepRecord) -> Vec<SectionEntry> {
    SectionKey::ALL
        .iter()
        .map(|&key| SectionEntry {
            key,
            text: record.text(key).to_string(),
            link: if key == SectionKey::Example {
                record.reference_link.clone()
            } else {
                String::new()
            },
        })
        .collect()
}

/// A JSON backup file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub app_name: String,
    pub prep_data: PrepRecord,
    pub sections: Vec<SectionEntry>,
}

impl ExportDocument {
    pub fn new(record: &PrepRecord, created_at: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            created_at,
            app_name: APP_NAME.to_string(),
            prep_data: record.clone(),
            sections: section_entries(record),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// The object stored per deck in the cloud bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudDeck {
    pub title: String,
    pub total_sec: u32,
    pub durations: SectionDurations,
    pub sections: Vec<SectionEntry>,
    pub reference_link: String,
}

impl Default for CloudDeck {
    fn default() -> Self {
        Self::from_record(&PrepRecord::default())
    }
}

impl CloudDeck {
    pub fn from_record(record: &PrepRecord) -> Self {
        Self {
            title: record.title(),
            total_sec: record.durations.total(),
            durations: record.durations,
            sections: section_entries(record),
            reference_link: record.reference_link.clone(),
        }
    }

    /// Convert back into a record bound to `deck_id`.
    pub fn to_record(&self, deck_id: &str) -> Result<PrepRecord, ImportError> {
        let value = serde_json::to_value(self)?;
        let mut record = import_value(&value)?;
        record.deck_id = deck_id.to_string();
        Ok(record)
    }
}

/// Import a record from JSON text in any accepted shape.
pub fn import_str(json: &str) -> Result<PrepRecord, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    import_value(&value)
}

/// Import a record from an already parsed JSON value.
pub fn import_value(value: &Value) -> Result<PrepRecord, ImportError> {
    let object = value.as_object().ok_or(ImportError::WrongShape)?;

    // Export documents wrap the record; the wrapper's own `sections` copy is
    // derived from `prepData` and therefore ignored.
    if let Some(inner) = object.get("prepData") {
        let inner = inner.as_object().ok_or(ImportError::WrongShape)?;
        debug!("importing export document (prepData)");
        return import_object(inner);
    }

    import_object(object)
}

fn import_object(object: &Map<String, Value>) -> Result<PrepRecord, ImportError> {
    let mut record = PrepRecord::default();

    // Legacy flat fields
    for key in SectionKey::ALL {
        if let Some(text) = object.get(key.as_str()).and_then(Value::as_str) {
            record.set_text(key, text);
        }
    }

    // Flattened sections array takes precedence over flat fields
    let mut example_link: Option<String> = None;
    if let Some(entries) = object.get("sections").and_then(Value::as_array) {
        for entry in entries.iter().filter_map(Value::as_object) {
            let Some(key) = entry
                .get("key")
                .and_then(Value::as_str)
                .and_then(|k| k.parse::<SectionKey>().ok())
            else {
                debug!("skipping section entry without a known key");
                continue;
            };
            let text = entry
                .get("text")
                .or_else(|| entry.get("content"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            record.set_text(key, text);

            if key == SectionKey::Example {
                example_link = entry
                    .get("link")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .filter(|l| !l.trim().is_empty());
            }
        }
    }

    let link = object
        .get("referenceLink")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|l| !l.trim().is_empty())
        .or(example_link)
        .unwrap_or_default();
    record.reference_link = validate_link(&link)?;

    record.deck_id = object
        .get("deckId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    record.durations = SectionDurations::from_value(object.get("durations"));

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_record() -> PrepRecord {
        let mut record = PrepRecord {
            point: "Ship weekly".to_string(),
            reason: "Small batches fail small".to_string(),
            example: "Team A cut incidents by half".to_string(),
            summary: "So: ship weekly".to_string(),
            reference_link: "https://example.com/report".to_string(),
            deck_id: "deck-1".to_string(),
            ..PrepRecord::default()
        };
        record.durations.set(SectionKey::Example, 40);
        record
    }

    #[test]
    fn sections_only_point_uses_defaults_elsewhere() {
        let record = import_str(r#"{"sections":[{"key":"point","text":"X"}]}"#).unwrap();
        assert_eq!(record.point, "X");
        assert_eq!(record.reason, "");
        assert_eq!(record.example, "");
        assert_eq!(record.summary, "");
        assert_eq!(record.reference_link, "");
        assert_eq!(record.deck_id, "");
        assert_eq!(record.durations, SectionDurations::default());
    }

    #[test]
    fn export_then_import_keeps_texts_and_durations() {
        let record = sample_record();
        let created = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let json = ExportDocument::new(&record, created).to_json_pretty().unwrap();

        let imported = import_str(&json).unwrap();
        assert_eq!(imported, record);
    }

    #[test]
    fn export_document_has_expected_fields() {
        let created = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let doc = ExportDocument::new(&sample_record(), created);
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["version"], EXPORT_VERSION);
        assert_eq!(value["appName"], APP_NAME);
        assert_eq!(value["createdAt"], "2026-01-02T03:04:05Z");
        assert_eq!(value["prepData"]["point"], "Ship weekly");
        assert_eq!(value["sections"][2]["link"], "https://example.com/report");
        assert_eq!(value["sections"][0]["link"], "");
    }

    #[test]
    fn legacy_flat_shape_imports() {
        let record = import_str(
            r#"{"point":"a","reason":"b","example":"c","summary":"d","referenceLink":""}"#,
        )
        .unwrap();
        assert_eq!(record.text(SectionKey::Summary), "d");
        assert_eq!(record.reference_link, "");
    }

    #[test]
    fn example_section_link_becomes_reference_link() {
        let value = json!({
            "sections": [{"key": "example", "text": "case", "link": "https://x.example/y"}]
        });
        let record = import_value(&value).unwrap();
        assert_eq!(record.reference_link, "https://x.example/y");
    }

    #[test]
    fn invalid_link_is_rejected() {
        let err = import_str(r#"{"point":"a","referenceLink":"nope"}"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidLink(_)));
    }

    #[test]
    fn malformed_json_and_wrong_shape_are_described() {
        let err = import_str("{not json").unwrap_err();
        assert!(matches!(err, ImportError::Malformed(_)));
        assert!(err.to_string().contains("sections"));

        let err = import_str("[1,2,3]").unwrap_err();
        assert!(matches!(err, ImportError::WrongShape));
    }

    #[test]
    fn unknown_keys_and_wrong_types_fall_back() {
        let record = import_str(
            r#"{"sections":[{"key":"intro","text":"?"},{"key":"reason","text":5}],
                "durations":{"reason":"fast"},"extra":true}"#,
        )
        .unwrap();
        assert_eq!(record.reason, "");
        assert_eq!(record.durations.reason, 15);
    }

    #[test]
    fn cloud_deck_round_trip() {
        let record = sample_record();
        let deck = CloudDeck::from_record(&record);
        assert_eq!(deck.total_sec, 15 + 15 + 40 + 15);
        assert_eq!(deck.title, "Ship weekly");

        let back = deck.to_record("deck-1").unwrap();
        assert_eq!(back, record);
    }
}
