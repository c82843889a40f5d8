//! Deck repository on top of an ObjectStore.
//!
//! Each deck is one JSON object at `decks/<id>/deck.json`. Saves are
//! last-write-wins; there is no conflict detection.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::error::CloudError;
use super::store::ObjectStore;
use crate::deck::exchange::{import_str, CloudDeck, ImportError};
use crate::deck::PrepRecord;

/// Prefix under which all decks live.
pub const DECKS_PREFIX: &str = "decks/";

/// Object name of a deck inside its directory.
pub const DECK_FILE_NAME: &str = "deck.json";

const DECK_CONTENT_TYPE: &str = "application/json";

/// Object path of deck `id`.
pub fn deck_path(id: &str) -> String {
    format!("{}{}/{}", DECKS_PREFIX, id, DECK_FILE_NAME)
}

/// Fresh random deck id.
pub fn new_deck_id() -> String {
    Uuid::new_v4().to_string()
}

/// Ids become path segments, so only a safe alphabet is accepted.
pub fn validate_deck_id(id: &str) -> Result<(), CloudError> {
    let valid = !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(CloudError::Rejected(format!(
            "invalid deck id '{}' (letters, digits, '-' and '_' only)",
            id
        )))
    }
}

/// One entry of `list_decks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSummary {
    pub id: String,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Cloud deck operations.
pub struct DeckRepository {
    store: Box<dyn ObjectStore>,
}

impl DeckRepository {
    pub fn new(store: Box<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.name()
    }

    pub fn save_deck(&self, id: &str, deck: &CloudDeck) -> Result<(), CloudError> {
        validate_deck_id(id)?;
        let body = serde_json::to_vec_pretty(deck).map_err(|e| CloudError::InvalidDeck {
            id: id.to_string(),
            source: ImportError::Malformed(e),
        })?;
        self.store.put(&deck_path(id), &body, DECK_CONTENT_TYPE)?;
        info!(id, backend = self.store.name(), "saved deck");
        Ok(())
    }

    /// Fetch the raw deck document.
    pub fn load_deck(&self, id: &str) -> Result<CloudDeck, CloudError> {
        validate_deck_id(id)?;
        let body = self.store.get(&deck_path(id))?;
        serde_json::from_slice(&body).map_err(|e| CloudError::InvalidDeck {
            id: id.to_string(),
            source: ImportError::Malformed(e),
        })
    }

    /// Fetch deck `id` and convert it into a record bound to that id.
    ///
    /// Goes through import validation, so any accepted document shape works
    /// and an invalid reference link is rejected.
    pub fn load_record(&self, id: &str) -> Result<PrepRecord, CloudError> {
        validate_deck_id(id)?;
        let body = self.store.get(&deck_path(id))?;
        let invalid = |source| CloudError::InvalidDeck {
            id: id.to_string(),
            source,
        };
        let text = String::from_utf8(body).map_err(|_| invalid(ImportError::WrongShape))?;
        let mut record = import_str(&text).map_err(invalid)?;
        record.deck_id = id.to_string();
        debug!(id, "loaded deck");
        Ok(record)
    }

    /// Save `record` under its deck id, assigning a new id first if it has none.
    ///
    /// Returns the id used.
    pub fn save_record(&self, record: &mut PrepRecord) -> Result<String, CloudError> {
        if record.deck_id.is_empty() {
            record.deck_id = new_deck_id();
            debug!(id = %record.deck_id, "assigned new deck id");
        }
        self.save_deck(&record.deck_id, &CloudDeck::from_record(record))?;
        Ok(record.deck_id.clone())
    }

    /// All decks, newest first. Decks without a timestamp sort last.
    pub fn list_decks(&self) -> Result<Vec<DeckSummary>, CloudError> {
        let suffix = format!("/{}", DECK_FILE_NAME);
        let mut decks: Vec<DeckSummary> = self
            .store
            .list(DECKS_PREFIX)?
            .into_iter()
            .filter(|object| object.path.ends_with(&suffix))
            .filter_map(|object| {
                let id = object.path.split('/').nth(1)?.to_string();
                (!id.is_empty() && object.path == deck_path(&id)).then_some(DeckSummary {
                    id,
                    last_modified: object.last_modified,
                })
            })
            .collect();
        decks.sort_by(|a, b| b.last_modified.cmp(&a.last_modified).then(a.id.cmp(&b.id)));
        Ok(decks)
    }

    pub fn delete_deck(&self, id: &str) -> Result<(), CloudError> {
        validate_deck_id(id)?;
        self.store.remove(&deck_path(id))?;
        info!(id, backend = self.store.name(), "deleted deck");
        Ok(())
    }
}
