//! JSON file store for the current record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::StoreError;
use crate::deck::PrepRecord;

/// Default file name inside the data directory.
pub const RECORD_FILE_NAME: &str = "prep.json";

/// The record file on disk.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record, `Ok(None)` when the file does not exist.
    ///
    /// Malformed JSON is reported as an error here; `load` is the lenient
    /// variant the CLI uses.
    pub fn try_load(&self) -> Result<Option<PrepRecord>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let record = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    /// Read the record, falling back to the default when absent or broken.
    pub fn load(&self) -> PrepRecord {
        match self.try_load() {
            Ok(Some(record)) => {
                debug!(path = %self.path.display(), "loaded record");
                record
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "no record yet, using defaults");
                PrepRecord::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring unreadable record: {}", e);
                PrepRecord::default()
            }
        }
    }

    /// Write the record, replacing the file atomically.
    pub fn save(&self, record: &PrepRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(record)?;
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        debug!(path = %self.path.display(), "saved record");
        Ok(())
    }
}
