//! Local store errors.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the local record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
