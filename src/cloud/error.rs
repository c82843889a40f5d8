//! Cloud storage errors.

use crate::deck::exchange::ImportError;

/// Errors that can occur during cloud deck operations.
///
/// Backend failures are mapped onto these variants at the backend boundary,
/// so callers never see transport-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    #[error("Cloud storage is not configured. Set `backend` in the [cloud] section of the config (see `prep config edit`).")]
    NotConfigured,

    #[error("Cloud storage is unavailable: {0}")]
    Unavailable(String),

    #[error("Not found in cloud storage: {0}")]
    NotFound(String),

    #[error("Cloud storage rejected the request: {0}")]
    Rejected(String),

    #[error("Deck '{id}' is not a valid deck: {source}")]
    InvalidDeck {
        id: String,
        #[source]
        source: ImportError,
    },
}

impl CloudError {
    /// Whether retrying later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, CloudError::Unavailable(_))
    }
}
