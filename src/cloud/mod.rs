//! Cloud deck storage
//!
//! Decks are saved to an object store bucket, one JSON document per deck.
//!
//! - `store`: the `ObjectStore` trait every backend implements
//! - `backends/`: `none` (reports not configured), `directory`, `http`
//! - `repository`: deck-level operations (save, load, list, delete)
//! - `error`: `CloudError`, the only error type callers see

pub mod backends;
mod error;
mod repository;
mod store;

pub use backends::open_store;
pub use error::CloudError;
pub use repository::{
    deck_path, new_deck_id, validate_deck_id, DeckRepository, DeckSummary, DECKS_PREFIX,
    DECK_FILE_NAME,
};
pub use store::{ObjectInfo, ObjectStore};

/// Bucket used when the config does not name one.
pub const DEFAULT_BUCKET: &str = "slidesStorage";
