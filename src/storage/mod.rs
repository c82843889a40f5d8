//! Local persistence of the record being edited.
//!
//! One JSON file holds the record. `LocalStore::load` never fails: a
//! missing or unreadable file yields the default record.

mod error;
mod local;

pub use error::StoreError;
pub use local::{LocalStore, RECORD_FILE_NAME};
