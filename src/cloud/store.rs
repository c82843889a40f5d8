//! ObjectStore trait and object metadata.

use chrono::{DateTime, Utc};

use super::error::CloudError;

/// Metadata of one stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Path relative to the bucket, e.g. `decks/<id>/deck.json`
    pub path: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub size: Option<u64>,
}

/// A bucket of objects addressed by slash-separated paths.
///
/// Each implementation wraps one storage service and maps its failures to
/// `CloudError`. Calls are blocking and never retried.
pub trait ObjectStore: Send + Sync {
    /// Human-readable backend name for logs and messages.
    fn name(&self) -> &'static str;

    /// Store `body` at `path`, replacing any existing object.
    fn put(&self, path: &str, body: &[u8], content_type: &str) -> Result<(), CloudError>;

    /// Fetch the object at `path`.
    fn get(&self, path: &str) -> Result<Vec<u8>, CloudError>;

    /// List objects whose path starts with `prefix`, in no particular order.
    fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, CloudError>;

    /// Delete the object at `path`.
    fn remove(&self, path: &str) -> Result<(), CloudError>;
}
