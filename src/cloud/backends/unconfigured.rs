//! Placeholder backend used when no cloud storage is configured.

use crate::cloud::error::CloudError;
use crate::cloud::store::{ObjectInfo, ObjectStore};

/// Fails every operation with `CloudError::NotConfigured`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

impl ObjectStore for Unconfigured {
    fn name(&self) -> &'static str {
        "none"
    }

    fn put(&self, _path: &str, _body: &[u8], _content_type: &str) -> Result<(), CloudError> {
        Err(CloudError::NotConfigured)
    }

    fn get(&self, _path: &str) -> Result<Vec<u8>, CloudError> {
        Err(CloudError::NotConfigured)
    }

    fn list(&self, _prefix: &str) -> Result<Vec<ObjectInfo>, CloudError> {
        Err(CloudError::NotConfigured)
    }

    fn remove(&self, _path: &str) -> Result<(), CloudError> {
        Err(CloudError::NotConfigured)
    }
}
