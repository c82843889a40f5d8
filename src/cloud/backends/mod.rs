//! ObjectStore implementations and the factory choosing one from config.

mod directory;
mod http;
mod unconfigured;

pub use directory::DirectoryStore;
pub use http::HttpStore;
pub use unconfigured::Unconfigured;

use std::path::Path;

use tracing::debug;

use super::error::CloudError;
use super::store::ObjectStore;
use crate::config::{CloudBackend, CloudConfig};

/// Build the store selected by `config`.
///
/// `directory_root` is where the directory backend keeps its buckets.
pub fn open_store(
    config: &CloudConfig,
    directory_root: &Path,
) -> Result<Box<dyn ObjectStore>, CloudError> {
    let store: Box<dyn ObjectStore> = match config.backend {
        CloudBackend::None => Box::new(Unconfigured),
        CloudBackend::Directory => Box::new(DirectoryStore::new(directory_root.join(&config.bucket))),
        CloudBackend::Http => {
            let endpoint = config.endpoint.trim();
            if endpoint.is_empty() {
                return Err(CloudError::NotConfigured);
            }
            let token = Some(config.token.trim());
            Box::new(HttpStore::new(endpoint, &config.bucket, token, config.timeout())?)
        }
    };
    debug!(backend = store.name(), "opened object store");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn factory_picks_backend() {
        let dir = TempDir::new().unwrap();
        let mut config = CloudConfig::default();
        assert_eq!(open_store(&config, dir.path()).unwrap().name(), "none");

        config.backend = CloudBackend::Directory;
        assert_eq!(open_store(&config, dir.path()).unwrap().name(), "directory");

        config.backend = CloudBackend::Http;
        assert!(matches!(
            open_store(&config, dir.path()),
            Err(CloudError::NotConfigured)
        ));
        config.endpoint = "http://127.0.0.1:9".to_string();
        assert_eq!(open_store(&config, dir.path()).unwrap().name(), "http");
    }
}
