//! Object store backed by a local directory.
//!
//! Objects live under `<root>/<path>`. Useful for a synced folder (Dropbox,
//! a network share) and for tests.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cloud::error::CloudError;
use crate::cloud::store::{ObjectInfo, ObjectStore};

const TMP_SUFFIX: &str = ".tmp";

/// Stores each object as a file below `root`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an object path onto the filesystem, refusing escapes from `root`.
    fn object_path(&self, path: &str) -> Result<PathBuf, CloudError> {
        let relative = Path::new(path);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if path.is_empty() || !plain {
            return Err(CloudError::Rejected(format!("invalid object path '{}'", path)));
        }
        Ok(self.root.join(relative))
    }
}

fn unavailable(path: &Path, e: io::Error) -> CloudError {
    CloudError::Unavailable(format!("{}: {}", path.display(), e))
}

impl ObjectStore for DirectoryStore {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn put(&self, path: &str, body: &[u8], _content_type: &str) -> Result<(), CloudError> {
        let target = self.object_path(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| unavailable(parent, e))?;
        }
        let mut tmp = target.clone().into_os_string();
        tmp.push(TMP_SUFFIX);
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, body).map_err(|e| unavailable(&tmp, e))?;
        fs::rename(&tmp, &target).map_err(|e| unavailable(&target, e))?;
        debug!(path, bytes = body.len(), "stored object");
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Vec<u8>, CloudError> {
        let target = self.object_path(path)?;
        fs::read(&target).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CloudError::NotFound(path.to_string()),
            _ => unavailable(&target, e),
        })
    }

    fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, CloudError> {
        let mut objects = Vec::new();
        if !self.root.exists() {
            return Ok(objects);
        }
        collect_files(&self.root, &self.root, &mut objects)?;
        objects.retain(|info| info.path.starts_with(prefix));
        Ok(objects)
    }

    fn remove(&self, path: &str) -> Result<(), CloudError> {
        let target = self.object_path(path)?;
        fs::remove_file(&target).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CloudError::NotFound(path.to_string()),
            _ => unavailable(&target, e),
        })?;
        // Drop the now empty deck directory; ignore failures
        if let Some(parent) = target.parent() {
            if parent != self.root {
                let _ = fs::remove_dir(parent);
            }
        }
        debug!(path, "removed object");
        Ok(())
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<ObjectInfo>) -> Result<(), CloudError> {
    let entries = fs::read_dir(dir).map_err(|e| unavailable(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| unavailable(dir, e))?;
        let path = entry.path();
        let metadata = entry.metadata().map_err(|e| unavailable(&path, e))?;

        if metadata.is_dir() {
            collect_files(root, &path, out)?;
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if key.ends_with(TMP_SUFFIX) {
            continue;
        }
        out.push(ObjectInfo {
            path: key,
            last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            size: Some(metadata.len()),
        });
    }
    Ok(())
}
