//! Local-filesystem object store.
//!
//! Stores objects as plain files under a base directory. "Public"
//! objects are addressed through a configured base URL (a static file
//! server or CDN is expected to front the directory); the filesystem
//! itself has no ACL step, so `make_public` only derives the URL.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::store::{ObjectStore, StorageError};

/// Object store backed by a directory on the local filesystem.
pub struct LocalStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalStore {
    /// Create a store rooted at `base_path`.
    ///
    /// * `public_base_url` - URL prefix public objects are served from,
    ///   e.g. `http://localhost:3000/assets`.
    pub fn new(base_path: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Absolute filesystem location for an object key.
    fn object_path(&self, path: &str) -> PathBuf {
        self.base_path.join(Path::new(path))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        let full = self.object_path(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, bytes).await?;
        tracing::debug!(path, "Stored object on local filesystem");
        Ok(())
    }

    async fn make_public(&self, path: &str) -> Result<String, StorageError> {
        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            path
        ))
    }
}
