//! The object-store trait, provider selection, and visibility policy.

use async_trait::async_trait;
use sceneshot_core::error::CoreError;

/// Errors from an object-store provider.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Local filesystem IO failure.
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote backend failure (request, auth, bucket policy, etc.).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Write access to the blob store holding generated assets.
///
/// Paths are `/`-separated keys relative to the store root; callers are
/// responsible for namespacing (see `sceneshot_core::paths`).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object at `path` with the given content type.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), StorageError>;

    /// Mark an existing object publicly readable and return its public URL.
    async fn make_public(&self, path: &str) -> Result<String, StorageError>;
}

// ---------------------------------------------------------------------------
// Provider selection
// ---------------------------------------------------------------------------

/// Supported object-store backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendType {
    Local,
    S3,
}

impl StorageBackendType {
    /// Parse from a configuration value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            other => Err(CoreError::Validation(format!(
                "Unknown storage backend '{other}'. Must be one of: local, s3"
            ))),
        }
    }

    /// Configuration value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
        }
    }
}

// ---------------------------------------------------------------------------
// Visibility policy
// ---------------------------------------------------------------------------

/// Whether generated assets stay behind access-controlled paths or are
/// made publicly readable after upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetVisibility {
    /// Objects stay under access-controlled rules; records carry the
    /// internal storage path.
    Private,
    /// Objects are marked publicly readable; records carry the public URL.
    Public,
}

impl AssetVisibility {
    /// Parse from a configuration value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            other => Err(CoreError::Validation(format!(
                "Unknown asset visibility '{other}'. Must be one of: private, public"
            ))),
        }
    }

    /// Configuration value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}
