use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::BlobResult;

/// Core blob storage operations - must be implemented by all storage backends
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob under `key`
    async fn put(&self, key: &str, content_type: Option<&str>, body: Bytes)
        -> BlobResult<PutResult>;

    /// Read the full content. A missing key is `BlobError::NotFound`.
    async fn get(&self, key: &str) -> BlobResult<GetResult>;

    /// Get blob metadata without content
    async fn head(&self, key: &str) -> BlobResult<ObjectHead>;

    /// Delete a blob. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> BlobResult<()>;

    /// Informational locator for a key; not an access grant.
    fn public_url(&self, key: &str) -> String;
}

/// Signed URL support
#[async_trait]
pub trait SignedUrlBlobStore: BlobStore {
    /// Generate a URL granting read access for `expires_in`
    async fn sign_get(&self, key: &str, expires_in: Duration) -> BlobResult<String>;
}

/// Result of a successful put operation
#[derive(Debug, Clone)]
pub struct PutResult {
    pub etag: Option<String>,
    pub size_bytes: u64,
}

/// Result of a get operation
#[derive(Debug, Clone)]
pub struct GetResult {
    pub body: Bytes,
    pub size_bytes: u64,
    pub content_type: Option<String>,
    pub etag: Option<String>,
}

/// Metadata about a blob
#[derive(Debug, Clone)]
pub struct ObjectHead {
    pub size_bytes: u64,
    pub content_type: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<i64>,
}

/// Strategy for generating blob keys
pub trait BlobKeyStrategy: Send + Sync {
    /// Generate a fresh, unpredictable key for an uploaded file
    fn object_key(&self, prefix: &str, filename: &str) -> String;
}

/// Default key strategy: `<prefix>/<uuid><file extension>`
#[derive(Debug, Clone, Default)]
pub struct DefaultKeyStrategy;

impl BlobKeyStrategy for DefaultKeyStrategy {
    fn object_key(&self, prefix: &str, filename: &str) -> String {
        let id = uuid::Uuid::new_v4();
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            format!("{id}{ext}")
        } else {
            format!("{prefix}/{id}{ext}")
        }
    }
}
