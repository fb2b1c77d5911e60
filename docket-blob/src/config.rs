use std::time::Duration;

/// Configuration for blob operations
#[derive(Debug, Clone)]
pub struct BlobConfig {
    /// Absolute max size allowed for a single blob (safety guard)
    pub max_blob_bytes: u64,

    /// Namespace every generated key lives under
    pub key_prefix: String,

    /// Validity window for presigned reads
    pub presign_ttl: Duration,
}

/// Longest validity S3 accepts for a presigned URL.
pub const MAX_PRESIGN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            max_blob_bytes: 100 * 1024 * 1024, // 100MB
            key_prefix: "documents".to_string(),
            presign_ttl: Duration::from_secs(60 * 60),
        }
    }
}

impl BlobConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_blob_bytes(mut self, bytes: u64) -> Self {
        self.max_blob_bytes = bytes;
        self
    }

    pub fn with_key_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_presign_ttl(mut self, ttl: Duration) -> Self {
        self.presign_ttl = ttl;
        self
    }
}
