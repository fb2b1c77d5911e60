use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Receipt returned after successfully storing a blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobReceipt {
    pub key: String,
    pub url: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub filename: String,
    pub etag: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BlobReceipt {
    pub fn new(key: String, url: String, size_bytes: u64) -> Self {
        Self {
            key,
            url,
            size_bytes,
            content_type: String::new(),
            filename: String::new(),
            etag: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_etag<S: Into<String>>(mut self, etag: S) -> Self {
        self.etag = Some(etag.into());
        self
    }
}

/// A time-bounded read grant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    pub url: String,
    pub expires_in: Duration,
    pub expires_at: DateTime<Utc>,
}

impl SignedUrl {
    /// Anchor the validity window at the moment of issuance.
    pub fn issued_now(url: String, expires_in: Duration) -> Self {
        let window = chrono::Duration::from_std(expires_in).unwrap_or(chrono::Duration::zero());
        Self {
            url,
            expires_in,
            expires_at: Utc::now() + window,
        }
    }
}
