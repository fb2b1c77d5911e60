use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, instrument};

use crate::config::MAX_PRESIGN_TTL;
use crate::{
    BlobConfig, BlobError, BlobKeyStrategy, BlobPut, BlobReceipt, BlobResult, DefaultKeyStrategy,
    SignedUrl, SignedUrlBlobStore,
};

/// The blob adapter - what the document workflow embeds.
///
/// Owns key generation so keys are always server-side and never reused.
pub struct BlobAdapter {
    store: Arc<dyn SignedUrlBlobStore>,
    keys: Arc<dyn BlobKeyStrategy>,
    config: BlobConfig,
}

impl BlobAdapter {
    pub fn new<S: SignedUrlBlobStore + 'static>(store: S, config: BlobConfig) -> Self {
        Self::from_arc(Arc::new(store), config)
    }

    /// Share a store that other code also holds.
    pub fn from_arc(store: Arc<dyn SignedUrlBlobStore>, config: BlobConfig) -> Self {
        Self {
            store,
            keys: Arc::new(DefaultKeyStrategy),
            config,
        }
    }

    /// Create with custom key strategy
    pub fn with_key_strategy<K: BlobKeyStrategy + 'static>(mut self, keys: K) -> Self {
        self.keys = Arc::new(keys);
        self
    }

    /// Store new content under a freshly generated key.
    ///
    /// Nothing is retried; a failed write surfaces as `BlobError::Write`.
    #[instrument(skip_all, fields(filename = %put.filename, size = put.size()))]
    pub async fn put(&self, put: BlobPut) -> BlobResult<BlobReceipt> {
        if put.size() > self.config.max_blob_bytes {
            return Err(BlobError::invalid(format!(
                "Blob size {} exceeds maximum {}",
                put.size(),
                self.config.max_blob_bytes
            )));
        }

        let key = self.keys.object_key(&self.config.key_prefix, &put.filename);
        let result = self
            .store
            .put(&key, Some(put.content_type.as_str()), put.body)
            .await?;
        debug!(key = %key, bytes = result.size_bytes, "blob stored");

        let url = self.store.public_url(&key);
        let mut receipt = BlobReceipt::new(key, url, result.size_bytes)
            .with_content_type(put.content_type)
            .with_filename(put.filename);
        if let Some(etag) = result.etag {
            receipt = receipt.with_etag(etag);
        }

        Ok(receipt)
    }

    /// Issue a read URL valid for exactly `ttl` from now.
    ///
    /// The key is verified first; an unverifiable key or a signing failure
    /// is `BlobError::Access`. The object itself is untouched.
    #[instrument(skip(self))]
    pub async fn presigned_get(&self, key: &str, ttl: Duration) -> BlobResult<SignedUrl> {
        if ttl.is_zero() || ttl > MAX_PRESIGN_TTL {
            return Err(BlobError::access(
                key,
                format!("presign ttl {}s outside (0, {}s]", ttl.as_secs(), MAX_PRESIGN_TTL.as_secs()),
            ));
        }

        self.store
            .head(key)
            .await
            .map_err(|e| BlobError::access(key, e))?;

        let url = match self.store.sign_get(key, ttl).await {
            Ok(url) => url,
            Err(e @ BlobError::Access { .. }) => return Err(e),
            Err(e) => return Err(BlobError::access(key, e)),
        };

        Ok(SignedUrl::issued_now(url, ttl))
    }

    /// Presigned read with the configured validity window.
    pub async fn presigned_get_default(&self, key: &str) -> BlobResult<SignedUrl> {
        self.presigned_get(key, self.config.presign_ttl).await
    }

    /// Full-content read. A missing key is `BlobError::NotFound`.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> BlobResult<Bytes> {
        let result = self.store.get(key).await?;
        Ok(result.body)
    }

    /// Idempotent delete.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> BlobResult<()> {
        self.store.delete(key).await
    }

    pub fn config(&self) -> &BlobConfig {
        &self.config
    }
}
