use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use docket_blob::{BlobAdapter, BlobPut};
use docket_core::{
    bail_doc, CreateDocument, DocError, DocResult, Document, DocumentChanges, DocumentDownload,
    DocumentService, NewDocument, Page, Pagination,
};
use docket_store::DocumentStore;
use tracing::{error, info, instrument, warn};

use super::documents_shared::{self, blob_error, store_error};

/// Download URLs handed out by `read` are valid for exactly this long.
pub const DOWNLOAD_URL_TTL: Duration = Duration::from_secs(60 * 60);

/// The document workflow.
///
/// Content goes to the blob store, metadata to the document store.
/// Create writes the blob first and deletes it again if the metadata write
/// fails; delete removes the blob before the metadata.
pub struct DocumentsService {
    blobs: BlobAdapter,
    store: Arc<dyn DocumentStore>,
    bucket: String,
}

impl DocumentsService {
    pub fn new(blobs: BlobAdapter, store: Arc<dyn DocumentStore>, bucket: impl Into<String>) -> Self {
        Self {
            blobs,
            store,
            bucket: bucket.into(),
        }
    }

    /// Best-effort removal of a blob whose metadata never landed.
    async fn compensate_create(&self, key: &str, cause: DocError) -> DocError {
        match self.blobs.delete(key).await {
            Ok(()) => {
                warn!(key, "metadata write failed, uploaded blob removed");
                cause
            }
            Err(e) => {
                error!(key, error = %e, "metadata write failed and blob cleanup failed, blob orphaned");
                cause.with_compensation_failure(format!("failed to delete blob {key}: {e}"))
            }
        }
    }
}

#[async_trait]
impl DocumentService for DocumentsService {
    #[instrument(skip_all, fields(file_name = %input.file_name))]
    async fn create(&self, input: CreateDocument) -> DocResult<Document> {
        let content = documents_shared::decode_content(&input, self.blobs.config().max_blob_bytes)
            .map_err(DocError::into_anyhow)?;
        let file_size = content.len() as i64;

        let receipt = self
            .blobs
            .put(BlobPut::new(
                input.file_name.clone(),
                input.content_type.clone(),
                content,
            ))
            .await
            .map_err(|e| blob_error(e, "Failed to upload file").into_anyhow())?;

        let record = NewDocument {
            file_name: input.file_name,
            file_size,
            content_type: input.content_type,
            storage_bucket: self.bucket.clone(),
            storage_key: receipt.key.clone(),
            storage_url: receipt.url,
            description: input.description,
            tags: input.tags,
        };

        match self.store.create(record).await {
            Ok(document) => {
                info!(id = %document.id, key = %document.storage_key, "document created");
                Ok(document)
            }
            Err(e) => {
                let cause = store_error(e, "Failed to create document record");
                Err(self.compensate_create(&receipt.key, cause).await.into_anyhow())
            }
        }
    }

    #[instrument(skip(self))]
    async fn read(&self, id: &str) -> DocResult<DocumentDownload> {
        let document = self
            .store
            .get_by_id(id)
            .await
            .map_err(|e| store_error(e, "Failed to retrieve document").into_anyhow())?;

        let signed = self
            .blobs
            .presigned_get(&document.storage_key, DOWNLOAD_URL_TTL)
            .await
            .map_err(|e| blob_error(e, "Failed to generate download URL").into_anyhow())?;

        Ok(DocumentDownload {
            document,
            download_url: signed.url,
            expires_in: signed.expires_in,
        })
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: DocumentChanges) -> DocResult<Document> {
        if changes.is_empty() {
            bail_doc!(validation, documents_shared::NO_FIELDS);
        }

        let document = self
            .store
            .update(id, &changes)
            .await
            .map_err(|e| store_error(e, "Failed to update document").into_anyhow())?;

        info!("document updated");
        Ok(document)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> DocResult<()> {
        let document = self
            .store
            .get_by_id(id)
            .await
            .map_err(|e| store_error(e, "Failed to retrieve document").into_anyhow())?;

        // Metadata stays put until the blob is gone, so a retry finds it again.
        self.blobs
            .delete(&document.storage_key)
            .await
            .map_err(|e| blob_error(e, "Failed to delete file from storage").into_anyhow())?;

        if let Err(e) = self.store.delete(id).await {
            error!(key = %document.storage_key, error = %e, "blob deleted but metadata delete failed");
            return Err(store_error(e, "Failed to delete document").into_anyhow());
        }

        info!(key = %document.storage_key, "document deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, page: Pagination) -> DocResult<Page<Document>> {
        let (items, total) = self
            .store
            .list(page.limit, page.offset)
            .await
            .map_err(|e| store_error(e, "Failed to list documents").into_anyhow())?;

        Ok(Page {
            items,
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }
}
