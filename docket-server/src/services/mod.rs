use std::sync::Arc;

use docket_blob::{BlobAdapter, S3CompatibleStore};
use docket_core::DocError;
use docket_store::{DocumentStore, PostgresDocumentStore};

use crate::Settings;

pub mod documents;

pub use documents::DocumentsService;

/// Connect the S3 and PostgreSQL backends and assemble the workflow.
pub async fn configure(settings: &Settings) -> anyhow::Result<Arc<DocumentsService>> {
    let s3 = S3CompatibleStore::connect(settings.s3.clone())
        .await
        .map_err(|e| DocError::configuration(format!("Failed to initialize S3 client: {e}")).with_source(e))?;

    let store: Arc<dyn DocumentStore> = Arc::new(
        PostgresDocumentStore::connect(settings.database.clone())
            .await
            .map_err(|e| {
                DocError::persistence(format!("Failed to initialize database: {e}")).with_source(e)
            })?,
    );

    let blobs = BlobAdapter::new(s3, settings.blob.clone());
    Ok(Arc::new(DocumentsService::new(
        blobs,
        store,
        settings.s3.bucket.clone(),
    )))
}
