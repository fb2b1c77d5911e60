use async_trait::async_trait;
use docket_core::{Document, DocumentChanges, NewDocument};

use crate::StoreResult;

/// Persistence for document metadata.
///
/// Reads only ever see live records; a tombstoned record behaves as absent.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new record, assigning its id and timestamps.
    async fn create(&self, document: NewDocument) -> StoreResult<Document>;

    async fn get_by_id(&self, id: &str) -> StoreResult<Document>;

    /// One window of live records, newest first, plus the count of all live records.
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<(Vec<Document>, i64)>;

    /// Apply only the supplied fields and bump `updated_at`.
    async fn update(&self, id: &str, changes: &DocumentChanges) -> StoreResult<Document>;

    /// Tombstone the record. Zero rows affected is `NotFound`.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
