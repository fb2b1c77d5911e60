use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use docket_core::{Document, DocumentChanges, NewDocument};
use tokio::sync::RwLock;

use crate::{DocumentStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<String, Row>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct Row {
    // Insertion order breaks ties between identical `created_at` values.
    seq: u64,
    document: Document,
}

/// In-process [`DocumentStore`] with the same soft-delete and
/// unique-`storage_key` rules as the PostgreSQL backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub async fn live_count(&self) -> usize {
        self.inner
            .read()
            .await
            .rows
            .values()
            .filter(|r| r.document.deleted_at.is_none())
            .count()
    }

    /// Any record for the id, tombstoned or not.
    pub async fn raw(&self, id: &str) -> Option<Document> {
        self.inner
            .read()
            .await
            .rows
            .get(id)
            .map(|r| r.document.clone())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, document: NewDocument) -> StoreResult<Document> {
        let mut inner = self.inner.write().await;

        if inner
            .rows
            .values()
            .any(|r| r.document.storage_key == document.storage_key)
        {
            return Err(StoreError::Conflict(format!(
                "duplicate storage_key {}",
                document.storage_key
            )));
        }

        let now = Utc::now();
        let created = Document {
            id: uuid::Uuid::new_v4().to_string(),
            file_name: document.file_name,
            file_size: document.file_size,
            content_type: document.content_type,
            storage_bucket: document.storage_bucket,
            storage_key: document.storage_key,
            storage_url: document.storage_url,
            description: document.description,
            tags: document.tags,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.rows.insert(
            created.id.clone(),
            Row {
                seq,
                document: created.clone(),
            },
        );

        Ok(created)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Document> {
        let inner = self.inner.read().await;
        inner
            .rows
            .get(id)
            .filter(|r| r.document.deleted_at.is_none())
            .map(|r| r.document.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self, limit: i64, offset: i64) -> StoreResult<(Vec<Document>, i64)> {
        let inner = self.inner.read().await;

        let mut live: Vec<&Row> = inner
            .rows
            .values()
            .filter(|r| r.document.deleted_at.is_none())
            .collect();
        live.sort_by(|a, b| {
            b.document
                .created_at
                .cmp(&a.document.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        let total = live.len() as i64;
        let items = live
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|r| r.document.clone())
            .collect();

        Ok((items, total))
    }

    async fn update(&self, id: &str, changes: &DocumentChanges) -> StoreResult<Document> {
        let mut inner = self.inner.write().await;
        let row = inner
            .rows
            .get_mut(id)
            .filter(|r| r.document.deleted_at.is_none())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(description) = &changes.description {
            row.document.description = Some(description.clone());
        }
        if let Some(tags) = &changes.tags {
            row.document.tags = Some(tags.clone());
        }
        row.document.updated_at = Utc::now();

        Ok(row.document.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let row = inner
            .rows
            .get_mut(id)
            .filter(|r| r.document.deleted_at.is_none())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let now = Utc::now();
        row.document.deleted_at = Some(now);
        row.document.updated_at = now;
        Ok(())
    }
}
