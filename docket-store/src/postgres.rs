use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docket_core::{Document, DocumentChanges, NewDocument};
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::config::PostgresConfig;
use crate::{migrations, DocumentStore, StoreError, StoreResult};

const COLUMNS: &str = "id, file_name, file_size, content_type, storage_bucket, storage_key, \
     storage_url, description, tags, created_at, updated_at, deleted_at";

/// Count and page of a listing run in one transaction under this level.
const LIST_ISOLATION: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

fn count_live_sql(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {table} WHERE deleted_at IS NULL")
}

fn page_live_sql(table: &str) -> String {
    format!(
        "SELECT {COLUMNS} FROM {table} WHERE deleted_at IS NULL \
         ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
    )
}

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    file_name: String,
    file_size: i64,
    content_type: String,
    storage_bucket: String,
    storage_key: String,
    storage_url: String,
    description: Option<String>,
    tags: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            file_name: row.file_name,
            file_size: row.file_size,
            content_type: row.content_type,
            storage_bucket: row.storage_bucket,
            storage_key: row.storage_key,
            storage_url: row.storage_url,
            description: row.description,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// PostgreSQL-backed implementation of [`DocumentStore`].
///
/// Deletes set `deleted_at`; every read filters on `deleted_at IS NULL`.
pub struct PostgresDocumentStore {
    pool: PgPool,
    config: Arc<PostgresConfig>,
}

impl PostgresDocumentStore {
    /// Connect, build the pool and bootstrap the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if pool creation fails, or
    /// [`StoreError::Backend`] if the schema bootstrap fails.
    pub async fn connect(config: PostgresConfig) -> StoreResult<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Self::from_pool(pool, config).await
    }

    /// Reuse an existing pool. Runs the schema bootstrap.
    pub async fn from_pool(pool: PgPool, config: PostgresConfig) -> StoreResult<Self> {
        migrations::ensure_schema(&pool, &config)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[instrument(skip_all, fields(storage_key = %document.storage_key))]
    async fn create(&self, document: NewDocument) -> StoreResult<Document> {
        let table = self.config.documents_table();
        let id = uuid::Uuid::new_v4().to_string();

        let query = format!(
            "INSERT INTO {table} \
             (id, file_name, file_size, content_type, storage_bucket, storage_key, \
              storage_url, description, tags, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW()) \
             RETURNING {COLUMNS}"
        );

        let row: DocumentRow = sqlx::query_as(&query)
            .bind(&id)
            .bind(&document.file_name)
            .bind(document.file_size)
            .bind(&document.content_type)
            .bind(&document.storage_bucket)
            .bind(&document.storage_key)
            .bind(&document.storage_url)
            .bind(&document.description)
            .bind(&document.tags)
            .fetch_one(&self.pool)
            .await?;

        debug!(id = %row.id, "document row inserted");
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> StoreResult<Document> {
        let table = self.config.documents_table();
        let query = format!("SELECT {COLUMNS} FROM {table} WHERE id = $1 AND deleted_at IS NULL");

        let row: Option<DocumentRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Document::from)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<(Vec<Document>, i64)> {
        let table = self.config.documents_table();

        let mut tx = self.pool.begin().await?;
        sqlx::query(LIST_ISOLATION).execute(&mut *tx).await?;

        let (total,): (i64,) = sqlx::query_as(&count_live_sql(&table))
            .fetch_one(&mut *tx)
            .await?;

        let rows: Vec<DocumentRow> = sqlx::query_as(&page_live_sql(&table))
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((rows.into_iter().map(Document::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &str, changes: &DocumentChanges) -> StoreResult<Document> {
        let table = self.config.documents_table();

        // NULL parameters leave the column as it was.
        let query = format!(
            "UPDATE {table} SET \
             description = COALESCE($2, description), \
             tags = COALESCE($3, tags), \
             updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );

        let row: Option<DocumentRow> = sqlx::query_as(&query)
            .bind(id)
            .bind(&changes.description)
            .bind(&changes.tags)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Document::from)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> StoreResult<()> {
        let table = self.config.documents_table();
        let query = format!(
            "UPDATE {table} SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL"
        );

        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        debug!("document row tombstoned");
        Ok(())
    }
}
