use sqlx::PgPool;

use crate::config::PostgresConfig;

/// Create the documents table and its indexes if they do not exist.
///
/// Safe to run on every startup.
///
/// # Errors
///
/// Returns a [`sqlx::Error`] if any DDL statement fails.
pub async fn ensure_schema(pool: &PgPool, config: &PostgresConfig) -> Result<(), sqlx::Error> {
    let table = config.documents_table();
    let name = &config.table;

    let create_table = format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id TEXT PRIMARY KEY,
            file_name TEXT NOT NULL,
            file_size BIGINT NOT NULL,
            content_type TEXT NOT NULL,
            storage_bucket TEXT NOT NULL,
            storage_key TEXT NOT NULL,
            storage_url TEXT NOT NULL,
            description TEXT,
            tags TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMPTZ
        )"
    );
    let storage_key_index = format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {name}_storage_key_idx ON {table} (storage_key)"
    );
    let deleted_at_index =
        format!("CREATE INDEX IF NOT EXISTS {name}_deleted_at_idx ON {table} (deleted_at)");

    sqlx::query(&create_table).execute(pool).await?;
    sqlx::query(&storage_key_index).execute(pool).await?;
    sqlx::query(&deleted_at_index).execute(pool).await?;

    Ok(())
}
