use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from metadata store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No live record for the id.
    #[error("document not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was violated (duplicate `storage_key`).
    #[error("constraint violation: {0}")]
    Conflict(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(db.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Connection(err.to_string())
            }
            _ => Self::Backend(err.to_string()),
        }
    }
}
