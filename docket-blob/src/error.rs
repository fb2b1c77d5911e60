use thiserror::Error;

/// Result type for blob operations
pub type BlobResult<T> = Result<T, BlobError>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during blob operations
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Blob not found: {key}")]
    NotFound { key: String },

    #[error("Invalid request: {message}")]
    Invalid { message: String },

    #[error("Failed to write blob {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to read blob {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to issue access URL for {key}: {source}")]
    Access {
        key: String,
        #[source]
        source: BoxError,
    },
}

impl BlobError {
    /// Transport, auth or quota failure while writing or deleting.
    pub fn write<K, E>(key: K, error: E) -> Self
    where
        K: Into<String>,
        E: Into<BoxError>,
    {
        Self::Write {
            key: key.into(),
            source: error.into(),
        }
    }

    /// Transport failure while reading content or metadata.
    pub fn read<K, E>(key: K, error: E) -> Self
    where
        K: Into<String>,
        E: Into<BoxError>,
    {
        Self::Read {
            key: key.into(),
            source: error.into(),
        }
    }

    /// The key could not be verified or the URL could not be signed.
    pub fn access<K, E>(key: K, error: E) -> Self
    where
        K: Into<String>,
        E: Into<BoxError>,
    {
        Self::Access {
            key: key.into(),
            source: error.into(),
        }
    }

    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(key: S) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
