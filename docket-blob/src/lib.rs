//! # docket-blob: blob storage for document content
//!
//! Content bytes live here, metadata lives elsewhere. The crate gives the
//! document workflow one thing to embed, [`BlobAdapter`], over any backend
//! implementing [`SignedUrlBlobStore`].
//!
//! ```text
//! ┌──────────────────┐
//! │ Document service │  ← workflow + compensation
//! ├──────────────────┤
//! │   BlobAdapter    │  ← key generation, size guard, presign bounds
//! ├──────────────────┤
//! │    BlobStore     │  ← S3 / memory primitives
//! └──────────────────┘
//! ```
//!
//! ```rust
//! use docket_blob::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> BlobResult<()> {
//! let adapter = BlobAdapter::new(MemoryBlobStore::new("docs"), BlobConfig::default());
//!
//! let receipt = adapter
//!     .put(BlobPut::new("hello.txt", "text/plain", &b"hello"[..]))
//!     .await?;
//! assert!(receipt.key.starts_with("documents/"));
//!
//! let signed = adapter.presigned_get_default(&receipt.key).await?;
//! assert_eq!(signed.expires_in.as_secs(), 3600);
//!
//! adapter.delete(&receipt.key).await?;
//! adapter.delete(&receipt.key).await?; // idempotent
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
mod error;
mod memory_store;
mod receipt;
mod s3_store;
pub mod store;
mod types;

pub use adapter::BlobAdapter;
pub use config::BlobConfig;
pub use error::{BlobError, BlobResult};
pub use memory_store::MemoryBlobStore;
pub use receipt::{BlobReceipt, SignedUrl};
pub use s3_store::{S3CompatibleStore, S3Config};
pub use store::{
    BlobKeyStrategy, BlobStore, DefaultKeyStrategy, GetResult, ObjectHead, PutResult,
    SignedUrlBlobStore,
};
pub use types::BlobPut;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BlobAdapter, BlobConfig, BlobError, BlobPut, BlobReceipt, BlobResult, BlobStore,
        MemoryBlobStore, SignedUrl, SignedUrlBlobStore,
    };
}
