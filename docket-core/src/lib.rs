//! docket-core: transport-agnostic core for Docket.
//!
//! Holds the document model, the error taxonomy, the `DocumentService`
//! trait that transports call into, and the configuration store.

pub mod config;
pub mod document;
pub mod errors;
pub mod service;

pub use config::{DocketConfig, DocketConfigSnapshot};
pub use document::{
    CreateDocument, Document, DocumentChanges, DocumentDownload, NewDocument, Page, Pagination,
    DEFAULT_LIMIT,
};
pub use errors::{DocError, DocResult, ErrorKind};
pub use service::{DocumentService, Operation};
