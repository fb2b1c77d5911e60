//! # docket-store: document metadata persistence
//!
//! [`DocumentStore`] is parameterized once for [`docket_core::Document`]; updates
//! take a [`docket_core::DocumentChanges`] so only `description` and `tags` can
//! ever be written after creation.
//!
//! Two backends ship here: [`PostgresDocumentStore`] (`sqlx`) and
//! [`MemoryDocumentStore`]. Both tombstone on delete.

mod config;
mod error;
mod memory;
mod migrations;
mod postgres;
mod store;

pub use config::PostgresConfig;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryDocumentStore;
pub use migrations::ensure_schema;
pub use postgres::PostgresDocumentStore;
pub use store::DocumentStore;
