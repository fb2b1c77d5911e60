use std::fmt;

use async_trait::async_trait;

use crate::document::{
    CreateDocument, Document, DocumentChanges, DocumentDownload, Page, Pagination,
};
use crate::errors::{DocError, DocResult};

/// The operations a document service exposes to the outside world.
///
/// Transports (HTTP, queues, CLIs) name an operation, optionally an id and a
/// payload; the access layer turns that into one [`DocumentService`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::List => "list",
        }
    }

    /// Whether the operation addresses a single document by id.
    pub fn requires_id(&self) -> bool {
        matches!(self, Operation::Read | Operation::Update | Operation::Delete)
    }

    /// Status code reported when the operation succeeds.
    pub fn success_status(&self) -> u16 {
        match self {
            Operation::Create => 201,
            _ => 200,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The document workflow, as seen by transports.
///
/// Every method has a default that fails with "Method not implemented",
/// so test doubles override only what they exercise.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Store the content and its metadata; both or neither survive.
    async fn create(&self, _input: CreateDocument) -> DocResult<Document> {
        Err(DocError::internal("Method not implemented: create").into_anyhow())
    }

    /// Fetch metadata plus a time-bounded download URL.
    async fn read(&self, _id: &str) -> DocResult<DocumentDownload> {
        Err(DocError::internal("Method not implemented: read").into_anyhow())
    }

    /// Change `description` and/or `tags`.
    async fn update(&self, _id: &str, _changes: DocumentChanges) -> DocResult<Document> {
        Err(DocError::internal("Method not implemented: update").into_anyhow())
    }

    /// Remove the content, then the metadata.
    async fn delete(&self, _id: &str) -> DocResult<()> {
        Err(DocError::internal("Method not implemented: delete").into_anyhow())
    }

    /// Newest first, with the total count of live documents.
    async fn list(&self, _page: Pagination) -> DocResult<Page<Document>> {
        Err(DocError::internal("Method not implemented: list").into_anyhow())
    }
}
