//! Transport-agnostic request handling.
//!
//! Any transport that can name an operation, an optional id, an optional
//! JSON payload and a query map can drive a [`DocumentService`] through
//! [`dispatch`] and get back a status code plus an [`Envelope`].

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use docket_core::{
    CreateDocument, DocError, DocResult, DocumentChanges, DocumentService, Operation,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::envelope::Envelope;
use crate::params;

pub const INVALID_BODY: &str = "Invalid request body";
pub const ID_REQUIRED: &str = "Document ID is required";
pub const INVALID_ID: &str = "Invalid document ID";
pub const INVALID_QUERY: &str = "Invalid query parameters";
pub const ROUTE_NOT_FOUND: &str = "Route not found";

#[derive(Debug, Clone)]
pub struct AccessRequest {
    pub operation: Operation,
    pub id: Option<String>,
    /// Raw JSON body, decoded per operation.
    pub payload: Option<Bytes>,
    pub query: HashMap<String, String>,
}

impl AccessRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            id: None,
            payload: None,
            query: HashMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessResponse {
    pub status: u16,
    pub envelope: Envelope,
}

impl AccessResponse {
    pub fn new(status: u16, envelope: Envelope) -> Self {
        Self { status, envelope }
    }

    /// Map a failure onto its fixed status code. Only the message leaves;
    /// source chains and compensation detail stay server-side.
    pub fn from_error(err: anyhow::Error) -> Self {
        let doc = DocError::normalize(err).sanitize_for_client();
        Self::new(doc.code(), Envelope::failure(doc.message))
    }

    pub fn route_not_found() -> Self {
        Self::new(404, Envelope::failure(ROUTE_NOT_FOUND))
    }
}

impl IntoResponse for AccessResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.envelope)).into_response()
    }
}

/// Run one request against the service. Never fails; failures become
/// `success: false` envelopes.
pub async fn dispatch(service: &dyn DocumentService, request: AccessRequest) -> AccessResponse {
    let operation = request.operation;
    match run(service, request).await {
        Ok(response) => response,
        Err(err) => {
            let response = AccessResponse::from_error(err);
            if response.status >= 500 {
                tracing::error!(%operation, status = response.status, message = %response.envelope.message, "request failed");
            } else {
                tracing::debug!(%operation, status = response.status, message = %response.envelope.message, "request rejected");
            }
            response
        }
    }
}

async fn run(service: &dyn DocumentService, request: AccessRequest) -> DocResult<AccessResponse> {
    let AccessRequest {
        operation,
        id,
        payload,
        query,
    } = request;
    let status = operation.success_status();
    let id = if operation.requires_id() {
        require_id(id)?
    } else {
        String::new()
    };

    let envelope = match operation {
        Operation::Create => {
            let input: CreateDocument = decode(payload)?;
            let document = service.create(input).await?;
            Envelope::ok("Document created successfully").with_data(to_data(&document)?)
        }
        Operation::Read => {
            let download = service.read(&id).await?;
            let expires_in = download.url_expires_in();
            Envelope::ok("Document retrieved successfully")
                .with_data(to_data(&download.document)?)
                .with_download(download.download_url, expires_in)
        }
        Operation::Update => {
            let changes: DocumentChanges = decode(payload)?;
            let document = service.update(&id, changes).await?;
            Envelope::ok("Document updated successfully").with_data(to_data(&document)?)
        }
        Operation::Delete => {
            service.delete(&id).await?;
            Envelope::ok("Document deleted successfully")
        }
        Operation::List => {
            let page = service.list(params::pagination(&query)).await?;
            Envelope::ok("Documents retrieved successfully")
                .with_data(to_data(&page.items)?)
                .with_page(page.total, page.limit, page.offset)
        }
    };

    Ok(AccessResponse::new(status, envelope))
}

fn require_id(id: Option<String>) -> DocResult<String> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(DocError::validation(ID_REQUIRED).into_anyhow()),
    }
}

fn decode<T: DeserializeOwned>(payload: Option<Bytes>) -> DocResult<T> {
    let bytes = payload.unwrap_or_default();
    serde_json::from_slice(&bytes).map_err(|e| {
        DocError::validation(INVALID_BODY)
            .with_source(e)
            .into_anyhow()
    })
}

fn to_data<T: Serialize>(value: &T) -> DocResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| DocError::internal(format!("Failed to encode response: {e}")).into_anyhow())
}
