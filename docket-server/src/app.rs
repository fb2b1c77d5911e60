use std::sync::Arc;

use docket_axum::{axum, AxumApp};
use docket_core::DocumentService;

/// Mount the document routes, the health check and the HTTP layers.
pub fn docket_app(service: Arc<dyn DocumentService>, max_body_bytes: usize) -> AxumApp {
    axum(service)
        .use_documents("/documents")
        .service("/health", || async { "ok" })
        .with_http_layers(max_body_bytes)
}
