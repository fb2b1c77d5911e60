use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use chrono::Utc;
use docket_axum::{axum, AxumApp};
use docket_core::{
    CreateDocument, DocError, DocResult, Document, DocumentChanges, DocumentDownload,
    DocumentService, Page, Pagination,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn document(id: &str) -> Document {
    let now = Utc::now();
    Document {
        id: id.to_string(),
        file_name: "a.pdf".to_string(),
        file_size: 5,
        content_type: "application/pdf".to_string(),
        storage_bucket: "docs".to_string(),
        storage_key: format!("documents/{id}.pdf"),
        storage_url: format!("https://docs.s3.us-east-1.amazonaws.com/documents/{id}.pdf"),
        description: None,
        tags: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

/// Knows exactly one document, `doc-1`.
struct OneDocument;

#[async_trait::async_trait]
impl DocumentService for OneDocument {
    async fn create(&self, input: CreateDocument) -> DocResult<Document> {
        let mut doc = document("doc-1");
        doc.file_name = input.file_name;
        Ok(doc)
    }

    async fn read(&self, id: &str) -> DocResult<DocumentDownload> {
        if id != "doc-1" {
            return Err(DocError::not_found("Document not found").into_anyhow());
        }
        Ok(DocumentDownload {
            document: document(id),
            download_url: "https://signed.example/doc-1".to_string(),
            expires_in: Duration::from_secs(3600),
        })
    }

    async fn update(&self, id: &str, changes: DocumentChanges) -> DocResult<Document> {
        if changes.is_empty() {
            return Err(DocError::validation("No fields to update").into_anyhow());
        }
        let mut doc = document(id);
        doc.tags = changes.tags;
        Ok(doc)
    }

    async fn delete(&self, _id: &str) -> DocResult<()> {
        Err(DocError::storage_write("Failed to delete file from storage: outage").into_anyhow())
    }

    async fn list(&self, page: Pagination) -> DocResult<Page<Document>> {
        Ok(Page {
            items: vec![document("doc-1")],
            total: 7,
            limit: page.limit,
            offset: page.offset,
        })
    }
}

fn app() -> AxumApp {
    axum(Arc::new(OneDocument))
        .use_documents("/documents")
        .service("/health", || async { "ok" })
        .with_http_layers(1024)
}

async fn send(app: AxumApp, method: &str, uri: &str, body: Option<&str>) -> (u16, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if body.is_some() {
        req = req.header("content-type", "application/json");
    }
    let req = req
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let res = app.router.oneshot(req).await.unwrap();
    let status = res.status().as_u16();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn create_returns_201_envelope() {
    let (status, body) = send(
        app(),
        "POST",
        "/documents",
        Some(r#"{"file_name":"x.pdf","file_content":"aGVsbG8=","content_type":"application/pdf"}"#),
    )
    .await;

    assert_eq!(status, 201);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Document created successfully");
    assert_eq!(body["data"]["file_name"], "x.pdf");
}

#[tokio::test]
async fn malformed_json_is_invalid_body() {
    let (status, body) = send(app(), "POST", "/documents", Some("{\"file_name\":")).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"success": false, "message": "Invalid request body"}));
}

#[tokio::test]
async fn read_includes_download_url_and_expiry() {
    let (status, body) = send(app(), "GET", "/documents/doc-1", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Document retrieved successfully");
    assert_eq!(body["download_url"], "https://signed.example/doc-1");
    assert_eq!(body["url_expires_in"], "1 hour");
    assert_eq!(body["data"]["id"], "doc-1");
}

#[tokio::test]
async fn read_unknown_id_is_404() {
    let (status, body) = send(app(), "GET", "/documents/missing", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Document not found");
}

#[tokio::test]
async fn undecodable_id_is_enveloped_400() {
    for (method, body) in [("GET", None), ("PATCH", Some(r#"{"tags":"x"}"#)), ("DELETE", None)] {
        let (status, body) = send(app(), method, "/documents/%FF", body).await;
        assert_eq!(status, 400, "{method}");
        assert_eq!(
            body,
            json!({"success": false, "message": "Invalid document ID"}),
            "{method}"
        );
    }
}

#[tokio::test]
async fn put_and_patch_both_update() {
    for method in ["PUT", "PATCH"] {
        let (status, body) = send(app(), method, "/documents/doc-1", Some(r#"{"tags":"x"}"#)).await;
        assert_eq!(status, 200, "{method}");
        assert_eq!(body["message"], "Document updated successfully");
        assert_eq!(body["data"]["tags"], "x");
    }
}

#[tokio::test]
async fn empty_update_is_400() {
    let (status, body) = send(app(), "PUT", "/documents/doc-1", Some("{}")).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "No fields to update");
}

#[tokio::test]
async fn update_of_immutable_field_is_400() {
    let (status, body) = send(
        app(),
        "PATCH",
        "/documents/doc-1",
        Some(r#"{"storage_key":"documents/other.pdf"}"#),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn storage_failure_is_500_with_message_only() {
    let (status, body) = send(app(), "DELETE", "/documents/doc-1", None).await;
    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({"success": false, "message": "Failed to delete file from storage: outage"})
    );
}

#[tokio::test]
async fn list_applies_pagination_defaults() {
    let (status, body) = send(app(), "GET", "/documents?limit=0&offset=-2", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Documents retrieved successfully");
    assert_eq!(body["total"], 7);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(app(), "GET", "/documents?limit=3&offset=1", None).await;
    assert_eq!(body["limit"], 3);
    assert_eq!(body["offset"], 1);
}

#[tokio::test]
async fn unknown_route_and_method_are_route_not_found() {
    let (status, body) = send(app(), "GET", "/nope", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Route not found");

    let (status, body) = send(app(), "POST", "/documents/doc-1", Some("{}")).await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let big = format!(r#"{{"file_name":"a.txt","file_content":"{}","content_type":"text/plain"}}"#, "A".repeat(4096));
    let (status, body) = send(app(), "POST", "/documents", Some(&big)).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn health_is_ok() {
    let res = app()
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn request_id_is_generated_or_preserved() {
    let res = app()
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(res.headers().get("x-request-id").is_some());

    let provided = HeaderValue::from_static("req-test-123");
    let res = app()
        .router
        .oneshot(
            Request::builder()
                .uri("/documents/doc-1")
                .header("x-request-id", provided.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), &provided);
}

#[tokio::test]
async fn any_origin_is_allowed() {
    let res = app()
        .router
        .oneshot(
            Request::builder()
                .uri("/documents")
                .header("origin", "https://elsewhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
