use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing, Router,
};
use docket_core::Operation;

use crate::dispatch::{dispatch, AccessRequest, AccessResponse};
use crate::{DocketAxumError, DocketAxumState};

type HandlerResult = Result<AccessResponse, DocketAxumError>;

/// Fallback for paths and methods no route matches.
pub async fn route_not_found() -> AccessResponse {
    AccessResponse::route_not_found()
}

async fn create(
    State(state): State<DocketAxumState>,
    body: Result<Bytes, BytesRejection>,
) -> HandlerResult {
    let body = body?;
    let request = AccessRequest::new(Operation::Create).with_payload(body);
    Ok(dispatch(state.service.as_ref(), request).await)
}

async fn list(
    State(state): State<DocketAxumState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> HandlerResult {
    let Query(query) = query?;
    let request = AccessRequest::new(Operation::List).with_query(query);
    Ok(dispatch(state.service.as_ref(), request).await)
}

async fn read(
    State(state): State<DocketAxumState>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult {
    let Path(id) = id?;
    let request = AccessRequest::new(Operation::Read).with_id(id);
    Ok(dispatch(state.service.as_ref(), request).await)
}

// PUT and PATCH are the same partial update.
async fn update(
    State(state): State<DocketAxumState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> HandlerResult {
    let Path(id) = id?;
    let body = body?;
    let request = AccessRequest::new(Operation::Update)
        .with_id(id)
        .with_payload(body);
    Ok(dispatch(state.service.as_ref(), request).await)
}

async fn remove(
    State(state): State<DocketAxumState>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult {
    let Path(id) = id?;
    let request = AccessRequest::new(Operation::Delete).with_id(id);
    Ok(dispatch(state.service.as_ref(), request).await)
}

/// Routes for one document collection, meant to be nested under its path.
///
/// Unsupported methods answer like unknown routes.
pub fn documents_router(state: DocketAxumState) -> Router<()> {
    Router::new()
        .route(
            "/",
            routing::get(list).post(create).fallback(route_not_found),
        )
        .route(
            "/{id}",
            routing::get(read)
                .put(update)
                .patch(update)
                .delete(remove)
                .fallback(route_not_found),
        )
        .with_state(state)
}

