use axum::{
    extract::rejection::{BytesRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use docket_core::DocError;

use crate::dispatch::{AccessResponse, INVALID_BODY, INVALID_ID, INVALID_QUERY};

/// Handler error: anything that fails before reaching [`crate::dispatch`].
#[derive(Debug)]
pub struct DocketAxumError(pub anyhow::Error);

impl From<anyhow::Error> for DocketAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<BytesRejection> for DocketAxumError {
    fn from(rejection: BytesRejection) -> Self {
        Self(
            DocError::validation(INVALID_BODY)
                .with_source(anyhow::anyhow!(rejection.body_text()))
                .into_anyhow(),
        )
    }
}

impl From<PathRejection> for DocketAxumError {
    fn from(rejection: PathRejection) -> Self {
        Self(
            DocError::validation(INVALID_ID)
                .with_source(anyhow::anyhow!(rejection.body_text()))
                .into_anyhow(),
        )
    }
}

impl From<QueryRejection> for DocketAxumError {
    fn from(rejection: QueryRejection) -> Self {
        Self(
            DocError::validation(INVALID_QUERY)
                .with_source(anyhow::anyhow!(rejection.body_text()))
                .into_anyhow(),
        )
    }
}

impl IntoResponse for DocketAxumError {
    fn into_response(self) -> Response {
        AccessResponse::from_error(self.0).into_response()
    }
}
