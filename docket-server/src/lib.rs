mod app;
mod config;
pub mod services;

use std::sync::Arc;

use anyhow::Result;
use docket_axum::AxumApp;
use docket_core::{DocError, DocketConfig};

pub use config::Settings;
pub use services::DocumentsService;

/// Read settings from the environment. A missing `DATABASE_URL` or
/// `S3_BUCKET` is a `Configuration` error.
pub fn load_settings() -> Result<Settings, DocError> {
    Settings::from_snapshot(&DocketConfig::from_env().snapshot())
}

/// Connect the real backends and build the HTTP app.
pub async fn build(settings: &Settings) -> Result<AxumApp> {
    let service = services::configure(settings).await?;
    Ok(build_with(service, settings.max_body_bytes))
}

/// Build the HTTP app over an already-assembled service.
pub fn build_with(service: Arc<DocumentsService>, max_body_bytes: usize) -> AxumApp {
    app::docket_app(service, max_body_bytes)
}
