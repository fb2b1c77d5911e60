//! docket-axum: the access layer for Docket.
//!
//! [`dispatch`] maps an operation name, optional id, optional JSON payload and
//! query map onto one [`docket_core::DocumentService`] call and renders the
//! result as an [`Envelope`] plus status code. The axum routes in [`rest`] are
//! one transport over it.

pub mod app;
pub mod dispatch;
pub mod envelope;
pub mod params;
pub mod rest;
pub mod state;
mod error;
pub use error::DocketAxumError;
pub use state::DocketAxumState;

pub use app::{axum, AxumApp};
pub use dispatch::{dispatch, AccessRequest, AccessResponse};
pub use envelope::Envelope;
