pub mod documents_service;
pub mod documents_shared;

pub use documents_service::DocumentsService;
