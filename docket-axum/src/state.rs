use std::sync::Arc;

use docket_core::DocumentService;

/// Router state: the one service every document route dispatches to.
#[derive(Clone)]
pub struct DocketAxumState {
    pub service: Arc<dyn DocumentService>,
}

impl DocketAxumState {
    pub fn new(service: Arc<dyn DocumentService>) -> Self {
        Self { service }
    }
}
