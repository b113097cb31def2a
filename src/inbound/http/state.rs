//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they
//! only depend on domain services and ports and remain testable without
//! network or filesystem access.

use std::sync::Arc;

use crate::domain::DatasetService;
use crate::domain::ports::MessageLog;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Cached loader + derivation engine behind `GET /data`.
    pub dataset: Arc<DatasetService>,
    /// Message log behind the `/messages` endpoints.
    pub messages: Arc<dyn MessageLog>,
}

impl HttpState {
    /// Bundle the dataset service and message log for the handlers.
    pub fn new(dataset: Arc<DatasetService>, messages: Arc<dyn MessageLog>) -> Self {
        Self { dataset, messages }
    }
}
