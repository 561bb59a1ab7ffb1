use std::sync::Arc;

use crate::llm_client::ChatCompletion;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion seam. Production wires `LlmClient`; tests swap in scripted fakes.
    pub llm: Arc<dyn ChatCompletion>,
    /// Record store bound to the deployment's table and resolved field mapping.
    pub store: Arc<RecordStore>,
}
