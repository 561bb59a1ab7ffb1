use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Returns a fixed status object confirming the service is up.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "online",
        "message": "Upwork Job Processor is running"
    }))
}
