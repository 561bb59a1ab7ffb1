//! POST /webhook/upwork-jobs — batch intake endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::pipeline::{process_job, JobResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: String,
    pub message: String,
    pub results: Vec<JobResult>,
}

/// Accepts a JSON array of job payloads. The whole array is validated before
/// any job is processed; jobs then run strictly in input order. The first
/// unrecovered error fails the entire request — store writes already made
/// for earlier jobs are not rolled back.
pub async fn handle_webhook(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> Result<Json<WebhookResponse>, AppError> {
    info!("Received webhook data");

    let Value::Array(items) = raw else {
        return Err(AppError::MalformedRequest(
            "Expected a JSON array of jobs".to_string(),
        ));
    };

    let jobs = validate_batch(items)?;
    info!("Successfully validated {} jobs", jobs.len());

    let mut results = Vec::with_capacity(jobs.len());
    for job in &jobs {
        let result = process_job(state.llm.as_ref(), &state.store, job).await?;
        info!("Processed job: {}", job.title);
        results.push(result);
    }

    Ok(Json(WebhookResponse {
        status: "success".to_string(),
        message: format!("Processed {} jobs successfully", results.len()),
        results,
    }))
}

/// Coerces every array element into a `JobRecord` and runs required-field
/// validation. Either the whole batch is accepted or the request is rejected
/// before any side effect.
fn validate_batch(items: Vec<Value>) -> Result<Vec<JobRecord>, AppError> {
    let mut jobs = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let job: JobRecord = serde_json::from_value(item).map_err(|e| {
            AppError::MalformedRequest(format!("Invalid job data format at index {index}: {e}"))
        })?;
        job.validate().map_err(|e| {
            AppError::MalformedRequest(format!("Invalid job data format at index {index}: {e}"))
        })?;
        jobs.push(job);
    }
    Ok(jobs)
}
