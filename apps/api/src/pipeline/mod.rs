//! Per-job orchestration — drives one job through intake:
//! find-or-create, mirror fields, score, record score, then the proposal
//! gate with its conditional write.
//!
//! Jobs in a batch run strictly one after another. LLM failures degrade and
//! continue; store failures abort the job and with it the batch.

pub mod prompts;
pub mod proposal;
pub mod scoring;

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::ChatCompletion;
use crate::models::job::JobRecord;
use crate::pipeline::proposal::{generate_proposal, should_generate};
use crate::pipeline::scoring::score_job;
use crate::store::fields::CanonicalField;
use crate::store::{content_fields, RecordStore};

/// Per-job entry in the webhook response. `proposal` appears only when one
/// was generated and recorded.
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub status: String,
    pub job_title: String,
    pub external_record_id: String,
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<String>,
}

/// Processes a single job to completion.
///
/// Steps:
/// 1. Find or create the store record; the returned id is the identity for
///    every later write
/// 2. Mirror the job's content fields into the record
/// 3. Score the job (degraded outcomes read as the minimum score)
/// 4. Record the score
/// 5. Above the threshold, draft a proposal and record it only when one
///    actually came back
pub async fn process_job(
    llm: &dyn ChatCompletion,
    store: &RecordStore,
    job: &JobRecord,
) -> Result<JobResult, AppError> {
    info!("Processing job: {}", job.title);

    // Step 1: record identity
    let record_id = store.find_or_create(&job.record_id, job).await?;

    // Step 2: content mirror
    store.update_fields(&record_id, &content_fields(job)).await?;

    // Step 3: scoring (never fails the job)
    let outcome = score_job(llm, job).await;
    let score = outcome.value();

    // Step 4: record the score
    store
        .update_fields(&record_id, &[(CanonicalField::Score, json!(score))])
        .await?;

    let mut result = JobResult {
        status: "success".to_string(),
        job_title: job.title.clone(),
        external_record_id: record_id.clone(),
        score,
        proposal: None,
    };

    // Step 5: proposal gate
    if should_generate(score) {
        info!("Score {score} clears the proposal threshold, drafting proposal");
        if let Some(proposal) = generate_proposal(llm, job).await {
            store
                .update_fields(&record_id, &[(CanonicalField::Proposal, json!(proposal))])
                .await?;
            result.proposal = Some(proposal);
        }
    }

    Ok(result)
}
