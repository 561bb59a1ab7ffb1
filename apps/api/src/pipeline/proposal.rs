//! Proposal generation — drafts a short cover letter for jobs scoring above
//! the threshold. Failures collapse to "no proposal" instead of erroring,
//! and the store write for the proposal field is then skipped.

use tracing::warn;

use crate::llm_client::{ChatCompletion, CompletionParams};
use crate::models::job::JobRecord;
use crate::pipeline::prompts::{format_proposal_details, PROPOSAL_SYSTEM};

/// Scores above this get a proposal; 24 and below do not.
pub const PROPOSAL_SCORE_THRESHOLD: u32 = 24;

/// Longer reply, low temperature so proposals read consistently.
const PROPOSAL_PARAMS: CompletionParams = CompletionParams {
    temperature: 0.2,
    top_p: None,
    max_tokens: 500,
};

/// Whether a score clears the proposal gate.
pub fn should_generate(score: u32) -> bool {
    score > PROPOSAL_SCORE_THRESHOLD
}

/// Drafts a proposal for one job. None when the model call fails or yields
/// an empty reply; the caller then records nothing.
pub async fn generate_proposal(llm: &dyn ChatCompletion, job: &JobRecord) -> Option<String> {
    let details = format_proposal_details(job);

    match llm.complete(PROPOSAL_SYSTEM, &details, PROPOSAL_PARAMS).await {
        Ok(reply) => {
            let proposal = reply.trim().to_string();
            if proposal.is_empty() {
                None
            } else {
                Some(proposal)
            }
        }
        Err(e) => {
            warn!("Proposal generation failed for job '{}': {e}", job.title);
            None
        }
    }
}
