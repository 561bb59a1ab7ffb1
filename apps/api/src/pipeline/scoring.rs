//! Job scoring — sends the rubric plus the formatted job to the LLM and
//! normalizes the reply into a score in `[MIN_SCORE, MAX_SCORE]`.
//!
//! Fail-safe-low: a scoring outage must not stall intake. Transport errors,
//! unparseable replies, and out-of-range numbers all degrade to `MIN_SCORE`,
//! recorded as a first-class `Degraded` outcome rather than an error.

use tracing::{info, warn};

use crate::llm_client::{ChatCompletion, CompletionParams, LlmError};
use crate::models::job::JobRecord;
use crate::pipeline::prompts::{format_scoring_details, SCORING_SYSTEM};

/// Score recorded when the model reply cannot be used.
pub const MIN_SCORE: u32 = 1;
pub const MAX_SCORE: u32 = 100;

/// Single-number reply: tiny token budget, default sampling.
const SCORING_PARAMS: CompletionParams = CompletionParams {
    temperature: 1.0,
    top_p: Some(1.0),
    max_tokens: 10,
};

/// Why a scoring call fell back to `MIN_SCORE`.
#[derive(Debug)]
pub enum DegradeCause {
    /// The completion service failed (transport, auth, rate limit).
    Service(LlmError),
    /// The reply was not an integer.
    Unparseable(String),
    /// The reply was an integer outside `[MIN_SCORE, MAX_SCORE]`.
    OutOfRange(i64),
}

/// Outcome of one scoring call. The degraded branch is control flow, not an
/// error: the job reads as a poor match and the pipeline continues.
#[derive(Debug)]
pub enum ScoreOutcome {
    Scored(u32),
    Degraded(DegradeCause),
}

impl ScoreOutcome {
    /// The score to record. Degraded outcomes read as the minimum.
    pub fn value(&self) -> u32 {
        match self {
            ScoreOutcome::Scored(score) => *score,
            ScoreOutcome::Degraded(_) => MIN_SCORE,
        }
    }
}

/// Scores one job against the fixed rubric.
pub async fn score_job(llm: &dyn ChatCompletion, job: &JobRecord) -> ScoreOutcome {
    let details = format_scoring_details(job);

    let outcome = match llm.complete(SCORING_SYSTEM, &details, SCORING_PARAMS).await {
        Ok(reply) => normalize_score(&reply),
        Err(e) => ScoreOutcome::Degraded(DegradeCause::Service(e)),
    };

    match &outcome {
        ScoreOutcome::Scored(score) => info!("Job '{}' scored {score}", job.title),
        ScoreOutcome::Degraded(cause) => warn!(
            "Scoring degraded for job '{}' ({cause:?}), recording {MIN_SCORE}",
            job.title
        ),
    }

    outcome
}

/// Parses the trimmed model reply as an integer and range-checks it.
fn normalize_score(reply: &str) -> ScoreOutcome {
    let trimmed = reply.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if (MIN_SCORE as i64..=MAX_SCORE as i64).contains(&n) => {
            ScoreOutcome::Scored(n as u32)
        }
        Ok(n) => ScoreOutcome::Degraded(DegradeCause::OutOfRange(n)),
        Err(_) => ScoreOutcome::Degraded(DegradeCause::Unparseable(trimmed.to_string())),
    }
}
