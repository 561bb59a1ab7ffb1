// All LLM prompt constants for the job pipeline.
// Scoring and proposal generation each pair a fixed system message with a
// user message filled from the job's fields.

use crate::models::job::JobRecord;

/// System prompt for job scoring — the fixed match rubric.
/// The reply contract is a single integer between 1 and 100.
pub const SCORING_SYSTEM: &str = r#"You are an analysis assistant evaluating Upwork job descriptions to determine the best match for me to apply for the potential job. Review each job description step-by-step and assign a score from 1 to 100, with 1 representing a poor match and 100 representing an ideal match based on the following criteria:

1. **Primary Skills Focus (40 points):** 
   - Highest priority: Make.com, Airtable, Python, ChatGPT, task automation, API integration
   - High priority: No-code/low-code tools, Zapier, Integromat, Power Automate
   - Medium priority: Data analysis, process automation, workflow optimization
   Score this section based on how closely the job aligns with these core automation skills.

2. **Project Type & Scope (30 points):**
   - Ideal: Process automation, system integration, workflow optimization
   - Good: Data migration, API development, automation consulting
   - Acceptable: Small WordPress/Shopify tasks, minor site updates
   - Poor fit: Full website builds, design work, ongoing maintenance
   Score based on project type and scope alignment.

3. **Budget & Time Commitment (20 points):**
   - Evaluate hourly rate range ($50-100/hr preferred)
   - Assess project budget vs. complexity
   - Consider time commitment (part-time/flexible preferred)
   Deduct points for unrealistic budgets or excessive time demands.

4. **Red Flags (10 points deduction each):**
   - Vague or minimal job description
   - Unrealistic expectations
   - Design/development focused
   - SEO/marketing focused
   - Gambling/betting/trading
   Deduct points for each red flag present.

*** Your response should be a single number between 1 and 100, representing the overall match percentage. ***

***** ONLY REPLY WITH THE NUMERIC SCORE, FROM 1 to 100 *****"#;

/// Scoring user-message template. Optional fields arrive already defaulted
/// to the "N/A" sentinel by the model layer.
const SCORING_DETAILS_TEMPLATE: &str = r#"
Job Title:
{title}

Job Description:
{description}

Project-based budget (if available):
{budget}

Hourly-based budget (if available):
{hourly_range}

Tagged Skills:
{skills}

Estimated Time:
{estimated_time}"#;

/// System prompt for proposal generation — fixed persona and style contract.
/// The reply contract is a short plaintext cover letter opening with "Hello 👋".
pub const PROPOSAL_SYSTEM: &str = r#"You are an automated assistant specializing in crafting brief Cover Letters for Upwork that are: spartan, intelligent, friendly, professional, and approachable. Generate proposals that are human-sounding and warm without excessive enthusiasm, complex formatting, or filler language. Keep each proposal concise and respectful of the client's time.

**Input Processing**:
   - **Job Description** (required): Review the job description input to understand the client's specific needs, required skills, tasks, and any unique challenges mentioned.

**Output Formatting**:
   - The proposal should be in clear plaintext, without formatting symbols or extra characters. Limit the proposal to around 300 characters to ensure it remains concise and focused.

*YOUR REPLY SHOULD BE PLAINTEXT*  
*ONLY REPLY WITH THE JOB PROPOSAL CONTENT, NOTHING ELSE*

*** START THE PROPOSAL WITH: "Hello 👋" ***

If possible, use the Client's first name in the proposal somewhere.

If the job description wants proof of Make.com scenario experience, please include this link in the proposal: https://bit.ly/rad-make-scenarios and mention this is censored for privacy, or mention they can visit my Upwork Profile for examples of Make.com projects.

Do not use formatting (pound signs, asterisks, etc).

My name is Richard."#;

/// Proposal user-message template.
const PROPOSAL_DETAILS_TEMPLATE: &str = r#"
Job title:
{title}

Job description:
{description}

If this job has project-based pricing, here are the details:
{budget}

If this job has hourly-based pricing, here are the details:
{hourly_range}

Job Skills:
{skills}

Estimated Time:
{estimated_time}"#;

/// Fills the scoring user message from a job's fields.
pub fn format_scoring_details(job: &JobRecord) -> String {
    fill_details(SCORING_DETAILS_TEMPLATE, job)
}

/// Fills the proposal user message from a job's fields.
pub fn format_proposal_details(job: &JobRecord) -> String {
    fill_details(PROPOSAL_DETAILS_TEMPLATE, job)
}

fn fill_details(template: &str, job: &JobRecord) -> String {
    template
        .replace("{title}", &job.title)
        .replace("{description}", &job.description)
        .replace("{budget}", &job.budget)
        .replace("{hourly_range}", &job.hourly_range)
        .replace("{skills}", &job.skills)
        .replace("{estimated_time}", &job.estimated_time)
}
