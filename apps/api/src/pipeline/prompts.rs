// All LLM prompt constants for the outreach pipeline.

/// System prompt for structured extraction — enforces JSON-only output.
pub const EXTRACT_SYSTEM: &str =
    "You are an expert job description analyst. \
    Extract structured information from a job posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Extraction prompt template. Replace `{job_description}` before sending.
pub const EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract the following fields from the job description:
1. Role
2. Experience
3. Required Skills
4. Description

Return a JSON object with this EXACT schema (no extra fields):
{
  "Role": "Senior Backend Engineer",
  "Experience": "5+ years",
  "Required Skills": ["Rust", "PostgreSQL", "Kubernetes"],
  "Description": "One-paragraph summary of the position"
}

"Required Skills" must be a JSON array of individual skill strings.
All four fields are mandatory.

Job Description:
{job_description}"#;

/// System prompt for cold email generation — plain text out, no wrapping.
pub const EMAIL_SYSTEM: &str =
    "You are a business development assistant writing concise, professional \
    cold outreach emails. Respond with the email text only. \
    Do NOT use markdown code fences. \
    Do NOT include commentary before or after the email.";

/// Cold email prompt template.
/// Replace `{job_description}` and `{portfolio_links}` before sending.
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"Write a professional cold email to the company based on the job description and the portfolio links provided.

Job Description: {job_description}
Portfolio Links: {portfolio_links}"#;
