//! Extractor — turns raw job text into a structured record via the chat model.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{complete_json, ChatModel};
use crate::pipeline::prompts::{EXTRACT_PROMPT_TEMPLATE, EXTRACT_SYSTEM};

/// Structured extraction of a job posting.
///
/// The model reply is untrusted input: all four fields are mandatory, so a
/// missing field or non-JSON reply fails closed with `Parse` rather than
/// accepting a partial record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredJob {
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "Experience")]
    pub experience: String,
    #[serde(rename = "Required Skills")]
    pub required_skills: Vec<String>,
    #[serde(rename = "Description")]
    pub description: String,
}

impl StructuredJob {
    /// Comma-joined required skills, used as the retrieval query text.
    pub fn skills_query(&self) -> String {
        self.required_skills.join(", ")
    }
}

/// Extracts a `StructuredJob` from raw job text with a fixed prompt template
/// at temperature 0. Whole step succeeds or fails; no retry, no coercion.
pub async fn extract(chat: &dyn ChatModel, job_text: &str) -> Result<StructuredJob, AppError> {
    let prompt = EXTRACT_PROMPT_TEMPLATE.replace("{job_description}", job_text);
    complete_json::<StructuredJob>(chat, EXTRACT_SYSTEM, &prompt).await
}
