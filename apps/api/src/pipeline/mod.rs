// Cold outreach pipeline.
// Five steps in strict sequence: load → extract → index → retrieve → compose.
// All LLM calls go through llm_client — no direct API calls here.

pub mod composer;
pub mod extractor;
pub mod handlers;
pub mod indexer;
pub mod loader;
pub mod prompts;
pub mod retriever;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::embeddings::TextEmbedder;
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::pipeline::extractor::StructuredJob;
use crate::pipeline::loader::PageFetcher;
use crate::portfolio::PortfolioEntry;
use crate::vector_index::{RetrievedMatch, VectorIndex};

/// Everything the pipeline produced, returned to the presentation layer
/// so intermediate results stay visible alongside the final email.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub job_text: String,
    pub job: StructuredJob,
    pub matches: Vec<RetrievedMatch>,
    pub email: String,
}

/// Runs the full pipeline for one job URL.
///
/// Pure forward data-flow: each step consumes the previous step's output and
/// the first failing step's error is returned as-is — no retry, no resume,
/// no partial results. When `portfolio` is `None` the indexing step is
/// skipped and retrieval runs against whatever the session index already
/// holds (failing with `EmptyIndex` if it holds nothing).
pub async fn run(
    chat: &dyn ChatModel,
    embedder: &dyn TextEmbedder,
    fetcher: &dyn PageFetcher,
    index: &RwLock<VectorIndex>,
    job_url: &str,
    portfolio: Option<Vec<PortfolioEntry>>,
) -> Result<PipelineOutput, AppError> {
    // Step 1: fetch the job posting
    let job_text = loader::load(fetcher, job_url).await?;
    info!("loaded job posting ({} chars)", job_text.len());

    // Step 2: structured extraction
    let job = extractor::extract(chat, &job_text).await?;
    info!(role = %job.role, skills = job.required_skills.len(), "extracted structured job");

    // Step 3: populate the session index (skipped without an upload)
    if let Some(rows) = portfolio {
        let inserted = indexer::index_entries(embedder, rows, index).await?;
        info!("indexed {inserted} portfolio entries");
    }

    // Step 4: retrieve the nearest portfolio entries
    let matches = retriever::retrieve(embedder, index, &job.skills_query()).await?;
    info!("retrieved {} portfolio matches", matches.len());

    // Step 5: draft the cold email
    let links: Vec<String> = matches.iter().map(|m| m.link.clone()).collect();
    let email = composer::compose(chat, &job_text, &links).await?;
    info!("composed cold email ({} chars)", email.len());

    Ok(PipelineOutput {
        job_text,
        job,
        matches,
        email,
    })
}
