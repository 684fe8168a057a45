//! Axum route handlers for the outreach pipeline.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::pipeline::extractor::{self, StructuredJob};
use crate::pipeline::{self, indexer, loader, PipelineOutput};
use crate::portfolio::parse_portfolio_csv;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractJobRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractJobResponse {
    pub job_text: String,
    pub job: StructuredJob,
}

#[derive(Debug, Serialize)]
pub struct IndexPortfolioResponse {
    /// Entries inserted by this upload.
    pub indexed: usize,
    /// Total entries now held by the session index.
    pub total: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/job/extract
///
/// Runs Loader + Extractor only: fetches the posting and returns the raw
/// text alongside the structured extraction, for previewing before a full
/// outreach run.
pub async fn handle_extract_job(
    State(state): State<AppState>,
    Json(request): Json<ExtractJobRequest>,
) -> Result<Json<ExtractJobResponse>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let job_text = loader::load(state.fetcher.as_ref(), &request.url).await?;
    let job = extractor::extract(state.chat.as_ref(), &job_text).await?;

    Ok(Json(ExtractJobResponse { job_text, job }))
}

/// POST /api/v1/portfolio
///
/// Multipart upload of the portfolio CSV (`portfolio` file field). Parses,
/// embeds, and inserts every row into the session index; all-or-nothing.
pub async fn handle_index_portfolio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<IndexPortfolioResponse>, AppError> {
    let (_, csv_bytes) = read_multipart_fields(multipart).await?;
    let data = csv_bytes
        .ok_or_else(|| AppError::Validation("missing 'portfolio' file field".to_string()))?;

    let rows = parse_portfolio_csv(&data)?;
    let indexed = indexer::index_entries(state.embedder.as_ref(), rows, &state.index).await?;
    let total = state.index.read().await.len();

    Ok(Json(IndexPortfolioResponse { indexed, total }))
}

/// POST /api/v1/outreach
///
/// Full five-step pipeline. Multipart with a `job_url` text field and an
/// optional `portfolio` CSV file part; without the CSV, retrieval runs
/// against the index populated by earlier uploads in this session.
pub async fn handle_outreach(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PipelineOutput>, AppError> {
    let (job_url, csv_bytes) = read_multipart_fields(multipart).await?;
    let job_url =
        job_url.ok_or_else(|| AppError::Validation("missing 'job_url' field".to_string()))?;
    if job_url.trim().is_empty() {
        return Err(AppError::Validation("job_url cannot be empty".to_string()));
    }

    let portfolio = match csv_bytes {
        Some(data) => Some(parse_portfolio_csv(&data)?),
        None => None,
    };

    let output = pipeline::run(
        state.chat.as_ref(),
        state.embedder.as_ref(),
        state.fetcher.as_ref(),
        &state.index,
        &job_url,
        portfolio,
    )
    .await?;

    Ok(Json(output))
}

/// Pulls the `job_url` text field and `portfolio` file field out of a
/// multipart body. Unknown fields are ignored.
async fn read_multipart_fields(
    mut multipart: Multipart,
) -> Result<(Option<String>, Option<Bytes>), AppError> {
    let mut job_url = None;
    let mut csv_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("job_url") => {
                job_url = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("unreadable job_url field: {e}"))
                })?);
            }
            Some("portfolio") => {
                csv_bytes = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("unreadable portfolio upload: {e}"))
                })?);
            }
            _ => {}
        }
    }

    Ok((job_url, csv_bytes))
}
