//! Embedding client for the portfolio index.
//!
//! Same seam pattern as the chat client: `AppState` carries an
//! `Arc<dyn TextEmbedder>` so the indexer and retriever never know whether
//! they are talking to OpenAI or a test stub.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
/// The embedding model used for portfolio skills text.
pub const EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Text → vector seam.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Embeds a batch of strings, returning one vector per input in order.
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, AppError>;

    /// Embeds a single string.
    async fn embed(&self, input: &str) -> Result<Vec<f32>, AppError> {
        let mut vectors = self.embed_batch(&[input.to_string()]).await?;
        if vectors.len() != 1 {
            return Err(AppError::Embedding(format!(
                "expected 1 embedding, got {}",
                vectors.len()
            )));
        }
        Ok(vectors.remove(0))
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenAI embeddings client.
///
/// Like `GroqClient`, the key is optional at construction and checked at
/// first use.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    api_key: Option<String>,
}

impl OpenAiEmbedder {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl TextEmbedder for OpenAiEmbedder {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, AppError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let request_body = EmbeddingRequest {
            model: EMBEDDING_MODEL,
            input: inputs,
        };

        let response = self
            .client
            .post(OPENAI_EMBEDDINGS_URL)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Embedding(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AppError::Embedding(format!("status {status}: {message}")));
        }

        let mut parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("malformed embedding response: {e}")))?;

        // The API may return rows out of order; `index` is authoritative
        parsed.data.sort_by_key(|row| row.index);
        if parsed.data.len() != inputs.len() {
            return Err(AppError::Embedding(format!(
                "got {} embeddings for {} inputs",
                parsed.data.len(),
                inputs.len()
            )));
        }

        Ok(parsed.data.into_iter().map(|row| row.embedding).collect())
    }
}
