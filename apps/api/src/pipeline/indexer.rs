//! Indexer — embeds portfolio rows and populates the session vector index.

use tokio::sync::RwLock;
use tracing::debug;

use crate::embeddings::TextEmbedder;
use crate::errors::AppError;
use crate::portfolio::PortfolioEntry;
use crate::vector_index::VectorIndex;

/// Embeds each row's skills text and inserts it with a fresh id and metadata,
/// in row order. Returns the number of entries inserted by this call.
///
/// Batch failure policy is abort-all: every row is embedded before any
/// insertion, so an embedding failure on row N leaves the index untouched.
pub async fn index_entries(
    embedder: &dyn TextEmbedder,
    rows: Vec<PortfolioEntry>,
    index: &RwLock<VectorIndex>,
) -> Result<usize, AppError> {
    if rows.is_empty() {
        return Ok(0);
    }

    let inputs: Vec<String> = rows.iter().map(|row| row.skills.clone()).collect();
    let vectors = embedder.embed_batch(&inputs).await?;
    if vectors.len() != rows.len() {
        return Err(AppError::Embedding(format!(
            "got {} embeddings for {} portfolio rows",
            vectors.len(),
            rows.len()
        )));
    }

    let inserted = rows.len();
    let mut guard = index.write().await;
    for (row, embedding) in rows.into_iter().zip(vectors) {
        let id = guard.insert(embedding, row.into());
        debug!(%id, "indexed portfolio entry");
    }

    Ok(inserted)
}
