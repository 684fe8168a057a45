//! Retriever — nearest-neighbor lookup of portfolio entries for a skill set.

use tokio::sync::RwLock;

use crate::embeddings::TextEmbedder;
use crate::errors::AppError;
use crate::vector_index::{RetrievedMatch, VectorIndex};

/// Number of portfolio matches returned per query.
pub const TOP_K: usize = 3;

/// Embeds `skills_text` and returns the `TOP_K` nearest indexed entries,
/// best first.
///
/// An unpopulated index fails with `EmptyIndex` before the embedding call —
/// querying before the indexer has run is a precondition violation.
pub async fn retrieve(
    embedder: &dyn TextEmbedder,
    index: &RwLock<VectorIndex>,
    skills_text: &str,
) -> Result<Vec<RetrievedMatch>, AppError> {
    if index.read().await.is_empty() {
        return Err(AppError::EmptyIndex);
    }

    let query = embedder.embed(skills_text).await?;
    index.read().await.query(&query, TOP_K)
}
