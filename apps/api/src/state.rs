use std::sync::Arc;

use tokio::sync::RwLock;

use crate::embeddings::TextEmbedder;
use crate::llm_client::ChatModel;
use crate::pipeline::loader::PageFetcher;
use crate::vector_index::VectorIndex;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The chat, embedding, and fetch clients sit behind trait objects so tests
/// can swap in deterministic stubs without touching handler code.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<dyn ChatModel>,
    pub embedder: Arc<dyn TextEmbedder>,
    pub fetcher: Arc<dyn PageFetcher>,
    /// Session-scoped vector index: populated by the indexer, read by the
    /// retriever. Lives for the process lifetime only — never persisted.
    pub index: Arc<RwLock<VectorIndex>>,
}
