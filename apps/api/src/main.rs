mod config;
mod embeddings;
mod errors;
mod llm_client;
mod pipeline;
mod portfolio;
mod routes;
mod state;
mod vector_index;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embeddings::{OpenAiEmbedder, TextEmbedder};
use crate::llm_client::{ChatModel, GroqClient};
use crate::pipeline::loader::{HttpPageFetcher, PageFetcher};
use crate::routes::build_router;
use crate::state::AppState;
use crate::vector_index::VectorIndex;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize chat + embedding clients. Keys are checked at first use so
    // a missing credential is a per-request Config error, not a startup crash.
    let chat: Arc<dyn ChatModel> = Arc::new(GroqClient::new(config.groq_api_key.clone()));
    info!("Chat client initialized (model: {})", llm_client::MODEL);

    let embedder: Arc<dyn TextEmbedder> =
        Arc::new(OpenAiEmbedder::new(config.openai_api_key.clone()));
    info!(
        "Embedding client initialized (model: {})",
        embeddings::EMBEDDING_MODEL
    );

    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpPageFetcher::new());

    // Session-scoped vector index: lives for the process lifetime only
    let index = Arc::new(RwLock::new(VectorIndex::new()));

    let state = AppState {
        chat,
        embedder,
        fetcher,
        index,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
