pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction preview (Loader + Extractor only)
        .route("/api/v1/job/extract", post(handlers::handle_extract_job))
        // Portfolio CSV upload → session index
        .route("/api/v1/portfolio", post(handlers::handle_index_portfolio))
        // Full five-step outreach pipeline
        .route("/api/v1/outreach", post(handlers::handle_outreach))
        .with_state(state)
}
