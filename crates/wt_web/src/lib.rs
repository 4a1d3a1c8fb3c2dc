use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/v1/parse", post(handlers::parse_article))
        .route("/api/v1/summary", get(handlers::get_article_summary))
        .route(
            "/api/v1/generate-summaries",
            post(handlers::generate_pending_summaries),
        )
        .route("/health", get(handlers::health_check))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use wt_core::{Article, Error, Result};
}
