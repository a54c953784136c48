pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/parse",
            post(handlers::handle_parse_upload),
        )
        .route("/api/v1/resumes/render", post(handlers::handle_render))
        .route("/api/v1/resumes/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
