mod analyze;
mod config;
mod errors;
mod extract;
mod llm_client;
mod models;
mod parser;
mod render;
mod resumes;
mod routes;
mod sanitize;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::parser::ids::UuidIds;
use crate::render::pdf::PdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    // LLM client is optional; analysis falls back to heuristics without it
    let llm = config.openai_api_key.clone().map(LlmClient::new);
    match &llm {
        Some(_) => info!("LLM client initialized (model: {})", llm_client::MODEL),
        None => info!("OPENAI_API_KEY not set; analysis will use heuristics"),
    }

    let state = AppState {
        config: config.clone(),
        llm,
        renderer: Arc::new(PdfRenderer),
        ids: Arc::new(UuidIds),
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
