use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::parser::ids::IdGenerator;
use crate::render::ResumeRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Present only when an API key is configured. Without it, analysis
    /// falls back to heuristics and everything else works unchanged.
    pub llm: Option<LlmClient>,
    /// Pluggable renderer. Default: PdfRenderer.
    pub renderer: Arc<dyn ResumeRenderer>,
    /// Pluggable id source so parsed entries get fresh ids in production
    /// and deterministic ones in tests.
    pub ids: Arc<dyn IdGenerator>,
}
