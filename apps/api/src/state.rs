use std::sync::Arc;

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::scoring::service::ScoringService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// AI-backed scoring with heuristic fallback. Built once at startup.
    pub scoring: Arc<ScoringService>,
    pub extractor: Arc<DocumentExtractor>,
}
