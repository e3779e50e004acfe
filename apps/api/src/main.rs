mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scoring::ai::{LlmScorer, ScoringBackend};
use crate::scoring::engine::HeuristicScorer;
use crate::scoring::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::scoring::service::ScoringService;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Scorer API v{}", env!("CARGO_PKG_VERSION"));

    let scoring = build_scoring_service(&config)?;

    let state = AppState {
        config: config.clone(),
        scoring: Arc::new(scoring),
        extractor: Arc::new(DocumentExtractor::default()),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wires the heuristic scorer and, when a key is configured, the LLM scorer in front of it.
fn build_scoring_service(config: &Config) -> Result<ScoringService> {
    let random: Arc<dyn RandomSource> = match config.scoring_seed {
        Some(seed) => {
            info!("Education offsets seeded with {seed}");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(ThreadRandom),
    };
    let heuristic = HeuristicScorer::new(random);

    let ai: Option<Arc<dyn ScoringBackend>> = match config.ai_api_key() {
        Some(key) => {
            let mut llm = LlmClient::new(key.to_string(), config.llm_timeout)
                .context("Failed to build LLM HTTP client")?;
            if let Some(url) = &config.anthropic_api_url {
                info!("Using LLM endpoint override: {url}");
                llm = llm.with_api_url(url.as_str());
            }
            info!(
                "AI scoring enabled (model: {}, timeout: {}s)",
                llm_client::MODEL,
                config.llm_timeout.as_secs()
            );
            Some(Arc::new(LlmScorer::new(llm)))
        }
        None => {
            info!("AI scoring disabled; using heuristic scorer only");
            None
        }
    };

    Ok(ScoringService::new(ai, heuristic))
}
