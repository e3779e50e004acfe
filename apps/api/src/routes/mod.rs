pub mod health;
pub mod score;

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::errors::{error_response, INTERNAL_ERROR_MESSAGE};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/score", post(score::handle_score))
        .route("/api/score/upload", post(score::handle_score_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Any panic while handling a request becomes the generic 500 document.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {detail}");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::DocumentExtractor;
    use crate::scoring::ai::{ScoringBackend, ScoringError};
    use crate::scoring::engine::HeuristicScorer;
    use crate::scoring::models::ResumeScore;
    use crate::scoring::random::FixedRandom;
    use crate::scoring::service::ScoringService;

    struct PanickingBackend;

    #[async_trait]
    impl ScoringBackend for PanickingBackend {
        async fn score(&self, _resume_text: &str) -> Result<ResumeScore, ScoringError> {
            panic!("scorer exploded");
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    #[test]
    fn test_panic_maps_to_generic_500() {
        let response = handle_panic(Box::new("index out of bounds"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_handler_panic_returns_generic_500() {
        let scoring = ScoringService::new(
            Some(Arc::new(PanickingBackend)),
            HeuristicScorer::new(Arc::new(FixedRandom(0))),
        );
        let app = build_router(AppState {
            config: Config::default(),
            scoring: Arc::new(scoring),
            extractor: Arc::new(DocumentExtractor::default()),
        });

        let body = serde_json::json!({ "resumeText": "word ".repeat(20) });
        let request = Request::post("/api/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": INTERNAL_ERROR_MESSAGE }));
    }
}
