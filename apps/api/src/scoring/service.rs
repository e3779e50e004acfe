//! Scoring Service: the facade handlers call.
//!
//! Flow: AI backend (if configured) → on any error → heuristic scorer.
//!
//! `score` never fails. External-dependency errors are logged and absorbed here
//! and never reach the HTTP layer. The AI call is not retried.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::scoring::ai::ScoringBackend;
use crate::scoring::engine::HeuristicScorer;
use crate::scoring::models::{Criterion, ResumeScore, ScoreSource};

/// Carried in `AppState` behind an `Arc`.
pub struct ScoringService {
    ai: Option<Arc<dyn ScoringBackend>>,
    heuristic: HeuristicScorer,
}

impl ScoringService {
    pub fn new(ai: Option<Arc<dyn ScoringBackend>>, heuristic: HeuristicScorer) -> Self {
        Self { ai, heuristic }
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai.is_some()
    }

    pub async fn score(&self, resume_text: &str) -> ResumeScore {
        self.score_with_source(resume_text).await.0
    }

    /// Like `score`, but also reports which path produced the result.
    pub async fn score_with_source(&self, resume_text: &str) -> (ResumeScore, ScoreSource) {
        let (score, source) = match &self.ai {
            Some(backend) => match backend.score(resume_text).await {
                Ok(score) => (score, ScoreSource::Ai),
                Err(e) => {
                    warn!(
                        "{} scoring failed, falling back to heuristic scorer: {e}",
                        backend.name()
                    );
                    (self.heuristic.score(resume_text), ScoreSource::Heuristic)
                }
            },
            None => (self.heuristic.score(resume_text), ScoreSource::Heuristic),
        };

        for criterion in Criterion::ALL {
            debug!(
                criterion = criterion.key(),
                score = score.criteria.get(criterion).score,
                "Criterion scored"
            );
        }
        info!(
            source = source.as_str(),
            overall_score = score.overall_score,
            suggestions = score.suggestions.len(),
            "Resume scored"
        );

        (score, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::llm_client::{LlmClient, LlmError};
    use crate::scoring::ai::{parse_score_reply, LlmScorer, ScoringError};
    use crate::scoring::random::FixedRandom;

    const TEXT: &str = "Jane Doe | jane@example.com | 555-123-4567\n\
        • Developed Python and Docker services on AWS\n\
        • Led an agile team of five engineers";

    const AI_REPLY: &str = r#"{
        "criteria": {
            "formatting": {"score": 90, "feedback": "f"},
            "keywords": {"score": 80, "feedback": "k"},
            "experienceClarity": {"score": 70, "feedback": "e"},
            "education": {"score": 60, "feedback": "ed"},
            "skillsMatch": {"score": 50, "feedback": "s"},
            "atsCompatibility": {"score": 40, "feedback": "a"}
        },
        "suggestions": ["one", "two"]
    }"#;

    enum Behavior {
        Reply(&'static str),
        EmptyContent,
        Status(u16),
    }

    struct FakeBackend(Behavior);

    #[async_trait]
    impl ScoringBackend for FakeBackend {
        async fn score(&self, _resume_text: &str) -> Result<ResumeScore, ScoringError> {
            match self.0 {
                Behavior::Reply(text) => parse_score_reply(text),
                Behavior::EmptyContent => Err(ScoringError::Llm(LlmError::EmptyContent)),
                Behavior::Status(status) => Err(ScoringError::Llm(LlmError::Api {
                    status,
                    message: "unavailable".to_string(),
                })),
            }
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    fn heuristic() -> HeuristicScorer {
        HeuristicScorer::new(Arc::new(FixedRandom(7)))
    }

    fn service(behavior: Option<Behavior>) -> ScoringService {
        let ai = behavior.map(|b| Arc::new(FakeBackend(b)) as Arc<dyn ScoringBackend>);
        ScoringService::new(ai, heuristic())
    }

    #[tokio::test]
    async fn test_ai_success_is_returned() {
        let (score, source) = service(Some(Behavior::Reply(AI_REPLY)))
            .score_with_source(TEXT)
            .await;
        assert_eq!(source, ScoreSource::Ai);
        assert_eq!(score.criteria.formatting.score, 90);
        // (90 + 80 + 70 + 60 + 50 + 40) / 6 = 65
        assert_eq!(score.overall_score, 65);
        assert_eq!(score.suggestions, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_malformed_reply_falls_back_to_heuristic() {
        let (score, source) = service(Some(Behavior::Reply("not json at all")))
            .score_with_source(TEXT)
            .await;
        assert_eq!(source, ScoreSource::Heuristic);
        assert_eq!(score, heuristic().score(TEXT));
    }

    #[tokio::test]
    async fn test_empty_llm_reply_falls_back_to_heuristic() {
        let score = service(Some(Behavior::EmptyContent)).score(TEXT).await;
        assert_eq!(score, heuristic().score(TEXT));
    }

    #[tokio::test]
    async fn test_api_error_status_falls_back_to_heuristic() {
        let score = service(Some(Behavior::Status(503))).score(TEXT).await;
        assert_eq!(score, heuristic().score(TEXT));
    }

    #[tokio::test]
    async fn test_unreachable_llm_falls_back_to_heuristic() {
        let llm = LlmClient::new("key".to_string(), std::time::Duration::from_secs(2))
            .unwrap()
            .with_api_url("http://127.0.0.1:9/v1/messages");
        let svc = ScoringService::new(Some(Arc::new(LlmScorer::new(llm))), heuristic());
        let (score, source) = svc.score_with_source(TEXT).await;
        assert_eq!(source, ScoreSource::Heuristic);
        assert_eq!(score, heuristic().score(TEXT));
    }

    #[tokio::test]
    async fn test_no_backend_uses_heuristic() {
        let svc = service(None);
        assert!(!svc.ai_enabled());
        let (score, source) = svc.score_with_source(TEXT).await;
        assert_eq!(source, ScoreSource::Heuristic);
        assert_eq!(score.overall_score, score.criteria.overall_score());
        assert!(score.suggestions.len() <= 6);
    }
}
