//! AI-backed scoring: asks the LLM for a criteria breakdown and normalizes the reply.
//!
//! The reply is trusted only for the six criterion scores, their feedback and the
//! suggestion list. Scores are rounded and clamped, `overallScore` is recomputed
//! and suggestions are capped, so the response invariants hold on this path too.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::llm_client::{strip_json_fences, LlmClient, LlmError};
use crate::scoring::models::{Criteria, CriterionScore, ResumeScore};
use crate::scoring::prompts::{scoring_prompt, scoring_system_prompt};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("LLM reply has the wrong shape: {0}")]
    InvalidResponse(String),
}

/// A scorer that may fail. `ScoringService` falls back to the heuristic scorer
/// whenever this returns `Err`.
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    async fn score(&self, resume_text: &str) -> Result<ResumeScore, ScoringError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct RawCriterion {
    score: f64,
    feedback: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCriteria {
    formatting: RawCriterion,
    keywords: RawCriterion,
    experience_clarity: RawCriterion,
    education: RawCriterion,
    skills_match: RawCriterion,
    ats_compatibility: RawCriterion,
}

/// Expected reply shape. Unknown fields (such as a model-supplied
/// `overallScore`) are ignored.
#[derive(Debug, Deserialize)]
struct RawScoreReply {
    criteria: RawCriteria,
    suggestions: Vec<String>,
}

impl From<RawCriterion> for CriterionScore {
    fn from(raw: RawCriterion) -> Self {
        CriterionScore {
            score: raw.score.round().clamp(0.0, 100.0) as u32,
            feedback: raw.feedback,
        }
    }
}

impl From<RawScoreReply> for ResumeScore {
    fn from(raw: RawScoreReply) -> Self {
        let c = raw.criteria;
        let criteria = Criteria {
            formatting: c.formatting.into(),
            keywords: c.keywords.into(),
            experience_clarity: c.experience_clarity.into(),
            education: c.education.into(),
            skills_match: c.skills_match.into(),
            ats_compatibility: c.ats_compatibility.into(),
        };
        ResumeScore::new(criteria, raw.suggestions)
    }
}

/// Parses the model's text reply into a normalized `ResumeScore`.
pub fn parse_score_reply(text: &str) -> Result<ResumeScore, ScoringError> {
    let raw: RawScoreReply = serde_json::from_str(strip_json_fences(text))
        .map_err(|e| ScoringError::InvalidResponse(e.to_string()))?;
    Ok(raw.into())
}

/// Scores resumes through the shared `LlmClient`. One call, no retries.
pub struct LlmScorer {
    llm: LlmClient,
}

impl LlmScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ScoringBackend for LlmScorer {
    async fn score(&self, resume_text: &str) -> Result<ResumeScore, ScoringError> {
        let response = self
            .llm
            .call(&scoring_prompt(resume_text), &scoring_system_prompt())
            .await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        parse_score_reply(text)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}
