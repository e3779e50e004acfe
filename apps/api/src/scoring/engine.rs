//! Heuristic Scorer: deterministic fallback that needs no network.
//!
//! Algorithm:
//! 1. Extract `ResumeSignals` from the raw text.
//! 2. Score each criterion as a weighted sum of signals, clamped to [0, 100].
//! 3. Pick feedback from three tiers: ≥80 positive, ≥60 mixed, else corrective.
//! 4. overall_score = round(mean of the six criterion scores)
//! 5. Append suggestions for weak criteria, capped at six.
//!
//! Only the education criterion is non-deterministic; its offset comes from the
//! injected `RandomSource`.

use std::sync::Arc;

use crate::scoring::models::{Criteria, Criterion, CriterionScore, ResumeScore};
use crate::scoring::random::RandomSource;
use crate::scoring::signals::ResumeSignals;
use crate::scoring::suggestions::generate_suggestions;

const POSITIVE_TIER: f64 = 80.0;
const MIXED_TIER: f64 = 60.0;

/// Heuristic scorer. Cheap to clone; the random source is shared.
#[derive(Clone)]
pub struct HeuristicScorer {
    random: Arc<dyn RandomSource>,
}

impl HeuristicScorer {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn score(&self, text: &str) -> ResumeScore {
        let signals = ResumeSignals::extract(text);

        let criteria = Criteria {
            formatting: scored(Criterion::Formatting, formatting_score(&signals)),
            keywords: scored(Criterion::Keywords, keywords_score(&signals)),
            experience_clarity: scored(
                Criterion::ExperienceClarity,
                experience_clarity_score(&signals),
            ),
            education: scored(
                Criterion::Education,
                education_score(&signals, self.random.as_ref()),
            ),
            skills_match: scored(Criterion::SkillsMatch, skills_match_score(&signals)),
            ats_compatibility: scored(
                Criterion::AtsCompatibility,
                ats_compatibility_score(&signals),
            ),
        };

        let suggestions = generate_suggestions(&criteria, &signals);
        ResumeScore::new(criteria, suggestions)
    }
}

fn points(condition: bool, weight: f64) -> f64 {
    if condition {
        weight
    } else {
        0.0
    }
}

fn clamp_score(raw: f64) -> f64 {
    raw.clamp(0.0, 100.0)
}

pub(crate) fn formatting_score(s: &ResumeSignals) -> f64 {
    let length = if s.word_count > 200 {
        20.0
    } else {
        s.word_count as f64 / 10.0
    };
    clamp_score(
        points(s.has_email, 25.0)
            + points(s.has_phone, 25.0)
            + points(s.has_bullet_points, 30.0)
            + length,
    )
}

pub(crate) fn keywords_score(s: &ResumeSignals) -> f64 {
    clamp_score(s.keyword_matches as f64 * 12.0 + 30.0)
}

pub(crate) fn experience_clarity_score(s: &ResumeSignals) -> f64 {
    let base = if s.has_experience { 60.0 } else { 20.0 };
    clamp_score(base + points(s.has_bullet_points, 20.0) + points(s.word_count > 300, 20.0))
}

pub(crate) fn education_score(s: &ResumeSignals, random: &dyn RandomSource) -> f64 {
    let (base, spread) = if s.has_education { (75, 25) } else { (40, 30) };
    clamp_score(f64::from(base + random.below(spread)))
}

pub(crate) fn skills_match_score(s: &ResumeSignals) -> f64 {
    let base = if s.has_skills { 50.0 } else { 20.0 };
    clamp_score(base + s.keyword_matches as f64 * 8.0)
}

pub(crate) fn ats_compatibility_score(s: &ResumeSignals) -> f64 {
    clamp_score(
        points(s.has_contact_info(), 40.0)
            + points(s.has_bullet_points, 30.0)
            + points(!s.has_tabs, 15.0)
            + points(s.word_count > 200 && s.word_count < 1000, 15.0),
    )
}

/// Rounds the raw score and attaches tiered feedback. The tier is read from the
/// unrounded value.
fn scored(criterion: Criterion, raw: f64) -> CriterionScore {
    CriterionScore {
        score: raw.round() as u32,
        feedback: feedback_for(criterion, raw).to_string(),
    }
}

pub(crate) fn feedback_for(criterion: Criterion, raw: f64) -> &'static str {
    let [positive, mixed, corrective] = feedback_tiers(criterion);
    if raw >= POSITIVE_TIER {
        positive
    } else if raw >= MIXED_TIER {
        mixed
    } else {
        corrective
    }
}

fn feedback_tiers(criterion: Criterion) -> [&'static str; 3] {
    match criterion {
        Criterion::Formatting => [
            "Excellent formatting with clear structure and contact information.",
            "Good formatting, but could benefit from better organization and bullet points.",
            "Formatting needs improvement. Add clear sections, bullet points, and contact details.",
        ],
        Criterion::Keywords => [
            "Great use of industry keywords that will help with ATS systems.",
            "Decent keyword usage, but consider adding more relevant technical terms.",
            "Add more industry-specific keywords and technical skills to improve ATS matching.",
        ],
        Criterion::ExperienceClarity => [
            "Experience section is clear and well-articulated with strong action verbs.",
            "Experience is present but could be more detailed with quantifiable achievements.",
            "Experience section needs more clarity. Use bullet points and quantify your achievements.",
        ],
        Criterion::Education => [
            "Education section is complete and well-presented.",
            "Education is listed but could include more details like GPA or relevant coursework.",
            "Add or improve your education section with degree, institution, and graduation date.",
        ],
        Criterion::SkillsMatch => [
            "Skills section demonstrates strong technical and professional competencies.",
            "Skills are listed but could be expanded with more specific technologies.",
            "Expand your skills section to include both technical and soft skills relevant to your field.",
        ],
        Criterion::AtsCompatibility => [
            "Resume is highly compatible with ATS systems - good structure and formatting.",
            "Generally ATS-friendly but avoid tables, graphics, and unusual formatting.",
            "ATS compatibility is low. Use simple formatting, avoid special characters, and use standard section headers.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::random::FixedRandom;

    fn scorer(offset: u32) -> HeuristicScorer {
        HeuristicScorer::new(Arc::new(FixedRandom(offset)))
    }

    /// 250 words with an email, a phone number, a `•` bullet, "experience" and
    /// exactly three vocabulary terms (python, docker, sql). No education terms.
    fn sample_resume() -> String {
        let mut words = vec![
            "jane@example.com",
            "555-123-4567",
            "•",
            "experience",
            "python",
            "docker",
            "sql",
        ];
        words.resize(250, "word");
        words.join(" ")
    }

    #[test]
    fn test_sample_resume_breakdown() {
        let score = scorer(10).score(&sample_resume());
        let c = &score.criteria;
        assert_eq!(c.formatting.score, 100);
        assert_eq!(c.keywords.score, 66);
        assert_eq!(c.experience_clarity.score, 80);
        assert_eq!(c.education.score, 50);
        assert_eq!(c.skills_match.score, 44);
        assert_eq!(c.ats_compatibility.score, 100);
        // (100 + 66 + 80 + 50 + 44 + 100) / 6 = 73.33
        assert_eq!(score.overall_score, 73);
    }

    #[test]
    fn test_education_range_without_terms() {
        let text = sample_resume();
        assert_eq!(scorer(0).score(&text).criteria.education.score, 40);
        assert_eq!(scorer(1000).score(&text).criteria.education.score, 69);
    }

    #[test]
    fn test_education_range_with_terms() {
        let text = format!("{} university degree", sample_resume());
        assert_eq!(scorer(0).score(&text).criteria.education.score, 75);
        assert_eq!(scorer(1000).score(&text).criteria.education.score, 99);
    }

    #[test]
    fn test_empty_text_scores_in_bounds() {
        let score = scorer(5).score("");
        let c = &score.criteria;
        assert_eq!(c.formatting.score, 0);
        assert_eq!(c.keywords.score, 30);
        assert_eq!(c.experience_clarity.score, 20);
        assert_eq!(c.education.score, 45);
        assert_eq!(c.skills_match.score, 20);
        // only the no-tabs bonus applies
        assert_eq!(c.ats_compatibility.score, 15);
        assert_eq!(score.overall_score, c.overall_score());
    }

    #[test]
    fn test_scores_clamp_at_100() {
        let text = format!(
            "skills {} {}",
            crate::scoring::signals::KEYWORD_VOCABULARY.join(" "),
            "filler ".repeat(400)
        );
        let score = scorer(0).score(&text);
        assert_eq!(score.criteria.keywords.score, 100);
        assert_eq!(score.criteria.skills_match.score, 100);
        for criterion in Criterion::ALL {
            assert!(score.criteria.get(criterion).score <= 100);
        }
    }

    #[test]
    fn test_formatting_word_count_component() {
        let signals = ResumeSignals {
            word_count: 155,
            ..Default::default()
        };
        assert!((formatting_score(&signals) - 15.5).abs() < f64::EPSILON);
        let signals = ResumeSignals {
            word_count: 201,
            ..Default::default()
        };
        assert_eq!(formatting_score(&signals), 20.0);
    }

    #[test]
    fn test_fractional_formatting_rounds() {
        // 25 + 30 + 155 / 10 = 70.5
        let mut text = vec!["jane@example.com", "-"];
        text.resize(155, "w");
        let score = scorer(0).score(&text.join(" "));
        assert_eq!(score.criteria.formatting.score, 71);
    }

    #[test]
    fn test_ats_word_band_is_exclusive() {
        let at = |n| ResumeSignals {
            word_count: n,
            ..Default::default()
        };
        assert_eq!(ats_compatibility_score(&at(200)), 15.0);
        assert_eq!(ats_compatibility_score(&at(201)), 30.0);
        assert_eq!(ats_compatibility_score(&at(999)), 30.0);
        assert_eq!(ats_compatibility_score(&at(1000)), 15.0);
    }

    #[test]
    fn test_tabs_lose_ats_points() {
        let signals = ResumeSignals {
            has_tabs: true,
            ..Default::default()
        };
        assert_eq!(ats_compatibility_score(&signals), 0.0);
    }

    #[test]
    fn test_experience_long_resume_bonus() {
        let signals = ResumeSignals {
            word_count: 301,
            has_experience: true,
            has_bullet_points: true,
            ..Default::default()
        };
        assert_eq!(experience_clarity_score(&signals), 100.0);
    }

    #[test]
    fn test_feedback_tier_boundaries() {
        for criterion in Criterion::ALL {
            let [positive, mixed, corrective] = feedback_tiers(criterion);
            assert_eq!(feedback_for(criterion, 80.0), positive);
            assert_eq!(feedback_for(criterion, 79.9), mixed);
            assert_eq!(feedback_for(criterion, 60.0), mixed);
            assert_eq!(feedback_for(criterion, 59.9), corrective);
        }
    }

    #[test]
    fn test_deterministic_criteria_are_reproducible() {
        let text = sample_resume();
        let a = scorer(3).score(&text);
        let b = HeuristicScorer::new(Arc::new(crate::scoring::random::ThreadRandom)).score(&text);
        assert_eq!(a.criteria.formatting, b.criteria.formatting);
        assert_eq!(a.criteria.keywords, b.criteria.keywords);
        assert_eq!(a.criteria.experience_clarity, b.criteria.experience_clarity);
        assert_eq!(a.criteria.skills_match, b.criteria.skills_match);
        assert_eq!(a.criteria.ats_compatibility, b.criteria.ats_compatibility);
    }
}
