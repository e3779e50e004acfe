use serde::{Deserialize, Serialize};

/// Maximum number of suggestions returned to callers, on either scoring path.
pub const MAX_SUGGESTIONS: usize = 6;

/// One of the six fixed scoring dimensions, in response order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Formatting,
    Keywords,
    ExperienceClarity,
    Education,
    SkillsMatch,
    AtsCompatibility,
}

impl Criterion {
    pub const ALL: [Criterion; 6] = [
        Criterion::Formatting,
        Criterion::Keywords,
        Criterion::ExperienceClarity,
        Criterion::Education,
        Criterion::SkillsMatch,
        Criterion::AtsCompatibility,
    ];

    /// JSON key used in the `criteria` object.
    pub fn key(self) -> &'static str {
        match self {
            Criterion::Formatting => "formatting",
            Criterion::Keywords => "keywords",
            Criterion::ExperienceClarity => "experienceClarity",
            Criterion::Education => "education",
            Criterion::SkillsMatch => "skillsMatch",
            Criterion::AtsCompatibility => "atsCompatibility",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: u32, // 0 – 100
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub formatting: CriterionScore,
    pub keywords: CriterionScore,
    pub experience_clarity: CriterionScore,
    pub education: CriterionScore,
    pub skills_match: CriterionScore,
    pub ats_compatibility: CriterionScore,
}

impl Criteria {
    pub fn get(&self, criterion: Criterion) -> &CriterionScore {
        match criterion {
            Criterion::Formatting => &self.formatting,
            Criterion::Keywords => &self.keywords,
            Criterion::ExperienceClarity => &self.experience_clarity,
            Criterion::Education => &self.education,
            Criterion::SkillsMatch => &self.skills_match,
            Criterion::AtsCompatibility => &self.ats_compatibility,
        }
    }

    /// Rounded arithmetic mean of the six criterion scores.
    pub fn overall_score(&self) -> u32 {
        let sum: u32 = Criterion::ALL.iter().map(|c| self.get(*c).score).sum();
        (sum as f64 / Criterion::ALL.len() as f64).round() as u32
    }
}

/// Full score report returned by `POST /api/score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeScore {
    pub overall_score: u32,
    pub criteria: Criteria,
    pub suggestions: Vec<String>,
}

impl ResumeScore {
    /// Builds a score whose `overall_score` is derived from `criteria` and whose
    /// suggestions are capped at `MAX_SUGGESTIONS`. Both scoring paths go through here.
    pub fn new(criteria: Criteria, mut suggestions: Vec<String>) -> Self {
        suggestions.truncate(MAX_SUGGESTIONS);
        Self {
            overall_score: criteria.overall_score(),
            criteria,
            suggestions,
        }
    }
}

/// Which path produced a score. Logged, never serialized into the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    Ai,
    Heuristic,
}

impl ScoreSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreSource::Ai => "ai",
            ScoreSource::Heuristic => "heuristic",
        }
    }
}
