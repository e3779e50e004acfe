//! Signal extraction: the flat facts every criterion scorer reads from resume text.
//!
//! All checks are total over any input, including the empty string.

use once_cell::sync::Lazy;
use regex::Regex;

const EDUCATION_TERMS: &[&str] = &[
    "university",
    "college",
    "bachelor",
    "master",
    "degree",
    "phd",
    "education",
];

const EXPERIENCE_TERMS: &[&str] = &[
    "experience",
    "worked",
    "developed",
    "managed",
    "led",
    "created",
];

const SKILLS_TERMS: &[&str] = &["skills", "technologies", "proficient", "expert"];

/// Technology and soft-skill vocabulary. Each term counts at most once.
pub const KEYWORD_VOCABULARY: &[&str] = &[
    "javascript",
    "python",
    "java",
    "react",
    "node",
    "sql",
    "aws",
    "docker",
    "git",
    "api",
    "agile",
    "scrum",
    "leadership",
    "management",
    "analysis",
];

const BULLET_CHARS: &[char] = &['•', '-', '*'];

// ASCII word boundaries: a CJK or accented letter next to the address or
// number still counts as a boundary.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}(?-u:\b)")
        .expect("email pattern is valid")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[0-9]{3}[-.]?[0-9]{3}[-.]?[0-9]{4}(?-u:\b)")
        .expect("phone pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeSignals {
    pub word_count: usize,
    pub has_email: bool,
    pub has_phone: bool,
    pub has_bullet_points: bool,
    pub has_education: bool,
    pub has_experience: bool,
    pub has_skills: bool,
    pub has_tabs: bool,
    pub keyword_matches: usize,
}

impl ResumeSignals {
    pub fn extract(text: &str) -> Self {
        let lower = text.to_lowercase();

        Self {
            // Leading or trailing whitespace adds no empty token, so "" is 0 words.
            word_count: text.split_whitespace().count(),
            has_email: EMAIL_RE.is_match(text),
            has_phone: PHONE_RE.is_match(text),
            has_bullet_points: text.contains(BULLET_CHARS),
            has_education: contains_any(&lower, EDUCATION_TERMS),
            has_experience: contains_any(&lower, EXPERIENCE_TERMS),
            has_skills: contains_any(&lower, SKILLS_TERMS),
            has_tabs: text.contains('\t'),
            keyword_matches: KEYWORD_VOCABULARY
                .iter()
                .filter(|kw| lower.contains(*kw))
                .count(),
        }
    }

    pub fn has_contact_info(&self) -> bool {
        self.has_email && self.has_phone
    }
}

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| haystack.contains(t))
}
