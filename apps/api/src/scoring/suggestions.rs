use crate::scoring::models::{Criteria, Criterion, MAX_SUGGESTIONS};
use crate::scoring::signals::ResumeSignals;

const DEFAULT_THRESHOLD: u32 = 80;
const EDUCATION_THRESHOLD: u32 = 70;

const PAGE_LENGTH_SUGGESTION: &str = "Keep your resume to 1-2 pages for optimal readability";
const TAILORING_SUGGESTION: &str =
    "Tailor your resume for each job application by matching keywords from the job description";
const CONTACT_SUGGESTION: &str =
    "Include complete contact information: email, phone number, and LinkedIn profile";

fn threshold(criterion: Criterion) -> u32 {
    match criterion {
        Criterion::Education => EDUCATION_THRESHOLD,
        _ => DEFAULT_THRESHOLD,
    }
}

fn improvement_for(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::Formatting => "Use consistent formatting throughout with clear section headers (Experience, Education, Skills)",
        Criterion::Keywords => "Include more industry-specific keywords and technical terms relevant to your target role",
        Criterion::ExperienceClarity => "Quantify your achievements with numbers and metrics (e.g., 'Increased sales by 25%')",
        Criterion::Education => "Ensure your education section includes degree type, institution name, and graduation date",
        Criterion::SkillsMatch => "Add a dedicated skills section listing both technical and soft skills",
        Criterion::AtsCompatibility => "Avoid tables, images, headers/footers, and complex formatting to ensure ATS compatibility",
    }
}

/// Builds the ordered suggestion list.
///
/// Order: weak criteria (in `Criterion::ALL` order), the two general tips, then the
/// contact tip. Truncation keeps the first `MAX_SUGGESTIONS` by position, so the
/// contact tip is dropped whenever four or more criteria are weak.
pub fn generate_suggestions(criteria: &Criteria, signals: &ResumeSignals) -> Vec<String> {
    let mut suggestions: Vec<&str> = Criterion::ALL
        .iter()
        .filter(|c| criteria.get(**c).score < threshold(**c))
        .map(|c| improvement_for(*c))
        .collect();

    suggestions.push(PAGE_LENGTH_SUGGESTION);
    suggestions.push(TAILORING_SUGGESTION);

    if !signals.has_email || !signals.has_phone {
        suggestions.push(CONTACT_SUGGESTION);
    }

    suggestions
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(String::from)
        .collect()
}
