// LLM prompt templates for AI-backed resume scoring.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Persona half of the system prompt. `JSON_ONLY_SYSTEM` is appended at call time.
pub const SCORING_SYSTEM_PERSONA: &str = "You are an expert resume reviewer and career coach \
    who understands how Applicant Tracking Systems (ATS) filter resumes. \
    Score resumes honestly and give specific, actionable feedback.";

/// Scoring prompt template. Replace `{resume_text}` before sending.
pub const SCORING_PROMPT_TEMPLATE: &str = r#"Score the following resume on six criteria, each from 0 to 100.

RESUME:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "criteria": {
    "formatting": {"score": 0, "feedback": "string"},
    "keywords": {"score": 0, "feedback": "string"},
    "experienceClarity": {"score": 0, "feedback": "string"},
    "education": {"score": 0, "feedback": "string"},
    "skillsMatch": {"score": 0, "feedback": "string"},
    "atsCompatibility": {"score": 0, "feedback": "string"}
  },
  "suggestions": ["string"]
}

CRITERIA:
- formatting: structure, section headers, contact details, bullet points
- keywords: industry and technical terms an ATS would match
- experienceClarity: action verbs, quantified achievements, clear roles
- education: degree, institution, dates, relevant coursework
- skillsMatch: breadth and specificity of technical and soft skills
- atsCompatibility: plain layout, standard headers, no tables or graphics

RULES:
1. Every score is a whole number between 0 and 100.
2. Each feedback is one sentence.
3. Give at least 6 suggestions, most important first.
4. Return ONLY the JSON object. Nothing else, no code fences."#;

pub fn scoring_system_prompt() -> String {
    format!("{SCORING_SYSTEM_PERSONA} {JSON_ONLY_SYSTEM}")
}

pub fn scoring_prompt(resume_text: &str) -> String {
    SCORING_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
