// Resume scoring: heuristic engine, AI-backed scorer, and the fallback facade.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod ai;
pub mod engine;
pub mod models;
pub mod prompts;
pub mod random;
pub mod service;
pub mod signals;
pub mod suggestions;
