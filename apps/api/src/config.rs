use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; unparsable values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// AI scoring is enabled only when this is set and `enable_ai_scoring` is true.
    pub anthropic_api_key: Option<String>,
    pub enable_ai_scoring: bool,
    /// Overrides the Anthropic Messages endpoint, e.g. for a local proxy.
    pub anthropic_api_url: Option<String>,
    pub llm_timeout: Duration,
    pub max_upload_bytes: usize,
    /// Pins the education criterion's random offset for reproducible runs.
    pub scoring_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Ok(Config {
            port: parse_or(var("PORT"), defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or(defaults.rust_log),
            anthropic_api_key: var("ANTHROPIC_API_KEY"),
            enable_ai_scoring: parse_or(var("ENABLE_AI_SCORING"), defaults.enable_ai_scoring)
                .context("ENABLE_AI_SCORING must be true or false")?,
            anthropic_api_url: var("ANTHROPIC_API_URL"),
            llm_timeout: Duration::from_secs(
                parse_or(var("LLM_TIMEOUT_SECS"), defaults.llm_timeout.as_secs())
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            max_upload_bytes: parse_or(var("MAX_UPLOAD_BYTES"), defaults.max_upload_bytes)
                .context("MAX_UPLOAD_BYTES must be a whole number of bytes")?,
            scoring_seed: var("SCORING_SEED")
                .map(|v| v.trim().parse::<u64>())
                .transpose()
                .context("SCORING_SEED must be an unsigned integer")?,
        })
    }

    /// The key to use for AI scoring, if AI scoring is switched on.
    pub fn ai_api_key(&self) -> Option<&str> {
        if self.enable_ai_scoring {
            self.anthropic_api_key.as_deref()
        } else {
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            enable_ai_scoring: true,
            anthropic_api_url: None,
            llm_timeout: Duration::from_secs(30),
            max_upload_bytes: 10 * 1024 * 1024,
            scoring_seed: None,
        }
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => Ok(v.trim().parse::<T>()?),
        None => Ok(default),
    }
}
