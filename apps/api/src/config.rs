use std::str::FromStr;

use anyhow::{Context, Result};

/// Sampling parameters for one kind of model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Generation parameters per task kind. Scoring favors determinism,
/// optimization favors variety.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProfiles {
    pub extraction: GenerationParams,
    pub scoring: GenerationParams,
    pub optimization: GenerationParams,
}

impl Default for GenerationProfiles {
    fn default() -> Self {
        Self {
            extraction: GenerationParams {
                temperature: 0.1,
                max_output_tokens: 4096,
            },
            scoring: GenerationParams {
                temperature: 0.1,
                max_output_tokens: 2048,
            },
            optimization: GenerationParams {
                temperature: 0.3,
                max_output_tokens: 4096,
            },
        }
    }
}

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to every component that talks to the model.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    pub location: String,
    pub model_name: String,
    pub access_token: String,
    pub vertex_endpoint: String,
    pub port: u16,
    pub rust_log: String,
    pub profiles: GenerationProfiles,
    pub max_retries: u32,
    pub retry_initial_delay_ms: u64,
    pub retry_max_delay_ms: u64,
    pub llm_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let location = lookup("VERTEX_AI_LOCATION").unwrap_or_else(|| "us-central1".to_string());
        let vertex_endpoint = lookup("VERTEX_AI_ENDPOINT")
            .unwrap_or_else(|| format!("https://{location}-aiplatform.googleapis.com"));

        let defaults = GenerationProfiles::default();
        let profiles = GenerationProfiles {
            extraction: GenerationParams {
                temperature: defaults.extraction.temperature,
                max_output_tokens: parse_or(
                    &lookup,
                    "EXTRACTION_MAX_OUTPUT_TOKENS",
                    defaults.extraction.max_output_tokens,
                )?,
            },
            scoring: GenerationParams {
                temperature: parse_or(&lookup, "SCORING_TEMPERATURE", defaults.scoring.temperature)?,
                max_output_tokens: parse_or(
                    &lookup,
                    "SCORING_MAX_OUTPUT_TOKENS",
                    defaults.scoring.max_output_tokens,
                )?,
            },
            optimization: GenerationParams {
                temperature: parse_or(
                    &lookup,
                    "OPTIMIZATION_TEMPERATURE",
                    defaults.optimization.temperature,
                )?,
                max_output_tokens: parse_or(
                    &lookup,
                    "OPTIMIZATION_MAX_OUTPUT_TOKENS",
                    defaults.optimization.max_output_tokens,
                )?,
            },
        };

        Ok(Config {
            project_id: require("GOOGLE_CLOUD_PROJECT")?,
            access_token: require("GOOGLE_ACCESS_TOKEN")?,
            model_name: lookup("GEMINI_MODEL_NAME")
                .unwrap_or_else(|| "gemini-2.5-flash".to_string()),
            location,
            vertex_endpoint,
            port: parse_or(&lookup, "PORT", 8000)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            profiles,
            max_retries: parse_or(&lookup, "LLM_MAX_RETRIES", 3)?,
            retry_initial_delay_ms: parse_or(&lookup, "LLM_RETRY_INITIAL_DELAY_MS", 1000)?,
            retry_max_delay_ms: parse_or(&lookup, "LLM_RETRY_MAX_DELAY_MS", 60_000)?,
            llm_timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", 120)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("GOOGLE_CLOUD_PROJECT", "acme"),
            ("GOOGLE_ACCESS_TOKEN", "token"),
        ]))
        .unwrap();

        assert_eq!(config.location, "us-central1");
        assert_eq!(config.model_name, "gemini-2.5-flash");
        assert_eq!(
            config.vertex_endpoint,
            "https://us-central1-aiplatform.googleapis.com"
        );
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.profiles, GenerationProfiles::default());
    }

    #[test]
    fn test_missing_project_is_error() {
        let err = Config::from_lookup(lookup_from(&[("GOOGLE_ACCESS_TOKEN", "token")]))
            .unwrap_err();
        assert!(err.to_string().contains("GOOGLE_CLOUD_PROJECT"));
    }

    #[test]
    fn test_blank_token_is_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("GOOGLE_CLOUD_PROJECT", "acme"),
            ("GOOGLE_ACCESS_TOKEN", "   "),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("GOOGLE_CLOUD_PROJECT", "acme"),
            ("GOOGLE_ACCESS_TOKEN", "token"),
            ("VERTEX_AI_LOCATION", "europe-west4"),
            ("SCORING_TEMPERATURE", "0.0"),
            ("OPTIMIZATION_MAX_OUTPUT_TOKENS", "8192"),
            ("PORT", "9090"),
        ]))
        .unwrap();

        assert_eq!(
            config.vertex_endpoint,
            "https://europe-west4-aiplatform.googleapis.com"
        );
        assert_eq!(config.profiles.scoring.temperature, 0.0);
        assert_eq!(config.profiles.optimization.max_output_tokens, 8192);
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_invalid_number_is_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("GOOGLE_CLOUD_PROJECT", "acme"),
            ("GOOGLE_ACCESS_TOKEN", "token"),
            ("LLM_MAX_RETRIES", "lots"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("LLM_MAX_RETRIES"));
    }
}
