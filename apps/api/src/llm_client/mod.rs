/// LLM Client: the single point of entry for all model calls.
///
/// No other module talks to Vertex AI directly. Section tasks receive an
/// `Arc<dyn LlmBackend>` so tests can substitute a scripted backend.
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, GenerationParams};

#[cfg(test)]
pub mod mock;
pub mod prompts;
pub mod retry;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode model response: {0}")]
    Decode(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Rate limiting, temporary unavailability and refused connections.
    /// Everything else fails immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Api { status, .. } => matches!(status, 429 | 503),
            LlmError::Http(e) => e.is_connect(),
            LlmError::Decode(_) | LlmError::EmptyContent => false,
        }
    }
}

/// A text-in, text-out model backend.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Vertex AI generateContent wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// VertexClient
// ────────────────────────────────────────────────────────────────────────────

/// Gemini on Vertex AI via the REST `generateContent` endpoint.
#[derive(Clone)]
pub struct VertexClient {
    client: Client,
    url: String,
    access_token: String,
}

impl VertexClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: generate_url(config),
            access_token: config.access_token.clone(),
        })
    }
}

fn generate_url(config: &Config) -> String {
    format!(
        "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
        config.vertex_endpoint.trim_end_matches('/'),
        config.project_id,
        config.location,
        config.model_name
    )
}

#[async_trait]
impl LlmBackend for VertexClient {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_output_tokens,
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        if let Some(usage) = &payload.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        payload.text().ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            project_id: "acme".into(),
            location: "us-central1".into(),
            model_name: "gemini-2.5-flash".into(),
            access_token: "token".into(),
            vertex_endpoint: "https://us-central1-aiplatform.googleapis.com/".into(),
            port: 8000,
            rust_log: "info".into(),
            profiles: Default::default(),
            max_retries: 3,
            retry_initial_delay_ms: 1000,
            retry_max_delay_ms: 60_000,
            llm_timeout_secs: 120,
        }
    }

    #[test]
    fn test_generate_url() {
        assert_eq!(
            generate_url(&test_config()),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/acme/locations/us-central1/publishers/google/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                max_output_tokens: 2048,
                response_mime_type: "application/json",
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let payload: GenerateResponse = serde_json::from_str(
            r#"{
                "candidates": [{"content": {"role": "model", "parts": [{"text": "{\"a\""}, {"text": ": 1}"}]}}],
                "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
            }"#,
        )
        .unwrap();
        assert_eq!(payload.text().as_deref(), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let payload: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(payload.text().is_none());
    }

    #[test]
    fn test_transient_classification() {
        let limited = LlmError::Api {
            status: 429,
            message: "quota".into(),
        };
        let unavailable = LlmError::Api {
            status: 503,
            message: "busy".into(),
        };
        let bad_request = LlmError::Api {
            status: 400,
            message: "bad".into(),
        };
        assert!(limited.is_transient());
        assert!(unavailable.is_transient());
        assert!(!bad_request.is_transient());
        assert!(!LlmError::EmptyContent.is_transient());
    }
}
