//! Generative backend implementations
//!
//! The external generator is a single-shot text completion service. The
//! backend owns retry policy: transient failures and empty completions are
//! retried with doubling backoff up to the configured number of attempts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::LlmError;

/// Generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Model name
    pub model: String,
    /// API endpoint base
    pub endpoint: String,
    /// API key; an empty key marks the backend unavailable
    pub api_key: Option<String>,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Initial backoff, doubled each retry
    pub initial_backoff: Duration,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            max_retries: 2,
            initial_backoff: Duration::from_millis(200),
            timeout: Duration::from_secs(30),
        }
    }
}

impl From<&advisor_config::GenerationSettings> for GeneratorConfig {
    fn from(settings: &advisor_config::GenerationSettings) -> Self {
        Self {
            model: settings.model.clone(),
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key(),
            max_retries: settings.max_retries,
            initial_backoff: settings.initial_backoff(),
            timeout: settings.timeout(),
        }
    }
}

/// Availability snapshot for diagnostics
#[derive(Debug, Clone)]
pub struct GeneratorStatus {
    pub available: bool,
    pub model: String,
}

/// Single-shot text generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Whether the backend is configured and usable
    fn is_available(&self) -> bool;

    /// Model name
    fn model_name(&self) -> &str;

    /// Status snapshot
    fn status(&self) -> GeneratorStatus {
        GeneratorStatus {
            available: self.is_available(),
            model: self.model_name().to_string(),
        }
    }
}

/// Google Gemini backend
pub struct GeminiBackend {
    client: Client,
    config: GeneratorConfig,
    available: bool,
}

impl GeminiBackend {
    /// Create the backend. A missing or placeholder API key does not fail
    /// construction; the backend reports itself unavailable and callers
    /// branch to their fallback tier.
    pub fn new(config: GeneratorConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        let available = match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() && key != "your_gemini_api_key_here" => true,
            _ => {
                tracing::warn!("Gemini API key not configured, generator unavailable");
                false
            }
        };

        Ok(Self {
            client,
            config,
            available,
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            self.config.api_key.as_deref().unwrap_or_default()
        )
    }

    async fn execute(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.request_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(LlmError::Network(format!("Server error {status}: {body}")));
            }
            return Err(LlmError::Api(format!("HTTP {status}: {body}")));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }

    fn is_retryable(error: &LlmError) -> bool {
        matches!(error, LlmError::Network(_) | LlmError::EmptyResponse)
    }
}

#[async_trait]
impl TextGenerator for GeminiBackend {
    /// Generate with retry: up to `max_retries + 1` attempts, doubling
    /// backoff between them. The first non-empty completion wins.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if !self.available {
            return Err(LlmError::Unavailable);
        }

        let mut backoff = self.config.initial_backoff;
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::warn!(
                    attempt,
                    max_retries = self.config.max_retries,
                    backoff_ms = backoff.as_millis() as u64,
                    "Generation failed, retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }

            match self.execute(prompt).await {
                Ok(text) => {
                    tracing::debug!(attempt = attempt + 1, "Generation succeeded");
                    return Ok(text);
                }
                Err(e) if Self::is_retryable(&e) => {
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(LlmError::EmptyResponse))
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// Gemini API wire types
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_marks_unavailable() {
        let backend = GeminiBackend::new(GeneratorConfig::default()).unwrap();
        assert!(!backend.is_available());
        assert_eq!(backend.model_name(), "gemini-1.5-flash");
    }

    #[test]
    fn test_placeholder_key_marks_unavailable() {
        let config = GeneratorConfig {
            api_key: Some("your_gemini_api_key_here".to_string()),
            ..Default::default()
        };
        let backend = GeminiBackend::new(config).unwrap();
        assert!(!backend.is_available());
    }

    #[test]
    fn test_real_key_marks_available() {
        let config = GeneratorConfig {
            api_key: Some("AIza-test".to_string()),
            ..Default::default()
        };
        let backend = GeminiBackend::new(config).unwrap();
        assert!(backend.is_available());
        assert!(backend.status().available);
    }

    #[tokio::test]
    async fn test_unavailable_backend_refuses_generation() {
        let backend = GeminiBackend::new(GeneratorConfig::default()).unwrap();
        let result = backend.generate("hello").await;
        assert!(matches!(result, Err(LlmError::Unavailable)));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(GeminiBackend::is_retryable(&LlmError::Network("x".into())));
        assert!(GeminiBackend::is_retryable(&LlmError::EmptyResponse));
        assert!(!GeminiBackend::is_retryable(&LlmError::Api("400".into())));
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "Какви карти предлагате?".to_string(),
                }],
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("contents"));
        assert!(json.contains("parts"));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Здравейте!"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "Здравейте!");
    }

    #[test]
    fn test_response_without_candidates_parses() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
