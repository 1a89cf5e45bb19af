//! Generative AI integration
//!
//! Features:
//! - `TextGenerator` trait for single-shot text completion
//! - Gemini `generateContent` HTTP backend with bounded retries,
//!   exponential backoff and request timeout
//! - Structured bilingual prompt builder

pub mod backend;
pub mod prompt;

pub use backend::{GeminiBackend, GeneratorConfig, GeneratorStatus, TextGenerator};
pub use prompt::PromptBuilder;

use thiserror::Error;

/// Generation errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Backend not available")]
    Unavailable,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Network(format!("Request timed out: {err}"))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for advisor_core::Error {
    fn from(err: LlmError) -> Self {
        advisor_core::Error::Llm(err.to_string())
    }
}
