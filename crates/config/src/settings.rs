//! Main settings module
//!
//! Priority: env vars (`ADVISOR_` prefix) > config/advisor.yaml > defaults.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Catalog data file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Generative backend settings
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Embedding backend settings
    #[serde(default)]
    pub embedding: EmbeddingSettings,

    /// Retrieval tuning
    #[serde(default)]
    pub retrieval: RetrievalSettings,

    /// Intent pattern file (optional; compiled defaults used when absent)
    #[serde(default = "default_intents_path")]
    pub intents_path: String,

    /// Keyword trigger file (optional; compiled defaults used when absent)
    #[serde(default = "default_keywords_path")]
    pub keywords_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            generation: GenerationSettings::default(),
            embedding: EmbeddingSettings::default(),
            retrieval: RetrievalSettings::default(),
            intents_path: default_intents_path(),
            keywords_path: default_keywords_path(),
        }
    }
}

/// Catalog source data locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_cards_path")]
    pub cards_path: String,
    #[serde(default = "default_loans_path")]
    pub loans_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            cards_path: default_cards_path(),
            loans_path: default_loans_path(),
        }
    }
}

fn default_cards_path() -> String {
    "data/credit_cards.json".to_string()
}

fn default_loans_path() -> String {
    "data/credits.json".to_string()
}

fn default_intents_path() -> String {
    "config/intents.yaml".to_string()
}

fn default_keywords_path() -> String {
    "config/keywords.yaml".to_string()
}

/// Generative backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Model name
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// API endpoint
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff in milliseconds (doubles each retry)
    #[serde(default = "default_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
            endpoint: default_generation_endpoint(),
            api_key_env: default_api_key_env(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_backoff_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GenerationSettings {
    /// API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

fn default_generation_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_generation_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_GEMINI_API_KEY".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    200
}

fn default_timeout_secs() -> u64 {
    30
}

/// Embedding backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Embedding API endpoint
    #[serde(default = "default_embedding_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Embedding dimension
    #[serde(default = "default_embedding_dim")]
    pub dimension: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            endpoint: default_embedding_endpoint(),
            model: default_embedding_model(),
            dimension: default_embedding_dim(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_embedding_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "paraphrase-multilingual".to_string()
}

fn default_embedding_dim() -> usize {
    384
}

/// Retrieval tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSettings {
    /// Products fed to the generation prompt
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Minimum similarity; candidates at or below are dropped
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    /// Products considered by the semantic fallback
    #[serde(default = "default_fallback_top_k")]
    pub fallback_top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            threshold: default_threshold(),
            fallback_top_k: default_fallback_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    3
}

fn default_threshold() -> f32 {
    0.3
}

fn default_fallback_top_k() -> usize {
    5
}

/// Load settings from an optional YAML file plus environment overrides.
///
/// A missing file is not an error; env vars alone can configure everything.
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let file = path.unwrap_or("config/advisor.yaml");

    let mut builder = Config::builder();
    if Path::new(file).exists() {
        builder = builder.add_source(File::with_name(file));
    }
    let config = builder
        .add_source(Environment::with_prefix("ADVISOR").separator("__"))
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    Ok(settings)
}
