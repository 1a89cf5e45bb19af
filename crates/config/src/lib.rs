//! Configuration management for the product advisor
//!
//! Three layers:
//! - `Settings` — runtime settings loaded from YAML files with environment
//!   variable overrides (`ADVISOR_` prefix)
//! - intent patterns — ordered regex groups per intent, YAML-driven with an
//!   in-code default fallback
//! - keyword triggers — card variants, brand mentions and loan types,
//!   YAML-driven with an in-code default fallback
//!
//! Settings failures leave the caller to decide (the binary falls back to
//! defaults); intent/keyword failures degrade to the compiled defaults with
//! a warning, never fatally.

pub mod intents;
pub mod keywords;
pub mod settings;

pub use intents::{IntentGroup, IntentPatterns, IntentsFile};
pub use keywords::{BrandTriggers, CardVariant, Keywords, KeywordsFile, LoanType};
pub use settings::{
    load_settings, DataConfig, EmbeddingSettings, GenerationSettings, RetrievalSettings, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid pattern '{pattern}' for intent '{intent}': {source}")]
    InvalidPattern {
        intent: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<ConfigError> for advisor_core::Error {
    fn from(err: ConfigError) -> Self {
        advisor_core::Error::Config(err.to_string())
    }
}
