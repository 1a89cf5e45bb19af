//! Top-level error type
//!
//! Sub-crates define their own error enums and convert into this one at the
//! crate boundary.

use thiserror::Error;

/// Top-level advisor error
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Retrieval error: {0}")]
    Rag(String),

    #[error("Generation error: {0}")]
    Llm(String),
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<crate::catalog::CatalogError> for Error {
    fn from(err: crate::catalog::CatalogError) -> Self {
        Error::Catalog(err.to_string())
    }
}
