//! Semantic retrieval over the product catalog
//!
//! Features:
//! - Embedding client trait with an HTTP backend and a deterministic
//!   hash-based embedder for tests and offline runs
//! - Lazily built, memoized embedding index over the catalog
//! - Cosine-similarity top-k search with a score threshold
//! - Graceful degradation to empty results on any backend failure

pub mod embeddings;
pub mod index;
pub mod retriever;

pub use embeddings::{Embedder, EmbedderConfig, HashEmbedder, HttpEmbedder};
pub use index::{cosine_similarity, EmbeddingIndex};
pub use retriever::{RetrieverStats, ScoredProduct, SemanticRetriever};

use thiserror::Error;

/// Retrieval errors
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Search error: {0}")]
    Search(String),
}

impl From<RagError> for advisor_core::Error {
    fn from(err: RagError) -> Self {
        advisor_core::Error::Rag(err.to_string())
    }
}
