//! Embedding index
//!
//! Parallel arrays of product keys and embedding vectors. Invariant:
//! `keys.len() == vectors.len()`; the constructor enforces it.

use crate::RagError;

/// Immutable embedding index over catalog products
#[derive(Debug, Clone)]
pub struct EmbeddingIndex {
    keys: Vec<String>,
    vectors: Vec<Vec<f32>>,
}

impl EmbeddingIndex {
    pub fn new(keys: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<Self, RagError> {
        if keys.len() != vectors.len() {
            return Err(RagError::Search(format!(
                "Index length mismatch: {} keys, {} vectors",
                keys.len(),
                vectors.len()
            )));
        }
        Ok(Self { keys, vectors })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Score every indexed product against the query vector
    pub fn score(&self, query: &[f32]) -> Vec<(&str, f32)> {
        self.keys
            .iter()
            .zip(&self.vectors)
            .map(|(key, vector)| (key.as_str(), cosine_similarity(query, vector)))
            .collect()
    }
}

/// Cosine similarity between two vectors.
///
/// Zero-norm or mismatched-length inputs score 0.0 rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![0.5, 0.5, 0.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_opposite() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_index_rejects_length_mismatch() {
        let result = EmbeddingIndex::new(vec!["a".to_string()], vec![]);
        assert!(matches!(result, Err(RagError::Search(_))));
    }

    #[test]
    fn test_index_scores_all_entries() {
        let index = EmbeddingIndex::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        )
        .unwrap();

        let scores = index.score(&[1.0, 0.0]);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0], ("a", 1.0));
        assert_eq!(scores[1].0, "b");
    }
}
