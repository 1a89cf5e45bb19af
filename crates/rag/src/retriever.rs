//! Semantic retriever
//!
//! Owns the lazily-built embedding index over the catalog. The index is
//! built on the first query and memoized; replacing the catalog invalidates
//! it. All failures degrade to an empty result set so the response pipeline
//! above never has to handle a retrieval error.

use std::sync::Arc;

use tokio::sync::RwLock;

use advisor_core::{Catalog, Product, PRODUCT_INFO_FIELD};

use crate::embeddings::Embedder;
use crate::index::EmbeddingIndex;
use crate::RagError;

/// One retrieval hit
#[derive(Debug, Clone)]
pub struct ScoredProduct {
    /// Normalized catalog key
    pub key: String,
    pub product: Product,
    /// Cosine similarity to the query
    pub score: f32,
}

/// Index status snapshot
#[derive(Debug, Clone)]
pub struct RetrieverStats {
    /// Whether the index has been built
    pub ready: bool,
    /// Indexed product count (catalog size before first query)
    pub products: usize,
    /// Embedding dimension
    pub dimension: usize,
}

struct RetrieverState {
    catalog: Arc<Catalog>,
    index: Option<Arc<EmbeddingIndex>>,
}

/// Semantic retriever over the product catalog
pub struct SemanticRetriever {
    embedder: Arc<dyn Embedder>,
    state: RwLock<RetrieverState>,
}

impl SemanticRetriever {
    pub fn new(catalog: Arc<Catalog>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            state: RwLock::new(RetrieverState {
                catalog,
                index: None,
            }),
        }
    }

    /// Swap in a new catalog and invalidate the index.
    pub async fn replace_catalog(&self, catalog: Arc<Catalog>) {
        let mut state = self.state.write().await;
        state.catalog = catalog;
        state.index = None;
        tracing::info!("Catalog replaced, embedding index invalidated");
    }

    /// Find products similar to the query.
    ///
    /// Results are ordered by descending score, truncated to `top_k`, then
    /// filtered to `score > threshold` — so fewer than `top_k` entries may
    /// come back. Any failure is logged and yields an empty result.
    pub async fn find_similar(
        &self,
        query: &str,
        top_k: usize,
        threshold: f32,
    ) -> Vec<ScoredProduct> {
        match self.try_find_similar(query, top_k, threshold).await {
            Ok(results) => {
                tracing::debug!(
                    query = %query.chars().take(50).collect::<String>(),
                    hits = results.len(),
                    "Semantic search complete"
                );
                results
            }
            Err(e) => {
                tracing::warn!(error = %e, "Semantic search failed, returning no results");
                Vec::new()
            }
        }
    }

    async fn try_find_similar(
        &self,
        query: &str,
        top_k: usize,
        threshold: f32,
    ) -> Result<Vec<ScoredProduct>, RagError> {
        let (catalog, index) = self.ensure_index().await?;

        if index.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;

        let mut scored = index.score(&query_embedding);
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let results = scored
            .into_iter()
            .take(top_k)
            .filter(|(_, score)| *score > threshold)
            .filter_map(|(key, score)| {
                catalog.get(key).map(|product| ScoredProduct {
                    key: key.to_string(),
                    product: product.clone(),
                    score,
                })
            })
            .collect();

        Ok(results)
    }

    /// Index status for diagnostics
    pub async fn stats(&self) -> RetrieverStats {
        let state = self.state.read().await;
        RetrieverStats {
            ready: state.index.is_some(),
            products: state
                .index
                .as_ref()
                .map(|i| i.len())
                .unwrap_or_else(|| state.catalog.len()),
            dimension: self.embedder.dim(),
        }
    }

    /// Return the memoized index, building it on first use.
    async fn ensure_index(&self) -> Result<(Arc<Catalog>, Arc<EmbeddingIndex>), RagError> {
        {
            let state = self.state.read().await;
            if let Some(index) = &state.index {
                return Ok((Arc::clone(&state.catalog), Arc::clone(index)));
            }
        }

        // Build outside any lock; embedding the corpus is the slow path.
        let catalog = {
            let state = self.state.read().await;
            Arc::clone(&state.catalog)
        };

        let (keys, texts): (Vec<String>, Vec<String>) = catalog
            .products()
            .map(|(key, product)| (key.clone(), product_text(product)))
            .unzip();

        tracing::info!(products = keys.len(), "Building embedding index");
        let vectors = self.embedder.embed_batch(&texts).await?;
        let built = Arc::new(EmbeddingIndex::new(keys, vectors)?);

        let mut state = self.state.write().await;
        if let Some(index) = &state.index {
            // Another task won the race; use its index.
            return Ok((Arc::clone(&state.catalog), Arc::clone(index)));
        }
        if Arc::ptr_eq(&state.catalog, &catalog) {
            state.index = Some(Arc::clone(&built));
        }
        Ok((catalog, built))
    }
}

/// Text embedded for one product: name, description, and the raw
/// info/features/benefits attributes when present (lists joined with
/// spaces).
fn product_text(product: &Product) -> String {
    let mut text = format!("{} {}", product.name, product.description);

    for field in [PRODUCT_INFO_FIELD, "features", "benefits"] {
        match product.attributes.get(field) {
            Some(serde_json::Value::String(s)) => {
                text.push(' ');
                text.push_str(s);
            }
            Some(serde_json::Value::Array(items)) => {
                for item in items {
                    if let Some(s) = item.as_str() {
                        text.push(' ');
                        text.push_str(s);
                    }
                }
            }
            _ => {}
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::HashEmbedder;
    use advisor_core::catalog::{AttrMap, SourceDataset};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn catalog_with(products: &[(&str, &str, &str)]) -> Arc<Catalog> {
        let mut brand: BTreeMap<String, AttrMap> = BTreeMap::new();
        for (name, info, _) in products {
            let mut attrs = AttrMap::new();
            attrs.insert(PRODUCT_INFO_FIELD.to_string(), json!(info));
            brand.insert(name.to_string(), attrs);
        }
        let mut cards = SourceDataset::new();
        cards.insert("Visa".to_string(), brand);
        Arc::new(Catalog::build(cards, SourceDataset::new()))
    }

    fn retriever(catalog: Arc<Catalog>) -> SemanticRetriever {
        SemanticRetriever::new(catalog, Arc::new(HashEmbedder::new(128)))
    }

    #[tokio::test]
    async fn test_results_bounded_sorted_and_thresholded() {
        let catalog = catalog_with(&[
            ("Visa Classic", "стандартна кредитна карта", ""),
            ("Visa Gold", "златна кредитна карта", ""),
            ("Visa Platinum", "платинена кредитна карта", ""),
        ]);
        let retriever = retriever(catalog);

        let results = retriever.find_similar("кредитна карта", 2, 0.0).await;
        assert!(results.len() <= 2);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for hit in &results {
            assert!(hit.score > 0.0);
        }
    }

    #[tokio::test]
    async fn test_threshold_drops_weak_candidates() {
        let catalog = catalog_with(&[
            ("Visa Gold", "златна карта", ""),
            ("Visa Classic", "стандартна карта", ""),
        ]);
        let retriever = retriever(catalog);

        // Identical text embeds to the exact product vector, so only that
        // product survives a near-1.0 threshold.
        let exact = "Visa Gold златна карта златна карта";
        let results = retriever.find_similar(exact, 5, 0.99).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].key, "Visa Gold");
    }

    #[tokio::test]
    async fn test_empty_catalog_returns_empty() {
        let catalog = Arc::new(Catalog::build(SourceDataset::new(), SourceDataset::new()));
        let retriever = retriever(catalog);

        let results = retriever.find_similar("карта", 3, 0.3).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_index_built_lazily_and_memoized() {
        let catalog = catalog_with(&[("Visa Classic", "карта", "")]);
        let retriever = retriever(catalog);

        assert!(!retriever.stats().await.ready);
        retriever.find_similar("карта", 1, 0.0).await;
        let stats = retriever.stats().await;
        assert!(stats.ready);
        assert_eq!(stats.products, 1);
        assert_eq!(stats.dimension, 128);
    }

    #[tokio::test]
    async fn test_replace_catalog_invalidates_index() {
        let retriever = retriever(catalog_with(&[("Visa Classic", "карта", "")]));
        retriever.find_similar("карта", 1, 0.0).await;
        assert!(retriever.stats().await.ready);

        retriever
            .replace_catalog(catalog_with(&[("Visa Gold", "златна карта", "")]))
            .await;
        assert!(!retriever.stats().await.ready);

        let results = retriever.find_similar("златна карта", 3, 0.0).await;
        assert!(results.iter().all(|hit| hit.key == "Visa Gold"));
    }

    #[test]
    fn test_product_text_joins_list_attributes() {
        let mut attrs = AttrMap::new();
        attrs.insert(PRODUCT_INFO_FIELD.to_string(), json!("инфо"));
        attrs.insert("features".to_string(), json!(["cashback", "chip"]));
        let product = Product {
            name: "Visa Gold".to_string(),
            kind: advisor_core::ProductKind::CreditCard,
            category: "Visa".to_string(),
            description: "инфо".to_string(),
            attributes: attrs,
        };

        let text = product_text(&product);
        assert!(text.contains("Visa Gold"));
        assert!(text.contains("cashback"));
        assert!(text.contains("chip"));
    }
}
