//! Generation fallback chain
//!
//! Per-call orchestration, no persistent state:
//! 1. generative backend with retrieved product context
//! 2. semantic-search rendering of the closest products
//! 3. localized "no relevant information" / generic apology text
//!
//! Each tier is an explicit match on the previous tier's result; nothing
//! here can fail outward.

use std::sync::Arc;

use advisor_config::RetrievalSettings;
use advisor_core::{Language, Turn};
use advisor_llm::{PromptBuilder, TextGenerator};
use advisor_rag::SemanticRetriever;

use crate::messages;

/// Products rendered by the semantic fallback tier
const FALLBACK_SHOWN: usize = 3;

/// Description truncation length (characters)
const DESCRIPTION_CHARS: usize = 200;

/// The AI-or-semantic-search response chain
pub struct GenerationChain {
    generator: Option<Arc<dyn TextGenerator>>,
    retriever: Arc<SemanticRetriever>,
    retrieval: RetrievalSettings,
}

impl GenerationChain {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        retriever: Arc<SemanticRetriever>,
        retrieval: RetrievalSettings,
    ) -> Self {
        Self {
            generator,
            retriever,
            retrieval,
        }
    }

    /// Produce a response for input that no catalog handler claimed.
    pub async fn respond(&self, input: &str, language: Language, history: &[Turn]) -> String {
        if let Some(generator) = self.generator.as_ref().filter(|g| g.is_available()) {
            let products = self
                .retriever
                .find_similar(input, self.retrieval.top_k, self.retrieval.threshold)
                .await;

            let prompt = PromptBuilder::new(language)
                .with_history(history)
                .with_products(&products)
                .build(input);

            match generator.generate(&prompt).await {
                Ok(text) => return text,
                Err(e) => {
                    tracing::warn!(error = %e, "Generation failed, using semantic fallback");
                }
            }
        }

        self.semantic_fallback(input, language).await
    }

    /// Render the closest products directly when generation is out.
    async fn semantic_fallback(&self, input: &str, language: Language) -> String {
        let hits = self
            .retriever
            .find_similar(input, self.retrieval.fallback_top_k, self.retrieval.threshold)
            .await;

        if hits.is_empty() {
            return messages::no_relevant_info(language).to_string();
        }

        let mut out = format!("{}\n\n", messages::semantic_intro(language));
        for (i, hit) in hits.iter().take(FALLBACK_SHOWN).enumerate() {
            out.push_str(&format!("{}. **{}**\n", i + 1, hit.product.name));
            if !hit.product.description.is_empty() {
                out.push_str(&format!(
                    "   {}\n\n",
                    truncate(&hit.product.description, DESCRIPTION_CHARS)
                ));
            }
        }
        out.push_str(messages::follow_up(language));
        out
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max).collect();
        out.push_str("...");
        out
    }
}
