//! Turn orchestrator
//!
//! The advisor owns the session context and dispatches each turn: catalog
//! keyword handlers for recognized product intents, the generation
//! fallback chain for everything else. Every response ends with the fixed
//! contact footer and every failure path renders to text.

use std::sync::Arc;

use advisor_config::Keywords;
use advisor_core::{detect, Catalog, Turn};

use crate::classifier::IntentClassifier;
use crate::context::SessionContext;
use crate::fallback::GenerationChain;
use crate::handlers;
use crate::messages;

/// Session-terminating tokens, both languages
const EXIT_TOKENS: &[&str] = &["quit", "exit", "bye", "довиждане", "чао", "изход"];

/// Returns true when the input is a session-terminating command.
///
/// Exit commands never reach the orchestrator; the interactive loop checks
/// them first.
pub fn is_exit_command(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    EXIT_TOKENS.contains(&lower.as_str())
}

/// The dialogue advisor for one session
pub struct Advisor {
    catalog: Arc<Catalog>,
    classifier: IntentClassifier,
    keywords: Keywords,
    chain: GenerationChain,
    context: SessionContext,
}

impl Advisor {
    pub fn new(
        catalog: Arc<Catalog>,
        classifier: IntentClassifier,
        keywords: Keywords,
        chain: GenerationChain,
    ) -> Self {
        Self {
            catalog,
            classifier,
            keywords,
            chain,
            context: SessionContext::new(),
        }
    }

    /// Session state, read-only
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Produce the response for one user input.
    ///
    /// Total: every path, including internal failures, renders to a
    /// localized string.
    pub async fn generate_response(&mut self, input: &str) -> String {
        // Blank input gets a prompt in the session's current language and
        // leaves no history trace.
        if input.trim().is_empty() {
            return messages::enter_question(self.context.language).to_string();
        }

        let language = detect(input);
        self.context.language = language;

        let detected = self.classifier.classify(input);
        tracing::debug!(
            session = %self.context.session_id(),
            language = %language,
            intent = %detected.intent,
            confidence = detected.confidence,
            "Turn classified"
        );

        self.context.record_turn(Turn::new(
            input,
            language,
            detected.intent.clone(),
            detected.confidence,
        ));

        let response = match detected.intent.as_str() {
            "credit_cards" => {
                handlers::handle_card_inquiry(input, &self.catalog, &self.keywords, language)
            }
            "loans" => handlers::handle_loan_inquiry(input, &self.catalog, &self.keywords, language),
            _ => {
                self.chain
                    .respond(input, language, self.context.recent(3))
                    .await
            }
        };

        format!("{response}\n\n{}", messages::contact_footer(language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_config::RetrievalSettings;
    use advisor_core::catalog::{AttrMap, SourceDataset};
    use advisor_core::{Language, PRODUCT_INFO_FIELD};
    use advisor_rag::{Embedder, HashEmbedder, RagError, SemanticRetriever};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::BTreeMap;

    struct BrokenEmbedder;

    #[async_trait]
    impl Embedder for BrokenEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, RagError> {
            Err(RagError::Embedding("model offline".to_string()))
        }

        fn dim(&self) -> usize {
            0
        }
    }

    fn sample_catalog() -> Arc<Catalog> {
        let mut visa: BTreeMap<String, AttrMap> = BTreeMap::new();
        let mut attrs = AttrMap::new();
        attrs.insert(
            PRODUCT_INFO_FIELD.to_string(),
            json!("Лимит: до 10000 лв; Годишна такса: 60 лв"),
        );
        visa.insert("Visa Gold".to_string(), attrs);

        let mut mastercard: BTreeMap<String, AttrMap> = BTreeMap::new();
        mastercard.insert("Mastercard Standard".to_string(), AttrMap::new());

        let mut cards = SourceDataset::new();
        cards.insert("Visa".to_string(), visa);
        cards.insert("Mastercard".to_string(), mastercard);

        let mut consumer: BTreeMap<String, AttrMap> = BTreeMap::new();
        consumer.insert("Кредит Партньор".to_string(), AttrMap::new());
        let mut loans = SourceDataset::new();
        loans.insert("Потребителски кредити".to_string(), consumer);

        Arc::new(Catalog::build(cards, loans))
    }

    fn advisor_with_embedder(embedder: Arc<dyn Embedder>) -> Advisor {
        let catalog = sample_catalog();
        let retriever = Arc::new(SemanticRetriever::new(Arc::clone(&catalog), embedder));
        let chain = GenerationChain::new(None, retriever, RetrievalSettings::default());
        Advisor::new(
            catalog,
            IntentClassifier::default(),
            Keywords::default(),
            chain,
        )
    }

    fn advisor() -> Advisor {
        advisor_with_embedder(Arc::new(HashEmbedder::new(64)))
    }

    #[tokio::test]
    async fn test_bulgarian_card_inquiry_end_to_end() {
        let mut advisor = advisor();
        let response = advisor
            .generate_response("Какви кредитни карти предлагате?")
            .await;

        assert_eq!(advisor.context().language, Language::Bulgarian);
        assert_eq!(advisor.context().turn_count(), 1);
        assert_eq!(advisor.context().recent(1)[0].intent, "credit_cards");

        // Brand section headers plus the fixed contact footer
        assert!(response.contains("Visa карти:"));
        assert!(response.contains("Mastercard карти:"));
        assert!(response.contains("*2265"));
    }

    #[tokio::test]
    async fn test_blank_input_prompts_without_history() {
        let mut advisor = advisor();
        let response = advisor.generate_response("   ").await;

        assert_eq!(response, messages::enter_question(Language::English));
        assert_eq!(advisor.context().turn_count(), 0);
    }

    #[tokio::test]
    async fn test_unmatched_query_without_generator_reports_no_info() {
        let mut advisor = advisor_with_embedder(Arc::new(BrokenEmbedder));
        let response = advisor.generate_response("xyz123 unrelated gibberish").await;

        assert!(response.contains("couldn't find relevant information"));
        assert!(response.contains("*2265"));
        // The turn is still recorded with the default intent
        assert_eq!(advisor.context().recent(1)[0].intent, "general");
    }

    #[tokio::test]
    async fn test_loan_inquiry_dispatches_to_handler() {
        let mut advisor = advisor();
        let response = advisor
            .generate_response("Интересувам се от потребителски кредит")
            .await;

        assert!(response.contains("Продукти от категория \"Потребителски кредити\""));
        assert!(response.contains("*2265"));
    }

    #[tokio::test]
    async fn test_footer_language_follows_input() {
        let mut advisor = advisor();
        let response = advisor.generate_response("What credit cards do you offer?").await;
        assert!(response.contains("For more information: *2265"));
    }

    #[test]
    fn test_exit_tokens_both_languages() {
        for token in ["quit", "exit", "bye", "довиждане", "чао", "изход"] {
            assert!(is_exit_command(token), "{token} should exit");
        }
        assert!(is_exit_command("  QUIT  "));
        assert!(is_exit_command("Довиждане"));
        assert!(!is_exit_command("Какви карти предлагате?"));
        assert!(!is_exit_command(""));
    }
}
