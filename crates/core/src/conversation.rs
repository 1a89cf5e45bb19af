//! Conversation turn records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// One user turn, recorded after classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// The raw user input
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Language detected for this turn
    pub language: Language,
    /// Classified intent label
    pub intent: String,
    /// Classifier confidence
    pub confidence: f32,
}

impl Turn {
    pub fn new(text: impl Into<String>, language: Language, intent: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
            language,
            intent: intent.into(),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_serialization() {
        let turn = Turn::new("Какви карти предлагате?", Language::Bulgarian, "credit_cards", 0.8);
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("credit_cards"));
        assert!(json.contains("\"bg\""));

        let parsed: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.intent, "credit_cards");
        assert_eq!(parsed.confidence, 0.8);
    }
}
