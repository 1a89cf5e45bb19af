//! Intent classification
//!
//! Pattern groups are tested in configuration order against the lowercased
//! input. A group's first matching pattern scores a fixed 0.8 and replaces
//! the best candidate only on a strictly higher score, so with the uniform
//! score the earliest matching group wins. That tie-break is load-bearing:
//! the group order in the intent config is the dispatch priority.

use advisor_config::IntentPatterns;

/// Intent assigned when nothing matches
pub const GENERAL_INTENT: &str = "general";

/// Fixed confidence for any pattern match
const MATCH_CONFIDENCE: f32 = 0.8;

/// Classification result
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedIntent {
    pub intent: String,
    pub confidence: f32,
}

/// Regex-based intent classifier
pub struct IntentClassifier {
    patterns: IntentPatterns,
}

impl IntentClassifier {
    pub fn new(patterns: IntentPatterns) -> Self {
        Self { patterns }
    }

    /// Classify user input.
    ///
    /// Returns `("general", 0.0)` when no pattern matches.
    pub fn classify(&self, text: &str) -> DetectedIntent {
        let text_lower = text.to_lowercase();

        let mut best_intent = GENERAL_INTENT.to_string();
        let mut best_score = 0.0f32;

        for (intent, patterns) in self.patterns.groups() {
            for pattern in patterns {
                if pattern.is_match(&text_lower) {
                    let score = MATCH_CONFIDENCE;
                    if score > best_score {
                        best_score = score;
                        best_intent = intent.clone();
                    }
                    break;
                }
            }
        }

        DetectedIntent {
            intent: best_intent,
            confidence: best_score,
        }
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(IntentPatterns::default())
    }
}
