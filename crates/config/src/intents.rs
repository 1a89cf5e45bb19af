//! Intent pattern configuration
//!
//! Groups are an ordered sequence: the classifier tests them in file order
//! and the first matching group wins, so the YAML format is a sequence
//! rather than a mapping.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One intent with its ordered match patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentGroup {
    pub name: String,
    pub patterns: Vec<String>,
}

/// On-disk intent file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentsFile {
    pub intents: Vec<IntentGroup>,
}

/// Compiled intent patterns, load order preserved
#[derive(Debug, Clone)]
pub struct IntentPatterns {
    groups: Vec<(String, Vec<Regex>)>,
}

impl IntentPatterns {
    /// Compile a parsed intents file. Any invalid pattern fails the whole
    /// compilation so the caller can fall back to the defaults.
    pub fn compile(file: &IntentsFile) -> Result<Self, ConfigError> {
        let mut groups = Vec::with_capacity(file.intents.len());
        for group in &file.intents {
            let mut compiled = Vec::with_capacity(group.patterns.len());
            for pattern in &group.patterns {
                let regex = Regex::new(&format!("(?i){pattern}")).map_err(|source| {
                    ConfigError::InvalidPattern {
                        intent: group.name.clone(),
                        pattern: pattern.clone(),
                        source,
                    }
                })?;
                compiled.push(regex);
            }
            groups.push((group.name.clone(), compiled));
        }
        Ok(Self { groups })
    }

    /// Load from a YAML file, degrading to the compiled defaults on any
    /// failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(patterns) => {
                tracing::info!(
                    path = %path.display(),
                    groups = patterns.groups.len(),
                    "Loaded intent patterns"
                );
                patterns
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not load intent patterns, using defaults"
                );
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let file: IntentsFile = serde_yaml::from_str(&content)?;
        Self::compile(&file)
    }

    /// Groups in load order
    pub fn groups(&self) -> &[(String, Vec<Regex>)] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for IntentPatterns {
    fn default() -> Self {
        Self::compile(&default_intents_file())
            .unwrap_or_else(|e| unreachable!("default intent patterns must compile: {e}"))
    }
}

/// Built-in fallback patterns, used when the config file is missing or
/// malformed. Group order is significant.
pub fn default_intents_file() -> IntentsFile {
    let group = |name: &str, patterns: &[&str]| IntentGroup {
        name: name.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    };

    IntentsFile {
        intents: vec![
            group(
                "credit_cards",
                &[
                    r"\b(credit\s*card|кредитна\s*карта|карта|карти)\b",
                    r"\b(visa|виза|визa|viza|виса|mastercard|мастеркард|мастър\s*кард|мастеркарт)\b",
                    r"\b(платина|златна|класик|standard|стандартна|gold|голд|platinum|платинум)\b",
                    r"\b(плащане|плащания|покупки|first\s*lady|фърст\s*лейди|за\s*дами)\b",
                ],
            ),
            group(
                "loans",
                &[
                    r"\b(loan|заем|кредит|ипотека|жилищен)\b",
                    r"\b(consumer|потребителски|overdraft|овърдрафт)\b",
                    r"\b(финансиране|пари|сума)\b",
                ],
            ),
            group(
                "rates",
                &[
                    r"\b(rate|лихва|лихвен|процент)\b",
                    r"\b(price|цена|такса|комисионна)\b",
                    r"\b(how\s*much|колко\s*струва|цената)\b",
                ],
            ),
            group(
                "application",
                &[
                    r"\b(apply|кандидатствам|заявка|процес)\b",
                    r"\b(how\s*to|как\s*да|документи|изисквания)\b",
                    r"\b(online|онлайн|клон|филиал)\b",
                ],
            ),
            group(
                "help",
                &[
                    r"\b(help|помощ|помогнете|информация)\b",
                    r"\b(what\s*can\s*you|какво\s*можеш|възможности)\b",
                    r"\b(guide|ръководство|инструкции)\b",
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_compile() {
        let patterns = IntentPatterns::default();
        assert_eq!(patterns.len(), 5);
        assert_eq!(patterns.groups()[0].0, "credit_cards");
        assert_eq!(patterns.groups()[1].0, "loans");
    }

    #[test]
    fn test_invalid_pattern_fails_compilation() {
        let file = IntentsFile {
            intents: vec![IntentGroup {
                name: "broken".to_string(),
                patterns: vec!["(unclosed".to_string()],
            }],
        };
        assert!(matches!(
            IntentPatterns::compile(&file),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_degrades_to_defaults() {
        let patterns = IntentPatterns::load_or_default("/nonexistent/intents.yaml");
        assert_eq!(patterns.len(), 5);
    }

    #[test]
    fn test_load_yaml_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intents.yaml");
        std::fs::write(
            &path,
            "intents:\n  - name: second_first\n    patterns: ['\\bbeta\\b']\n  - name: alpha_last\n    patterns: ['\\balpha\\b']\n",
        )
        .unwrap();

        let patterns = IntentPatterns::load_or_default(&path);
        assert_eq!(patterns.groups()[0].0, "second_first");
        assert_eq!(patterns.groups()[1].0, "alpha_last");
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let patterns = IntentPatterns::default();
        let (_, cards) = &patterns.groups()[0];
        assert!(cards.iter().any(|r| r.is_match("VISA gold")));
    }
}
