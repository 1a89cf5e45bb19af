//! Keyword trigger configuration for the catalog inquiry handlers
//!
//! Card variant groups are ordered: Visa variants are listed (and checked)
//! before Mastercard variants. Each variant carries the display name used
//! to look the product up in the catalog, so no name synthesis happens at
//! match time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One specific card variant with its trigger phrases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardVariant {
    /// Brand key in the catalog (e.g. "Visa")
    pub brand: String,
    /// Product display name in the catalog (e.g. "Visa Gold")
    pub product: String,
    /// Trigger phrases, matched as substrings of lowercased input
    pub triggers: Vec<String>,
}

/// Generic brand mention triggers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandTriggers {
    #[serde(default)]
    pub visa: Vec<String>,
    #[serde(default)]
    pub mastercard: Vec<String>,
}

/// One loan type with its catalog category and trigger phrases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanType {
    /// Short identifier (e.g. "housing")
    pub name: String,
    /// Category display name in the loans dataset
    pub category: String,
    pub triggers: Vec<String>,
}

/// On-disk keywords file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsFile {
    #[serde(default)]
    pub cards: Vec<CardVariant>,
    #[serde(default)]
    pub brands: BrandTriggers,
    #[serde(default)]
    pub loans: Vec<LoanType>,
}

/// Loaded keyword configuration
#[derive(Debug, Clone)]
pub struct Keywords {
    pub cards: Vec<CardVariant>,
    pub brands: BrandTriggers,
    pub loans: Vec<LoanType>,
}

impl Keywords {
    /// Load from a YAML file, degrading to the compiled defaults on any
    /// failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(keywords) => {
                tracing::info!(path = %path.display(), "Loaded keyword configuration");
                keywords
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not load keywords, using defaults"
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
        let file: KeywordsFile = serde_yaml::from_str(&content)?;
        Ok(Self {
            cards: file.cards,
            brands: file.brands,
            loans: file.loans,
        })
    }
}

impl Default for Keywords {
    fn default() -> Self {
        let variant = |brand: &str, product: &str, triggers: &[&str]| CardVariant {
            brand: brand.to_string(),
            product: product.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
        };
        let loan = |name: &str, category: &str, triggers: &[&str]| LoanType {
            name: name.to_string(),
            category: category.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
        };

        Self {
            // Visa variants first; order is the match order
            cards: vec![
                variant("Visa", "Visa Classic", &["visa classic", "виза класик", "класическа виза"]),
                variant("Visa", "Visa Gold", &["visa gold", "виза голд", "златна виза"]),
                variant("Visa", "Visa Platinum", &["visa platinum", "виза платинум", "платинена виза"]),
                variant("Mastercard", "Mastercard Standard", &["mastercard standard", "мастеркард стандартна"]),
                variant("Mastercard", "Mastercard Gold", &["mastercard gold", "мастеркард златна"]),
                variant("Mastercard", "Mastercard Platinum", &["mastercard platinum", "мастеркард платинена"]),
                variant(
                    "Mastercard",
                    "Mastercard Platinum First Lady",
                    &["first lady", "фърст лейди", "за дами"],
                ),
            ],
            brands: BrandTriggers {
                visa: vec!["visa".to_string(), "виза".to_string()],
                mastercard: vec!["mastercard".to_string(), "мастеркард".to_string()],
            },
            loans: vec![
                loan(
                    "housing",
                    "Жилищни и ипотечни кредити",
                    &["жилищен", "ипотечен", "ипотека", "mortgage"],
                ),
                loan(
                    "consumer",
                    "Потребителски кредити",
                    &["потребителски", "consumer", "personal loan"],
                ),
                loan("overdraft", "Овърдрафт", &["овърдрафт", "overdraft"]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_visa_before_mastercard() {
        let keywords = Keywords::default();
        let first_mastercard = keywords
            .cards
            .iter()
            .position(|v| v.brand == "Mastercard")
            .unwrap();
        assert!(keywords.cards[..first_mastercard]
            .iter()
            .all(|v| v.brand == "Visa"));
    }

    #[test]
    fn test_default_loan_categories() {
        let keywords = Keywords::default();
        let housing = keywords.loans.iter().find(|l| l.name == "housing").unwrap();
        assert_eq!(housing.category, "Жилищни и ипотечни кредити");
    }

    #[test]
    fn test_load_missing_file_degrades_to_defaults() {
        let keywords = Keywords::load_or_default("/nonexistent/keywords.yaml");
        assert!(!keywords.cards.is_empty());
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.yaml");
        std::fs::write(
            &path,
            concat!(
                "cards:\n",
                "  - brand: Visa\n",
                "    product: Visa Infinite\n",
                "    triggers: [\"visa infinite\"]\n",
                "brands:\n",
                "  visa: [\"visa\"]\n",
                "  mastercard: [\"mastercard\"]\n",
                "loans:\n",
                "  - name: housing\n",
                "    category: \"Жилищни и ипотечни кредити\"\n",
                "    triggers: [\"ипотека\"]\n",
            ),
        )
        .unwrap();

        let keywords = Keywords::load_or_default(&path);
        assert_eq!(keywords.cards.len(), 1);
        assert_eq!(keywords.cards[0].product, "Visa Infinite");
        assert_eq!(keywords.loans[0].category, "Жилищни и ипотечни кредити");
    }

    #[test]
    fn test_malformed_yaml_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.yaml");
        std::fs::write(&path, "cards: {not: [valid").unwrap();

        let keywords = Keywords::load_or_default(&path);
        assert!(keywords.cards.iter().any(|v| v.product == "Visa Classic"));
    }
}
