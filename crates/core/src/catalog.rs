//! Product catalog
//!
//! Loads the two source datasets (credit cards, loans) and merges them into
//! a unified product index keyed by normalized product name. The nested
//! per-category shape of both datasets is retained because brand and
//! category renderers display products grouped the way the source files
//! group them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Attribute field holding the localized product description
pub const PRODUCT_INFO_FIELD: &str = "информация за продукта";

/// Attribute field holding the product link
pub const LINK_FIELD: &str = "link";

/// Raw product attributes as loaded from the source documents
pub type AttrMap = serde_json::Map<String, serde_json::Value>;

/// Two-level source dataset: category -> product name -> attributes
pub type SourceDataset = BTreeMap<String, BTreeMap<String, AttrMap>>;

/// Catalog errors are startup-fatal; the process must not continue with a
/// half-loaded catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Product kind, tagged from the source dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    CreditCard,
    /// Loans keep the source tag `credit`
    Credit,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::CreditCard => "credit_card",
            ProductKind::Credit => "credit",
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Original (un-normalized) product name
    pub name: String,
    pub kind: ProductKind,
    /// Source category, e.g. a card brand or a loan category
    pub category: String,
    /// Localized description pulled from the product info attribute
    pub description: String,
    /// Full raw attribute map, retained for rendering
    pub attributes: AttrMap,
}

impl Product {
    /// Product link, if present
    pub fn link(&self) -> Option<&str> {
        self.attributes.get(LINK_FIELD).and_then(|v| v.as_str())
    }
}

/// Unified in-memory product index
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: BTreeMap<String, Product>,
    cards: SourceDataset,
    loans: SourceDataset,
}

impl Catalog {
    /// Load both source documents and build the catalog.
    ///
    /// Missing or malformed files are fatal: the error propagates to the
    /// caller and no partial catalog is produced.
    pub fn load(
        cards_path: impl AsRef<Path>,
        loans_path: impl AsRef<Path>,
    ) -> Result<Self, CatalogError> {
        let cards = read_dataset(cards_path.as_ref())?;
        let loans = read_dataset(loans_path.as_ref())?;
        Ok(Self::build(cards, loans))
    }

    /// Build the catalog from already-parsed datasets.
    ///
    /// Cards are merged first, then loans; on a normalized-key collision the
    /// later write wins.
    pub fn build(cards: SourceDataset, loans: SourceDataset) -> Self {
        let mut products = BTreeMap::new();

        for (category, entries) in &cards {
            for (name, attrs) in entries {
                let product = make_product(name, ProductKind::CreditCard, category, attrs);
                products.insert(normalize_key(name), product);
            }
        }

        for (category, entries) in &loans {
            for (name, attrs) in entries {
                let product = make_product(name, ProductKind::Credit, category, attrs);
                products.insert(normalize_key(name), product);
            }
        }

        tracing::info!(products = products.len(), "Catalog built");

        Self {
            products,
            cards,
            loans,
        }
    }

    /// Number of unified products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by normalized key
    pub fn get(&self, key: &str) -> Option<&Product> {
        self.products.get(key)
    }

    /// Iterate all products in key order
    pub fn products(&self) -> impl Iterator<Item = (&String, &Product)> {
        self.products.iter()
    }

    /// All card brands with their products, as grouped in the source data
    pub fn card_brands(&self) -> &SourceDataset {
        &self.cards
    }

    /// Products of one card brand
    pub fn brand_cards(&self, brand: &str) -> Option<&BTreeMap<String, AttrMap>> {
        self.cards.get(brand)
    }

    /// A specific card by brand and display name
    pub fn card(&self, brand: &str, name: &str) -> Option<&AttrMap> {
        self.cards.get(brand).and_then(|cards| cards.get(name))
    }

    /// All loan categories with their products
    pub fn loan_categories(&self) -> &SourceDataset {
        &self.loans
    }

    /// Products of one loan category
    pub fn loan_category(&self, category: &str) -> Option<&BTreeMap<String, AttrMap>> {
        self.loans.get(category)
    }
}

/// Strip straight and Bulgarian quote variants from a product name
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | '„' | '“' | '”'))
        .collect()
}

fn make_product(name: &str, kind: ProductKind, category: &str, attrs: &AttrMap) -> Product {
    let description = attrs
        .get(PRODUCT_INFO_FIELD)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    Product {
        name: name.to_string(),
        kind,
        category: category.to_string(),
        description,
        attributes: attrs.clone(),
    }
}

fn read_dataset(path: &Path) -> Result<SourceDataset, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(info: &str, link: Option<&str>) -> AttrMap {
        let mut map = AttrMap::new();
        map.insert(PRODUCT_INFO_FIELD.to_string(), json!(info));
        if let Some(link) = link {
            map.insert(LINK_FIELD.to_string(), json!(link));
        }
        map
    }

    fn sample_cards() -> SourceDataset {
        let mut visa = BTreeMap::new();
        visa.insert(
            "Visa Classic".to_string(),
            attrs("Лимит: до 5000 лв; Годишна такса: 30 лв", Some("https://example.bg/visa")),
        );
        let mut dataset = SourceDataset::new();
        dataset.insert("Visa".to_string(), visa);
        dataset
    }

    fn sample_loans() -> SourceDataset {
        let mut consumer = BTreeMap::new();
        consumer.insert(
            "Кредит „Партньор“".to_string(),
            attrs("Потребителски кредит с фиксирана лихва", None),
        );
        let mut dataset = SourceDataset::new();
        dataset.insert("Потребителски кредити".to_string(), consumer);
        dataset
    }

    #[test]
    fn test_normalize_strips_quotes() {
        assert_eq!(normalize_key("Кредит „Партньор“"), "Кредит Партньор");
        assert_eq!(normalize_key("\"Visa\" Gold"), "Visa Gold");
        assert_eq!(normalize_key("Plain"), "Plain");
    }

    #[test]
    fn test_build_merges_both_datasets() {
        let catalog = Catalog::build(sample_cards(), sample_loans());
        assert_eq!(catalog.len(), 2);

        let card = catalog.get("Visa Classic").unwrap();
        assert_eq!(card.kind, ProductKind::CreditCard);
        assert_eq!(card.category, "Visa");
        assert!(card.description.starts_with("Лимит"));
        assert_eq!(card.link(), Some("https://example.bg/visa"));

        let loan = catalog.get("Кредит Партньор").unwrap();
        assert_eq!(loan.kind, ProductKind::Credit);
        assert_eq!(loan.name, "Кредит „Партньор“");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let a = Catalog::build(sample_cards(), sample_loans());
        let b = Catalog::build(sample_cards(), sample_loans());
        assert_eq!(a.len(), b.len());
        let keys_a: Vec<_> = a.products().map(|(k, _)| k.clone()).collect();
        let keys_b: Vec<_> = b.products().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys_a, keys_b);
    }

    #[test]
    fn test_collision_last_write_wins() {
        let mut cards = sample_cards();
        cards
            .get_mut("Visa")
            .unwrap()
            .insert("Дубликат".to_string(), attrs("карта", None));

        let mut loans = sample_loans();
        loans
            .get_mut("Потребителски кредити")
            .unwrap()
            .insert("Дубликат".to_string(), attrs("кредит", None));

        let catalog = Catalog::build(cards, loans);
        // Loans are merged after cards, so the loan entry wins
        assert_eq!(catalog.get("Дубликат").unwrap().kind, ProductKind::Credit);
    }

    #[test]
    fn test_missing_description_is_empty() {
        let mut cards = SourceDataset::new();
        let mut brand = BTreeMap::new();
        brand.insert("Bare".to_string(), AttrMap::new());
        cards.insert("Visa".to_string(), brand);

        let catalog = Catalog::build(cards, SourceDataset::new());
        assert_eq!(catalog.get("Bare").unwrap().description, "");
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let err = Catalog::load("/nonexistent/cards.json", "/nonexistent/loans.json");
        assert!(matches!(err, Err(CatalogError::FileNotFound(_))));
    }

    #[test]
    fn test_load_malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cards = dir.path().join("cards.json");
        let loans = dir.path().join("loans.json");
        std::fs::write(&cards, "{not json").unwrap();
        std::fs::write(&loans, "{}").unwrap();

        let err = Catalog::load(&cards, &loans);
        assert!(matches!(err, Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cards = dir.path().join("cards.json");
        let loans = dir.path().join("loans.json");
        std::fs::write(
            &cards,
            serde_json::to_string(&sample_cards()).unwrap(),
        )
        .unwrap();
        std::fs::write(
            &loans,
            serde_json::to_string(&sample_loans()).unwrap(),
        )
        .unwrap();

        let catalog = Catalog::load(&cards, &loans).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.brand_cards("Visa").is_some());
        assert!(catalog.loan_category("Потребителски кредити").is_some());
    }
}
