//! Response composition
//!
//! Pure rendering over fully-resolved catalog data. Renderers build
//! strings and nothing else; retrieval and business decisions happen in
//! the handlers. A product with no extractable summary is shown without
//! one rather than failing the list.

use std::collections::BTreeMap;

use advisor_core::catalog::SourceDataset;
use advisor_core::{AttrMap, Language, LINK_FIELD, PRODUCT_INFO_FIELD};

use crate::messages;

/// Example products shown per category in the overview
const OVERVIEW_EXAMPLES: usize = 3;

/// Extracts a short per-product summary for list rendering.
///
/// Returns `None` when the product carries nothing worth summarizing;
/// callers skip the summary line in that case.
pub trait SummaryExtractor {
    fn summarize(&self, attrs: &AttrMap) -> Option<String>;
}

/// Credit-card summaries: the limit / annual fee / cashback lines
pub struct CardSummary;

impl SummaryExtractor for CardSummary {
    fn summarize(&self, attrs: &AttrMap) -> Option<String> {
        let info = product_info(attrs)?;

        let key_lines: Vec<&str> = info
            .split(';')
            .map(str::trim)
            .filter(|line| {
                let lower = line.to_lowercase();
                ["лимит:", "годишна такса:", "cashback:"]
                    .iter()
                    .any(|kw| lower.contains(kw))
            })
            .take(3)
            .collect();

        if key_lines.is_empty() {
            None
        } else {
            Some(key_lines.join("\n   "))
        }
    }
}

/// Loan summaries: the first two non-bullet description lines
pub struct LoanSummary;

impl SummaryExtractor for LoanSummary {
    fn summarize(&self, attrs: &AttrMap) -> Option<String> {
        let info = product_info(attrs)?;

        let key_lines: Vec<&str> = info
            .lines()
            .take(2)
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('-'))
            .collect();

        if key_lines.is_empty() {
            None
        } else {
            Some(key_lines.join("\n   "))
        }
    }
}

fn product_info(attrs: &AttrMap) -> Option<&str> {
    attrs
        .get(PRODUCT_INFO_FIELD)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

fn product_link(attrs: &AttrMap) -> Option<&str> {
    attrs
        .get(LINK_FIELD)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

/// Render a product list with per-item summaries and links.
pub fn render_product_list(
    header: &str,
    items: &BTreeMap<String, AttrMap>,
    extractor: &dyn SummaryExtractor,
    link_label: &str,
    language: Language,
) -> String {
    let mut out = format!("💳 {header}\n\n");

    if items.is_empty() {
        out.push_str(messages::no_products(language));
        return out;
    }

    for (name, attrs) in items {
        out.push_str(&format!("🔹 **{name}**\n"));

        if let Some(summary) = extractor.summarize(attrs) {
            out.push_str(&format!("   {summary}\n"));
        }

        match product_link(attrs) {
            Some(link) => out.push_str(&format!("   🔗 {link_label}: {link}\n\n")),
            None => out.push('\n'),
        }
    }

    out.push_str(messages::list_tip(language));
    out
}

/// Render detailed information for a single product.
///
/// The description splits on `"\n- "`: the leading segment is the benefits
/// block, every following segment a technical-details bullet.
pub fn render_specific_product(name: &str, attrs: &AttrMap, language: Language) -> String {
    let mut out = format!("{}\n\n", messages::product_info_header(language, name));

    if let Some(info) = product_info(attrs) {
        for (i, section) in info.split("\n- ").enumerate() {
            if i == 0 {
                out.push_str(&format!(
                    "{}\n{}\n\n",
                    messages::benefits_heading(language),
                    section.trim()
                ));
            } else {
                out.push_str(&format!(
                    "{}\n- {}\n\n",
                    messages::details_heading(language),
                    section.trim()
                ));
            }
        }
    }

    if let Some(link) = product_link(attrs) {
        out.push_str(&format!("{}\n\n", messages::product_link(language, link)));
    }

    out.push_str(messages::product_tip(language));
    out
}

/// Render the category overview: per category a count and a few example
/// product names.
pub fn render_category_overview(categories: &SourceDataset, language: Language) -> String {
    let mut out = format!("{}\n\n", messages::categories_intro(language));

    for (category, products) in categories {
        out.push_str(&format!(
            "🔹 **{category}** {}\n",
            messages::product_count(language, products.len())
        ));

        for name in products.keys().take(OVERVIEW_EXAMPLES) {
            out.push_str(&format!("   • {name}\n"));
        }

        if products.len() > OVERVIEW_EXAMPLES {
            out.push_str(&format!(
                "   • {}\n",
                messages::and_more(language, products.len() - OVERVIEW_EXAMPLES)
            ));
        }
        out.push('\n');
    }

    out
}
