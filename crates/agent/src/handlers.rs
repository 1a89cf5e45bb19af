//! Catalog keyword inquiry handlers
//!
//! Pure lookups over the keyword configuration and the catalog; no
//! retrieval, no AI. Card variant groups are checked in configuration
//! order (Visa before Mastercard) and the first trigger hit wins.

use advisor_config::Keywords;
use advisor_core::{Catalog, Language};

use crate::messages;
use crate::render::{self, CardSummary, LoanSummary, SummaryExtractor};

/// Handle a credit-card inquiry.
pub fn handle_card_inquiry(
    input: &str,
    catalog: &Catalog,
    keywords: &Keywords,
    language: Language,
) -> String {
    let lower = input.to_lowercase();

    // Specific variants first, in configuration order.
    for variant in &keywords.cards {
        if variant
            .triggers
            .iter()
            .any(|t| lower.contains(&t.to_lowercase()))
        {
            return show_specific_card(catalog, &variant.brand, &variant.product, language);
        }
    }

    // Generic brand mentions: exactly one brand narrows the list.
    let visa = keywords
        .brands
        .visa
        .iter()
        .any(|t| lower.contains(&t.to_lowercase()));
    let mastercard = keywords
        .brands
        .mastercard
        .iter()
        .any(|t| lower.contains(&t.to_lowercase()));

    match (visa, mastercard) {
        (true, false) => show_brand_cards(catalog, "Visa", language),
        (false, true) => show_brand_cards(catalog, "Mastercard", language),
        _ => show_all_cards(catalog, language),
    }
}

fn show_specific_card(
    catalog: &Catalog,
    brand: &str,
    name: &str,
    language: Language,
) -> String {
    match catalog.card(brand, name) {
        Some(attrs) => render::render_specific_product(name, attrs, language),
        None => {
            tracing::warn!(brand, name, "Card variant configured but missing from catalog");
            messages::card_not_found(language, name)
        }
    }
}

fn show_brand_cards(catalog: &Catalog, brand: &str, language: Language) -> String {
    let items = catalog.brand_cards(brand).cloned().unwrap_or_default();
    render::render_product_list(
        &messages::brand_cards_header(language, brand),
        &items,
        &CardSummary,
        messages::more_info_label(language),
        language,
    )
}

fn show_all_cards(catalog: &Catalog, language: Language) -> String {
    let mut out = format!("{}\n\n", messages::all_cards_header(language));

    for (brand, cards) in catalog.card_brands() {
        out.push_str(&format!("{}\n", messages::brand_section(language, brand)));

        for (name, attrs) in cards {
            out.push_str(&format!("🔹 **{name}**\n"));

            if let Some(summary) = CardSummary.summarize(attrs) {
                out.push_str(&format!("   {summary}\n"));
            }

            match attrs.get(advisor_core::LINK_FIELD).and_then(|v| v.as_str()) {
                Some(link) if !link.is_empty() => out.push_str(&format!(
                    "   🔗 {}: {link}\n\n",
                    messages::more_info_label(language)
                )),
                _ => out.push('\n'),
            }
        }
    }

    out.push_str(messages::card_list_tip(language));
    out
}

/// Handle a loan inquiry.
pub fn handle_loan_inquiry(
    input: &str,
    catalog: &Catalog,
    keywords: &Keywords,
    language: Language,
) -> String {
    let lower = input.to_lowercase();

    let mentioned: Vec<_> = keywords
        .loans
        .iter()
        .filter(|loan| {
            loan.triggers
                .iter()
                .any(|t| lower.contains(&t.to_lowercase()))
        })
        .collect();

    // Exactly one distinct type narrows to its category; zero or several
    // show the full overview.
    if let [loan] = mentioned.as_slice() {
        let items = catalog.loan_category(&loan.category).cloned().unwrap_or_default();
        return render::render_product_list(
            &messages::loan_category_header(language, &loan.category),
            &items,
            &LoanSummary,
            messages::visit_label(language),
            language,
        );
    }

    let mut out = render::render_category_overview(catalog.loan_categories(), language);
    out.push_str(messages::loan_menu(language));
    out
}
