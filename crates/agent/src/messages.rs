//! Localized fixed strings
//!
//! Every user-facing fixed string lives here, keyed on the detected
//! language, so renderers and handlers stay free of match-on-language
//! noise.

use advisor_core::Language;
use advisor_core::Language::{Bulgarian, English};

pub fn enter_question(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "💡 Моля, въведете вашия въпрос.",
        English => "💡 Please enter your question.",
    }
}

pub fn generic_error(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "Съжалявам, възникна грешка. Моля, опитайте отново.",
        English => "Sorry, an error occurred. Please try again.",
    }
}

pub fn no_relevant_info(lang: Language) -> &'static str {
    match lang {
        Bulgarian => {
            "Съжалявам, не намерих релевантна информация за вашия въпрос. \
             Можете да попитате за кредитни карти или кредити."
        }
        English => {
            "Sorry, I couldn't find relevant information for your question. \
             You can ask about credit cards or loans."
        }
    }
}

pub fn semantic_intro(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "Въз основа на вашия въпрос, ето някои продукти, които биха могли да ви интересуват:",
        English => "Based on your question, here are some products that might interest you:",
    }
}

pub fn follow_up(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "Искате ли да научите повече за някой от тези продукти?",
        English => "Would you like to learn more about any of these products?",
    }
}

pub fn contact_footer(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "📞 За повече информация: *2265 или посетете някой от нашите 119 клона в България.",
        English => "📞 For more information: *2265 or visit any of our 119 branches in Bulgaria.",
    }
}

pub fn no_products(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "Няма налични продукти в тази категория.",
        English => "No products available in this category.",
    }
}

pub fn list_tip(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "За повече детайли за конкретен продукт, просто го споменете по име.",
        English => "For more details about a specific product, just mention it by name.",
    }
}

pub fn card_list_tip(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "За повече детайли за конкретна карта, просто я споменете по име.",
        English => "For more details about a specific card, just mention it by name.",
    }
}

pub fn all_cards_header(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "💳 Всички налични кредитни карти от Fibank:",
        English => "💳 All available credit cards from Fibank:",
    }
}

pub fn brand_section(lang: Language, brand: &str) -> String {
    match lang {
        Bulgarian => format!("📱 {brand} карти:"),
        English => format!("📱 {brand} cards:"),
    }
}

pub fn brand_cards_header(lang: Language, brand: &str) -> String {
    match lang {
        Bulgarian => format!("Всички налични {brand} карти от Fibank"),
        English => format!("All available {brand} cards from Fibank"),
    }
}

pub fn more_info_label(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "Повече информация",
        English => "More information",
    }
}

pub fn visit_label(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "За повече информация посетете",
        English => "For more information visit",
    }
}

pub fn loan_category_header(lang: Language, category: &str) -> String {
    match lang {
        Bulgarian => format!("Продукти от категория \"{category}\""),
        English => format!("Products from category \"{category}\""),
    }
}

pub fn categories_intro(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "💰 Предлагаме продукти в следните категории:",
        English => "💰 We offer products in the following categories:",
    }
}

pub fn product_count(lang: Language, count: usize) -> String {
    match lang {
        Bulgarian => format!("({count} продукта)"),
        English => format!("({count} products)"),
    }
}

pub fn and_more(lang: Language, count: usize) -> String {
    match lang {
        Bulgarian => format!("и още {count} продукта..."),
        English => format!("and {count} more products..."),
    }
}

pub fn product_info_header(lang: Language, name: &str) -> String {
    match lang {
        Bulgarian => format!("💳 Информация за {name}:"),
        English => format!("💳 Information about {name}:"),
    }
}

pub fn benefits_heading(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "**Основни предимства:**",
        English => "**Key Benefits:**",
    }
}

pub fn details_heading(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "**Технически детайли:**",
        English => "**Technical Details:**",
    }
}

pub fn product_link(lang: Language, link: &str) -> String {
    match lang {
        Bulgarian => format!("🔗 За повече информация: {link}"),
        English => format!("🔗 For more information: {link}"),
    }
}

pub fn product_tip(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "💡 Можете да попитате за други продукти или да сравните с друг продукт.",
        English => "💡 You can ask about other products or compare with another product.",
    }
}

pub fn card_not_found(lang: Language, name: &str) -> String {
    match lang {
        Bulgarian => format!("Съжалявам, не намерих информация за {name}."),
        English => format!("Sorry, I couldn't find information for {name}."),
    }
}

pub fn loan_menu(lang: Language) -> &'static str {
    match lang {
        Bulgarian => {
            "За да видите конкретна категория, моля уточнете:\n\
             • \"Жилищни кредити\" или \"ипотечни кредити\"\n\
             • \"Потребителски кредити\"\n\
             • \"Овърдрафт\"\n\
             • \"Други кредити\"\n\n\
             Или можете да споменете конкретен продукт по име."
        }
        English => {
            "To see a specific category, please specify:\n\
             • \"Housing loans\" or \"mortgage loans\"\n\
             • \"Consumer loans\"\n\
             • \"Overdraft\"\n\
             • \"Other loans\"\n\n\
             Or you can mention a specific product by name."
        }
    }
}

pub fn goodbye(lang: Language) -> &'static str {
    match lang {
        Bulgarian => "Довиждане! Благодарим ви, че избрахте Fibank! 🌟",
        English => "Goodbye! Thank you for choosing Fibank! 🌟",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_carries_contact_number() {
        assert!(contact_footer(Bulgarian).contains("*2265"));
        assert!(contact_footer(English).contains("*2265"));
    }

    #[test]
    fn test_formatted_messages() {
        assert_eq!(brand_section(Bulgarian, "Visa"), "📱 Visa карти:");
        assert_eq!(product_count(English, 4), "(4 products)");
        assert!(card_not_found(English, "Visa Infinite").contains("Visa Infinite"));
    }
}
