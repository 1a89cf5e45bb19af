//! Structured prompt construction
//!
//! Assembles the generation prompt from the system role text in the
//! detected language, the recent conversation history, the retrieved
//! products, the output guidelines and the user question.

use advisor_core::{Language, Turn};
use advisor_rag::ScoredProduct;

/// Turns of history included in the prompt
const HISTORY_TURNS: usize = 3;

/// Products included in the prompt
const PROMPT_PRODUCTS: usize = 3;

/// Description truncation length (characters)
const DESCRIPTION_CHARS: usize = 200;

const SYSTEM_BG: &str = "Ти си AI асистент на Първа инвестиционна банка АД (Fibank). \
Отговаряй на въпросите на клиентите относно кредитни карти и кредити. \
Бъди професионален, полезен и приветлив. Използвай информацията за продуктите, която ти е предоставена. \
Винаги предоставяй точна информация и насърчавай клиентите да се свържат с банката за повече детайли.";

const SYSTEM_EN: &str = "You are an AI assistant for First Investment Bank AD (Fibank). \
Answer customer questions about credit cards and loans. \
Be professional, helpful, and friendly. Use the product information provided to you. \
Always provide accurate information and encourage customers to contact the bank for more details.";

const GUIDELINES_BG: &str = "Указания:
- Отговори директно на въпроса на клиента
- Ако питането е за конкретен продукт, предостави подробна информация
- Ако не знаеш точен отговор, препоръчай да се свържат с банката
- Винаги завършвай с информация за контакт: *2265 или 119 клона в България
- Бъди кратък и ясен в отговорите си";

const GUIDELINES_EN: &str = "Guidelines:
- Answer the customer's question directly
- If asking about a specific product, provide detailed information
- If you don't know the exact answer, recommend contacting the bank
- Always end with contact information: *2265 or 119 branches in Bulgaria
- Keep responses concise and clear";

/// Prompt builder
///
/// History and product slices are borrowed immutably; the builder never
/// holds live references past `build`.
pub struct PromptBuilder<'a> {
    language: Language,
    history: &'a [Turn],
    products: &'a [ScoredProduct],
}

impl<'a> PromptBuilder<'a> {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            history: &[],
            products: &[],
        }
    }

    /// Recent conversation history; only the last 3 turns are embedded
    pub fn with_history(mut self, history: &'a [Turn]) -> Self {
        self.history = history;
        self
    }

    /// Retrieved products; only the top 3 are embedded
    pub fn with_products(mut self, products: &'a [ScoredProduct]) -> Self {
        self.products = products;
        self
    }

    /// Assemble the final prompt
    pub fn build(&self, user_input: &str) -> String {
        let system = match self.language {
            Language::Bulgarian => SYSTEM_BG,
            Language::English => SYSTEM_EN,
        };

        let mut prompt = String::from(system);
        prompt.push('\n');

        if !self.history.is_empty() {
            prompt.push_str("\nRecent conversation:\n");
            let skip = self.history.len().saturating_sub(HISTORY_TURNS);
            for turn in &self.history[skip..] {
                prompt.push_str("User: ");
                prompt.push_str(&turn.text);
                prompt.push('\n');
            }
        }

        if !self.products.is_empty() {
            match self.language {
                Language::Bulgarian => prompt.push_str("\nРелевантни продукти на Fibank:\n"),
                Language::English => prompt.push_str("\nRelevant Fibank products:\n"),
            }
            for hit in self.products.iter().take(PROMPT_PRODUCTS) {
                prompt.push_str(&format!(
                    "- {}: {}\n",
                    hit.product.name,
                    truncate(&hit.product.description, DESCRIPTION_CHARS)
                ));
            }
        }

        prompt.push('\n');
        prompt.push_str(match self.language {
            Language::Bulgarian => GUIDELINES_BG,
            Language::English => GUIDELINES_EN,
        });

        prompt.push_str("\n\nUser question: ");
        prompt.push_str(user_input);
        prompt.push_str("\n\nResponse:");
        prompt
    }
}

/// Truncate to at most `max` characters, ellipsis-suffixed when shortened
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max).collect();
        out.push_str("...");
        out
    }
}
