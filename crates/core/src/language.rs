//! Language detection for Bulgarian/English input
//!
//! Detection runs cheap script and keyword checks before falling back to
//! statistical identification, so short banking queries resolve without
//! invoking the classifier at all.

use serde::{Deserialize, Serialize};

/// Supported reply languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[serde(rename = "bg")]
    Bulgarian,
    #[default]
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// ISO 639-1 code used in config and logs
    pub fn code(&self) -> &'static str {
        match self {
            Language::Bulgarian => "bg",
            Language::English => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Bulgarian Cyrillic alphabet subset
const BULGARIAN_CHARS: &str = "абвгдежзийклмнопрстуфхцчшщъьюя";

/// Common Bulgarian banking terms, matched as substrings of lowercased input.
/// Catches transliterated or mixed-script messages that carry no Cyrillic.
const BULGARIAN_TERMS: &[&str] = &[
    "заем",
    "кредит",
    "карта",
    "лихва",
    "банка",
    "пари",
    "плащане",
    "ипотека",
    "потребителски",
    "овърдрафт",
    "филиал",
    "клон",
    "документи",
    "заявка",
    "процес",
    "онлайн",
    "помощ",
    "информация",
];

/// Detect the language of user input.
///
/// Order, first match wins:
/// 1. empty/whitespace input defaults to English
/// 2. any Bulgarian Cyrillic character
/// 3. any common Bulgarian banking term as a substring
/// 4. statistical fallback; only bg/en verdicts are accepted
pub fn detect(text: &str) -> Language {
    if text.trim().is_empty() {
        return Language::English;
    }

    let lower = text.to_lowercase();

    if lower.chars().any(|c| BULGARIAN_CHARS.contains(c)) {
        return Language::Bulgarian;
    }

    if BULGARIAN_TERMS.iter().any(|term| lower.contains(term)) {
        return Language::Bulgarian;
    }

    match whatlang::detect_lang(text) {
        Some(whatlang::Lang::Bul) => Language::Bulgarian,
        Some(whatlang::Lang::Eng) => Language::English,
        Some(_) => Language::English,
        None => {
            tracing::warn!(
                text = %text.chars().take(50).collect::<String>(),
                "Language detection failed, defaulting to English"
            );
            Language::English
        }
    }
}
