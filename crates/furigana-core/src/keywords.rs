//! Picks the few content words in a token stream worth explaining.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::kana::{contains_kanji, katakana_to_hiragana};
use crate::rules::KeywordRules;
use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    /// Dictionary form.
    pub word: String,
    /// Reading in hiragana.
    pub reading: String,
}

impl fmt::Display for KeywordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.word, self.reading)
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    rules: KeywordRules,
}

static DEFAULT_FILTER: LazyLock<KeywordFilter> = LazyLock::new(KeywordFilter::default);

impl KeywordFilter {
    pub fn new(rules: KeywordRules) -> Self {
        Self { rules }
    }

    /// Returns up to `max_keywords` entries in token order.
    ///
    /// A token qualifies when its surface contains kanji, its part of speech is
    /// a content word, and its dictionary form is neither a formal noun nor a
    /// basic word. Repeated words are kept; scanning stops at the cap.
    pub fn filter(&self, tokens: &[Token]) -> Vec<KeywordEntry> {
        let mut entries = Vec::new();
        if self.rules.max_keywords == 0 {
            return entries;
        }

        for token in tokens {
            if !contains_kanji(&token.surface) {
                continue;
            }
            if !self.rules.is_content_word(&token.part_of_speech) {
                continue;
            }
            let basic_form = token.basic_form();
            if self.rules.is_formal_noun(basic_form) || self.rules.is_basic_word(basic_form) {
                continue;
            }

            entries.push(KeywordEntry {
                word: basic_form.to_string(),
                reading: katakana_to_hiragana(token.reading().unwrap_or(&token.surface)),
            });
            if entries.len() >= self.rules.max_keywords {
                break;
            }
        }
        entries
    }
}

/// [`KeywordFilter::filter`] with the built-in rules.
pub fn filter_key_words(tokens: &[Token]) -> Vec<KeywordEntry> {
    DEFAULT_FILTER.filter(tokens)
}
