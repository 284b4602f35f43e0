//! Tunable word lists for the keyword filter.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

const CONTENT_POS: &[&str] = &["名詞", "動詞", "形容詞", "形状詞"];

const EXCLUDED_POS: &[&str] = &["助詞", "助動詞", "接続詞"];

/// Formal nouns: "thing", "fact", "place", "way".
const FORMAL_NOUNS: &[&str] = &["こと", "もの", "ところ", "よう"];

/// Words too elementary to be worth explaining, by dictionary form.
const BASIC_WORDS: &[&str] = &[
    "人", "行く", "来る", "見る", "聞く", "言う", "思う", "する", "ある", "いる",
    "大きい", "小さい", "多い", "少ない", "良い", "悪い", "新しい", "古い",
    "高い", "低い", "暑い", "寒い", "熱い", "冷たい", "難しい", "易しい",
    "時", "日", "年", "月", "今日", "明日", "昨日", "今", "ここ", "そこ", "あそこ",
    "何", "誰", "どこ", "どう", "なぜ", "いくつ", "いくら",
    "私", "あなた", "彼", "彼女",
    "方", "中", "上", "下", "前", "後",
    "一", "二", "三", "四", "五", "六", "七", "八", "九", "十",
    "食べる", "飲む", "寝る", "起きる", "勉強", "仕事", "学校", "家",
];

pub const DEFAULT_MAX_KEYWORDS: usize = 5;

fn to_set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Which tokens count as keywords. Every field may be omitted in a rules
/// file, in which case the built-in list is used.
///
/// ```toml
/// max_keywords = 3
/// basic_words = ["人", "日"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordRules {
    pub content_pos: BTreeSet<String>,
    pub excluded_pos: BTreeSet<String>,
    pub formal_nouns: BTreeSet<String>,
    pub basic_words: BTreeSet<String>,
    pub max_keywords: usize,
}

impl Default for KeywordRules {
    fn default() -> Self {
        Self {
            content_pos: to_set(CONTENT_POS),
            excluded_pos: to_set(EXCLUDED_POS),
            formal_nouns: to_set(FORMAL_NOUNS),
            basic_words: to_set(BASIC_WORDS),
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }
}

impl KeywordRules {
    pub fn from_toml_str(s: &str) -> Result<Self, RulesError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let rules = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded keyword rules from {:?} ({} basic words, cap {})",
            path,
            rules.basic_words.len(),
            rules.max_keywords
        );
        Ok(rules)
    }

    /// Excluded parts of speech win over the content set.
    pub fn is_content_word(&self, pos: &str) -> bool {
        !self.excluded_pos.contains(pos) && self.content_pos.contains(pos)
    }

    pub fn is_formal_noun(&self, basic_form: &str) -> bool {
        self.formal_nouns.contains(basic_form)
    }

    pub fn is_basic_word(&self, basic_form: &str) -> bool {
        self.basic_words.contains(basic_form)
    }
}
