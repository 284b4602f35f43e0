//! Furigana annotation and keyword extraction for Japanese text.
//!
//! Text goes through a morphological analyzer once per pipeline: the
//! renderer turns the analyzer's `BASE(READING)` notation into ruby HTML,
//! and the keyword filter narrows the token stream down to a handful of
//! content words worth explaining.

pub mod analyzer;
pub mod convert;
pub mod dictionary;
pub mod error;
pub mod explain;
pub mod kana;
pub mod keywords;
pub mod notation;
pub mod render;
pub mod rules;
pub mod service;
pub mod token;

pub use analyzer::{Analyzer, ConvertOptions, LazyAnalyzer, Mode, Script};
pub use dictionary::{FeatureLayout, VibratoAnalyzer};
pub use error::{AnalyzerError, Result, RulesError};
pub use kana::katakana_to_hiragana;
pub use keywords::{filter_key_words, KeywordEntry, KeywordFilter};
pub use render::{sanitize, FuriganaRenderer};
pub use rules::KeywordRules;
pub use service::{Annotation, FuriganaService};
pub use token::Token;
