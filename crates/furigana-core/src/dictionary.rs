//! Analyzer backed by a compiled vibrato dictionary.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use ::vibrato::{Dictionary, Tokenizer};

use crate::analyzer::{Analyzer, ConvertOptions, LazyAnalyzer};
use crate::convert::{convert_morphemes, Morpheme};
use crate::error::{AnalyzerError, Result};
use crate::kana::hiragana_to_katakana;
use crate::token::Token;

/// Column positions inside a dictionary entry's comma-separated feature string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLayout {
    pub pos: usize,
    pub basic_form: usize,
    pub reading: usize,
}

impl FeatureLayout {
    /// IPADIC, and the Mozc-derived dictionaries that copy its columns.
    pub const IPADIC: FeatureLayout = FeatureLayout {
        pos: 0,
        basic_form: 6,
        reading: 7,
    };
}

impl Default for FeatureLayout {
    fn default() -> Self {
        Self::IPADIC
    }
}

fn load_error(dict_path: &Path, e: impl std::fmt::Display) -> AnalyzerError {
    AnalyzerError::Init(format!("failed to load dictionary {:?}: {}", dict_path, e))
}

pub fn load_tokenizer(dict_path: &Path) -> Result<Tokenizer> {
    log::info!("Loading dictionary from {:?}", dict_path);

    let file = File::open(dict_path).map_err(|e| load_error(dict_path, e))?;
    let dict = if dict_path.extension().is_some_and(|ext| ext == "zst") {
        let decoder = zstd::Decoder::new(file).map_err(|e| load_error(dict_path, e))?;
        Dictionary::read(decoder)
    } else {
        Dictionary::read(BufReader::new(file))
    }
    .map_err(|e| load_error(dict_path, e))?;

    log::info!("Dictionary loaded successfully");
    Ok(Tokenizer::new(dict))
}

/// Builds a [`Token`] from a vibrato surface and feature string.
/// Missing columns and `*` placeholders become empty fields.
pub fn token_from_feature(surface: &str, feature: &str, layout: &FeatureLayout) -> Token {
    let fields: Vec<&str> = feature.split(',').collect();
    let field = |i: usize| {
        fields
            .get(i)
            .copied()
            .filter(|f| !f.is_empty() && *f != "*")
            .unwrap_or("")
    };

    Token::new(
        surface,
        field(layout.basic_form),
        field(layout.pos),
        // Mozc-derived dictionaries store hiragana readings
        hiragana_to_katakana(field(layout.reading)),
    )
}

pub struct VibratoAnalyzer {
    tokenizer: Tokenizer,
    layout: FeatureLayout,
}

impl VibratoAnalyzer {
    pub fn new(tokenizer: Tokenizer, layout: FeatureLayout) -> Self {
        Self { tokenizer, layout }
    }

    pub fn open(dict_path: &Path, layout: FeatureLayout) -> Result<Self> {
        Ok(Self::new(load_tokenizer(dict_path)?, layout))
    }

    /// A lazily opened analyzer; the dictionary is read on first use.
    pub fn lazy(dict_path: impl Into<PathBuf>, layout: FeatureLayout) -> LazyAnalyzer<Self> {
        let dict_path = dict_path.into();
        LazyAnalyzer::new(move || Self::open(&dict_path, layout))
    }

    fn morphemes(&self, text: &str) -> Vec<Morpheme> {
        // Workers are cheap and per call; the tokenizer itself is never mutated
        let mut worker = self.tokenizer.new_worker();
        worker.reset_sentence(text);
        worker.tokenize();

        let mut morphemes = Vec::with_capacity(worker.num_tokens());
        for i in 0..worker.num_tokens() {
            let token = worker.token(i);
            morphemes.push(Morpheme {
                range: token.range_byte(),
                token: token_from_feature(token.surface(), token.feature(), &self.layout),
            });
        }
        log::trace!("Tokenized {} bytes into {} morphemes", text.len(), morphemes.len());
        morphemes
    }
}

impl Analyzer for VibratoAnalyzer {
    fn convert(&self, text: &str, options: &ConvertOptions) -> Result<String> {
        let morphemes = self.morphemes(text);
        Ok(convert_morphemes(text, &morphemes, options))
    }

    fn parse(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self.morphemes(text).into_iter().map(|m| m.token).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipadic_feature() {
        let feature = "動詞,自立,*,*,一段,連用形,感じる,カンジ,カンジ";
        let token = token_from_feature("感じ", feature, &FeatureLayout::IPADIC);
        assert_eq!(token, Token::new("感じ", "感じる", "動詞", "カンジ"));
    }

    #[test]
    fn test_mozc_feature_with_placeholders() {
        let feature = "名詞,一般,*,*,*,*,*,べんきょう,べんきょう";
        let token = token_from_feature("勉強", feature, &FeatureLayout::IPADIC);
        assert_eq!(token.basic_form(), "勉強");
        assert_eq!(token.reading(), Some("ベンキョウ"));
    }

    #[test]
    fn test_short_feature() {
        let token = token_from_feature("。", "記号", &FeatureLayout::IPADIC);
        assert_eq!(token.part_of_speech, "記号");
        assert_eq!(token.reading(), None);
    }

    #[test]
    fn test_missing_dictionary_is_init_error() {
        let err = load_tokenizer(Path::new("/nonexistent/system.dic.zst")).err().unwrap();
        assert!(matches!(err, AnalyzerError::Init(_)));
    }
}
