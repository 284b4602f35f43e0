#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use furigana_core::convert::{convert_morphemes, Morpheme};
use furigana_core::{Analyzer, AnalyzerError, ConvertOptions, Token};

// surface, basic form, part of speech, reading
const LEXICON: &[(&str, &str, &str, &str)] = &[
    ("日本語", "日本語", "名詞", "ニホンゴ"),
    ("勉強", "勉強", "名詞", "ベンキョウ"),
    ("感じ", "感じる", "動詞", "カンジ"),
    ("良い", "良い", "形容詞", "ヨイ"),
    ("天気", "天気", "名詞", "テンキ"),
    ("今日", "今日", "名詞", "キョウ"),
    ("訪れる", "訪れる", "動詞", "オトズレル"),
    ("京都", "京都", "名詞", "キョウト"),
    ("桜", "桜", "名詞", "サクラ"),
    ("こと", "こと", "名詞", "コト"),
    ("します", "する", "動詞", "シマス"),
    ("です", "です", "助動詞", "デス"),
    ("を", "を", "助詞", "ヲ"),
    ("は", "は", "助詞", "ハ"),
    ("が", "が", "助詞", "ガ"),
    ("に", "に", "助詞", "ニ"),
    ("の", "の", "助詞", "ノ"),
];

/// Longest-match segmenter over a tiny lexicon; unknown characters become
/// single-character symbol tokens without a reading.
pub struct TableAnalyzer {
    pub calls: Arc<AtomicUsize>,
}

impl TableAnalyzer {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn morphemes(text: &str) -> Vec<Morpheme> {
        let mut morphemes = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            let rest = &text[pos..];
            let entry = LEXICON
                .iter()
                .filter(|(surface, ..)| rest.starts_with(surface))
                .max_by_key(|(surface, ..)| surface.len());
            let (token, len) = match entry {
                Some((surface, basic, pos_tag, reading)) => {
                    (Token::new(*surface, *basic, *pos_tag, *reading), surface.len())
                }
                None => {
                    let c = rest.chars().next().unwrap();
                    (Token::new(c.to_string(), "", "記号", ""), c.len_utf8())
                }
            };
            morphemes.push(Morpheme {
                range: pos..pos + len,
                token,
            });
            pos += len;
        }
        morphemes
    }
}

impl Analyzer for TableAnalyzer {
    fn convert(&self, text: &str, options: &ConvertOptions) -> Result<String, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(convert_morphemes(text, &Self::morphemes(text), options))
    }

    fn parse(&self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::morphemes(text).into_iter().map(|m| m.token).collect())
    }
}

/// Fails every call mid-conversion.
pub struct BrokenAnalyzer;

impl Analyzer for BrokenAnalyzer {
    fn convert(&self, _text: &str, _options: &ConvertOptions) -> Result<String, AnalyzerError> {
        Err(AnalyzerError::Conversion("segmentation fault in dictionary".into()))
    }

    fn parse(&self, _text: &str) -> Result<Vec<Token>, AnalyzerError> {
        Err(AnalyzerError::Conversion("segmentation fault in dictionary".into()))
    }
}
