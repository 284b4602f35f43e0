//! Both pipelines over one shared analyzer.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analyzer::{Analyzer, ConvertOptions, LazyAnalyzer};
use crate::dictionary::{FeatureLayout, VibratoAnalyzer};
use crate::error::Result;
use crate::keywords::{KeywordEntry, KeywordFilter};
use crate::render::FuriganaRenderer;
use crate::rules::KeywordRules;
use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub html: String,
    pub keywords: Vec<KeywordEntry>,
}

/// Intended to be created once per process and shared; the analyzer is
/// loaded on the first non-blank request.
pub struct FuriganaService<A> {
    analyzer: Arc<LazyAnalyzer<A>>,
    renderer: FuriganaRenderer<A>,
    filter: KeywordFilter,
}

impl FuriganaService<VibratoAnalyzer> {
    pub fn vibrato(dict_path: impl Into<PathBuf>, layout: FeatureLayout, rules: KeywordRules) -> Self {
        Self::new(VibratoAnalyzer::lazy(dict_path, layout), rules)
    }
}

impl<A: Analyzer + 'static> FuriganaService<A> {
    pub fn new(analyzer: LazyAnalyzer<A>, rules: KeywordRules) -> Self {
        let analyzer = Arc::new(analyzer);
        Self {
            renderer: FuriganaRenderer::new(Arc::clone(&analyzer)),
            analyzer,
            filter: KeywordFilter::new(rules),
        }
    }

    pub async fn render(&self, text: &str) -> Result<String> {
        self.renderer.render(text).await
    }

    /// Analyzer output in any mode, e.g. the whole sentence as a reading.
    /// Blank input gives `""` without loading the analyzer.
    pub async fn convert(&self, text: &str, options: &ConvertOptions) -> Result<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }
        let analyzer = self.analyzer.get().await?;
        analyzer.convert(trimmed, options)
    }

    pub async fn tokens(&self, text: &str) -> Result<Vec<Token>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        let analyzer = self.analyzer.get().await?;
        analyzer.parse(trimmed)
    }

    pub async fn key_words(&self, text: &str) -> Result<Vec<KeywordEntry>> {
        let tokens = self.tokens(text).await?;
        let keywords = self.filter.filter(&tokens);
        log::debug!("Selected {} keywords from {} tokens", keywords.len(), tokens.len());
        Ok(keywords)
    }

    pub async fn annotate(&self, text: &str) -> Result<Annotation> {
        let (html, keywords) = tokio::try_join!(self.render(text), self.key_words(text))?;
        Ok(Annotation { html, keywords })
    }
}
