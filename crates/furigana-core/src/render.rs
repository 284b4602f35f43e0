//! Ruby markup generation and sanitization.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::analyzer::{Analyzer, ConvertOptions, LazyAnalyzer};
use crate::error::Result;
use crate::notation::{parse_notation, Segment};

/// Sanitization rules, applied in order.
static SANITIZE_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"[\r\n]", ""),
        // fallback parentheses some analyzers wrap around readings
        (r"(?is)<rp>.*?</rp>", ""),
        (r"(?i)</?rp>", ""),
        // annotation units without a reading keep their base as plain text
        (r#"(?i)<span class="rb">\s*<ruby>([^<]*)<rt>\s*</rt>\s*</ruby>\s*</span>"#, "$1"),
        (r"(?i)<ruby>([^<]*)<rt>\s*</rt>\s*</ruby>", "$1"),
        // annotation units without a base are dropped
        (r#"(?i)<span class="rb">\s*<ruby>\s*(?:<rt>[^<]*</rt>)?\s*</ruby>\s*</span>"#, ""),
        (r"(?i)<ruby>\s*(?:<rt>[^<]*</rt>)?\s*</ruby>", ""),
        (r"(?i)(?:\s*</ruby>){2,}", "</ruby>"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (Regex::new(pattern).expect("sanitize pattern"), replacement)
    })
    .collect()
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern"));
static READING_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<rt>.*?</rt>").expect("reading pattern"));
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Emits each ruby segment as `<span class="rb"><ruby>BASE<rt>READING</rt></ruby></span>`.
///
/// `ruby` lays out as one unbreakable box; the outer span is what lets a line
/// break fall between two neighbouring annotated words.
pub fn segments_to_ruby_html(segments: &[Segment<'_>]) -> String {
    let mut html = String::new();
    for segment in segments {
        match segment {
            Segment::Plain(text) => html.push_str(&escape_html(text)),
            Segment::Ruby { base, reading } => {
                html.push_str(r#"<span class="rb"><ruby>"#);
                html.push_str(&escape_html(base));
                html.push_str("<rt>");
                html.push_str(&escape_html(reading));
                html.push_str("</rt></ruby></span>");
            }
        }
    }
    html
}

/// Drops line breaks, collapses whitespace runs to one space and trims.
///
/// This is the whitespace the rendered markup keeps, so it is also the visible
/// text expected back from `render_plain` for plain input.
pub fn normalize_whitespace(text: &str) -> String {
    let joined: String = text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    WHITESPACE_RUN.replace_all(&joined, " ").trim().to_string()
}

/// Cleans up generated ruby markup. Running it twice changes nothing.
pub fn sanitize(html: &str) -> String {
    let mut out = html.to_string();
    for (regex, replacement) in SANITIZE_RULES.iter() {
        out = regex.replace_all(&out, *replacement).into_owned();
    }
    normalize_whitespace(&out)
}

/// Furigana notation straight to sanitized ruby HTML.
pub fn notation_to_html(notation: &str) -> String {
    sanitize(&segments_to_ruby_html(&parse_notation(notation)))
}

/// Visible text of rendered markup: readings and tags removed, entities decoded.
pub fn render_plain(html: &str) -> String {
    let without_readings = READING_ELEMENT.replace_all(html, "");
    unescape_html(&ANY_TAG.replace_all(&without_readings, ""))
}

/// Renders Japanese text as ruby-annotated HTML over a shared analyzer.
pub struct FuriganaRenderer<A> {
    analyzer: Arc<LazyAnalyzer<A>>,
}

impl<A> Clone for FuriganaRenderer<A> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
        }
    }
}

impl<A: Analyzer + 'static> FuriganaRenderer<A> {
    pub fn new(analyzer: Arc<LazyAnalyzer<A>>) -> Self {
        Self { analyzer }
    }

    /// Blank input renders to `""` without loading the analyzer.
    /// Analyzer failures are returned as-is; there is no partial output.
    pub async fn render(&self, text: &str) -> Result<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let analyzer = self.analyzer.get().await?;
        let notation = analyzer.convert(trimmed, &ConvertOptions::furigana())?;
        log::debug!("Furigana notation: {}", notation);
        Ok(notation_to_html(&notation))
    }
}
