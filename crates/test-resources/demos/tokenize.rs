use anyhow::Result;
use furigana_core::render::notation_to_html;
use furigana_core::{filter_key_words, Analyzer, ConvertOptions, FeatureLayout, VibratoAnalyzer};

fn main() -> Result<()> {
    let dict_path = test_resources::dict_path();
    let analyzer = VibratoAnalyzer::open(&dict_path, FeatureLayout::default())?;

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "今日はいい天気です".to_string());

    println!("Tokenizing: {}", text);
    let tokens = analyzer.parse(&text)?;
    for (i, t) in tokens.iter().enumerate() {
        println!(
            "{}: {} [{}] base={} reading={}",
            i,
            t.surface,
            t.part_of_speech,
            t.basic_form(),
            t.reading
        );
    }

    let notation = analyzer.convert(&text, &ConvertOptions::furigana())?;
    println!("Notation: {}", notation);
    println!("HTML: {}", notation_to_html(&notation));

    for entry in filter_key_words(&tokens) {
        println!("Keyword: {}", entry);
    }

    Ok(())
}
