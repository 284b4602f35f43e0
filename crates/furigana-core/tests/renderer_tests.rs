mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{BrokenAnalyzer, TableAnalyzer};
use furigana_core::render::render_plain;
use furigana_core::{
    AnalyzerError, ConvertOptions, FuriganaRenderer, FuriganaService, KeywordRules, LazyAnalyzer, Mode, Script,
};

fn counting_loader(loads: Arc<AtomicUsize>) -> LazyAnalyzer<TableAnalyzer> {
    LazyAnalyzer::new(move || {
        loads.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(50));
        Ok(TableAnalyzer::new())
    })
}

#[tokio::test]
async fn test_end_to_end_sentence() {
    let renderer = FuriganaRenderer::new(Arc::new(LazyAnalyzer::ready(TableAnalyzer::new())));
    let html = renderer.render("日本語を勉強します").await.unwrap();

    assert_eq!(
        html,
        concat!(
            r#"<span class="rb"><ruby>日本語<rt>にほんご</rt></ruby></span>"#,
            "を",
            r#"<span class="rb"><ruby>勉強<rt>べんきょう</rt></ruby></span>"#,
            "します"
        )
    );
    assert_eq!(render_plain(&html), "日本語を勉強します");
}

#[tokio::test]
async fn test_okurigana_rendering() {
    let renderer = FuriganaRenderer::new(Arc::new(LazyAnalyzer::ready(TableAnalyzer::new())));
    let html = renderer.render("感じ").await.unwrap();
    assert_eq!(html, r#"<span class="rb"><ruby>感<rt>かん</rt></ruby></span>じ"#);
}

#[tokio::test]
async fn test_blank_input_skips_analyzer() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_loader = Arc::clone(&calls);
    let loads = Arc::new(AtomicUsize::new(0));
    let loads_in_loader = Arc::clone(&loads);
    let lazy = Arc::new(LazyAnalyzer::new(move || {
        loads_in_loader.fetch_add(1, Ordering::SeqCst);
        Ok(TableAnalyzer {
            calls: Arc::clone(&calls_in_loader),
        })
    }));
    let renderer = FuriganaRenderer::new(Arc::clone(&lazy));

    assert_eq!(renderer.render("").await.unwrap(), "");
    assert_eq!(renderer.render("   ").await.unwrap(), "");
    assert_eq!(renderer.render("\n\t ").await.unwrap(), "");

    assert_eq!(loads.load(Ordering::SeqCst), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!lazy.is_initialized());

    renderer.render("桜").await.unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_whitespace_is_normalized() {
    let renderer = FuriganaRenderer::new(Arc::new(LazyAnalyzer::ready(TableAnalyzer::new())));
    let html = renderer.render("  今日は\n天気   です  ").await.unwrap();
    assert!(!html.contains('\n'));
    assert_eq!(render_plain(&html), "今日は天気 です");
}

#[tokio::test]
async fn test_conversion_error_propagates() {
    let renderer = FuriganaRenderer::new(Arc::new(LazyAnalyzer::ready(BrokenAnalyzer)));
    let err = renderer.render("日本語").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::Conversion(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_calls_load_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let renderer = FuriganaRenderer::new(Arc::new(counting_loader(Arc::clone(&loads))));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let renderer = renderer.clone();
            tokio::spawn(async move { renderer.render("京都の桜").await })
        })
        .collect();
    for handle in handles {
        let html = handle.await.unwrap().unwrap();
        assert_eq!(render_plain(&html), "京都の桜");
    }

    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_initialization_is_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_in_loader = Arc::clone(&attempts);
    let lazy = LazyAnalyzer::new(move || {
        if attempts_in_loader.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(AnalyzerError::Init("dictionary not found".into()))
        } else {
            Ok(TableAnalyzer::new())
        }
    });
    let renderer = FuriganaRenderer::new(Arc::new(lazy));

    let err = renderer.render("桜").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::Init(_)));

    let html = renderer.render("桜").await.unwrap();
    assert!(html.contains("<rt>さくら</rt>"));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_service_annotate() {
    let service = FuriganaService::new(LazyAnalyzer::ready(TableAnalyzer::new()), KeywordRules::default());
    let annotation = service.annotate("今日は京都の桜が良い感じ").await.unwrap();

    assert_eq!(render_plain(&annotation.html), "今日は京都の桜が良い感じ");
    let words: Vec<_> = annotation.keywords.iter().map(|k| k.to_string()).collect();
    assert_eq!(words, vec!["京都(きょうと)", "桜(さくら)", "感じる(かんじ)"]);
}

#[tokio::test]
async fn test_service_blank_key_words() {
    let service = FuriganaService::new(LazyAnalyzer::ready(BrokenAnalyzer), KeywordRules::default());
    assert!(service.key_words("  ").await.unwrap().is_empty());
    assert!(service.key_words("桜").await.is_err());
}

#[tokio::test]
async fn test_service_reading_modes() {
    let service = FuriganaService::new(LazyAnalyzer::ready(TableAnalyzer::new()), KeywordRules::default());
    let normal = ConvertOptions {
        to: Script::Hiragana,
        mode: Mode::Normal,
    };
    let spaced = ConvertOptions {
        to: Script::Katakana,
        mode: Mode::Spaced,
    };
    assert_eq!(service.convert(" 日本語を ", &normal).await.unwrap(), "にほんごを");
    assert_eq!(service.convert("日本語を", &spaced).await.unwrap(), "ニホンゴ ヲ");

    let broken = FuriganaService::new(LazyAnalyzer::ready(BrokenAnalyzer), KeywordRules::default());
    assert_eq!(broken.convert("\n", &normal).await.unwrap(), "");
}
