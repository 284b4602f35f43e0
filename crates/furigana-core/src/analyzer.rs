//! The analyzer interface and its process-wide lazy initialization.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OnceCell;

use crate::error::{AnalyzerError, Result};
use crate::token::Token;

/// Script the readings are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Script {
    #[default]
    Hiragana,
    Katakana,
}

/// Output shape of [`Analyzer::convert`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// The whole text rewritten as its reading.
    Normal,
    /// Like `Normal`, with a space between morphemes.
    Spaced,
    /// The original text with `BASE(READING)` groups after kanji runs.
    #[default]
    Furigana,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub to: Script,
    pub mode: Mode,
}

impl ConvertOptions {
    pub fn furigana() -> Self {
        Self {
            to: Script::Hiragana,
            mode: Mode::Furigana,
        }
    }
}

/// A morphological analyzer. `convert` and `parse` must share one dictionary
/// so keyword readings agree with the rendered annotations.
///
/// Implementations are called concurrently and must not mutate shared state per call.
pub trait Analyzer: Send + Sync {
    fn convert(&self, text: &str, options: &ConvertOptions) -> Result<String>;

    fn parse(&self, text: &str) -> Result<Vec<Token>>;
}

type Loader<A> = Arc<dyn Fn() -> Result<A> + Send + Sync>;

/// Lazily loads an analyzer exactly once and hands out shared references.
///
/// Concurrent first callers wait on the same in-flight load. Only a successful
/// load is cached; if it fails, the error goes to the caller that ran it and
/// the next caller starts a fresh load.
pub struct LazyAnalyzer<A> {
    loader: Loader<A>,
    cell: OnceCell<Arc<A>>,
}

impl<A: Analyzer + 'static> LazyAnalyzer<A> {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<A> + Send + Sync + 'static,
    {
        Self {
            loader: Arc::new(loader),
            cell: OnceCell::new(),
        }
    }

    /// Wraps an analyzer that is already loaded.
    pub fn ready(analyzer: A) -> Self {
        Self {
            loader: Arc::new(|| -> Result<A> {
                Err(AnalyzerError::Init("analyzer was provided preloaded".into()))
            }),
            cell: OnceCell::new_with(Some(Arc::new(analyzer))),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get(&self) -> Result<Arc<A>> {
        let analyzer = self
            .cell
            .get_or_try_init(|| async {
                let loader = Arc::clone(&self.loader);
                let started = Instant::now();
                log::info!("Initializing analyzer");

                // Dictionary loads are blocking I/O plus decompression
                let loaded = tokio::task::spawn_blocking(move || loader())
                    .await
                    .map_err(|e| AnalyzerError::Init(format!("loader task failed: {}", e)))
                    .and_then(|result| result);

                match loaded {
                    Ok(analyzer) => {
                        log::info!("Analyzer ready in {:.2?}", started.elapsed());
                        Ok(Arc::new(analyzer))
                    }
                    Err(e) => {
                        log::error!("Analyzer initialization failed: {}", e);
                        Err(e)
                    }
                }
            })
            .await?;
        Ok(Arc::clone(analyzer))
    }
}
