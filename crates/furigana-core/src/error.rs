use thiserror::Error;

/// Failures of the morphological analyzer behind the renderer and the keyword filter.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The one-time dictionary load failed. Not cached: the next caller retries.
    #[error("analyzer initialization failed: {0}")]
    Init(String),

    /// The analyzer failed while processing a single text.
    #[error("conversion failed: {0}")]
    Conversion(String),
}

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("failed to read keyword rules from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid keyword rules: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
