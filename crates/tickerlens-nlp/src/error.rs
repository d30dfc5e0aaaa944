use thiserror::Error;

/// Failure loading an optional language resource. Never fatal: the owning
/// stage degrades and the analysis metadata records the resource as missing.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("resource file {0} contains no entries")]
    Empty(String),
}

#[derive(Debug, Error)]
pub enum WordCloudError {
    #[error("word cloud corpus is empty after cleansing")]
    EmptyCorpus,
    #[error("failed to encode word cloud image: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("invalid key sentence pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
