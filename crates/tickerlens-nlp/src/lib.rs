//! Text analysis pipeline: tokenize, tag, cleanse, score sentiment, pick key
//! sentences and render a word cloud.

pub mod analyzer;
pub mod cleanser;
pub mod config;
pub mod error;
pub mod keywords;
pub mod lemmatizer;
pub mod resources;
pub mod sentiment;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;
pub mod wordcloud;

pub use analyzer::{AnalysisMetadata, AnalysisResult, TextAnalyzer, WordCloudStatus};
pub use config::{NlpConfig, WordCloudConfig};
pub use error::{AnalyzerError, ResourceError, WordCloudError};
pub use resources::{Capabilities, LanguageResources};
pub use sentiment::{PolarityScores, SentimentReport};
pub use tokenizer::Segmentation;
