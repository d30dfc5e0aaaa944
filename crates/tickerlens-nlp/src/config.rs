use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::keywords::DEFAULT_KEY_SENTENCE_PATTERN;
use crate::tokenizer::Segmentation;

fn default_true() -> bool {
    true
}

fn default_key_sentence_pattern() -> String {
    DEFAULT_KEY_SENTENCE_PATTERN.to_owned()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    400
}

fn default_max_words() -> usize {
    200
}

fn default_background() -> String {
    "#ffffff".to_owned()
}

/// Language resource and pipeline configuration.
///
/// Each optional resource can be switched off; the pipeline then runs in the
/// corresponding degraded mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NlpConfig {
    #[serde(default)]
    pub segmentation: Segmentation,
    #[serde(default = "default_true")]
    pub stopwords: bool,
    /// Replaces the built-in English list when set.
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub lemmatizer: bool,
    #[serde(default = "default_true")]
    pub sentiment: bool,
    #[serde(default = "default_key_sentence_pattern")]
    pub key_sentence_pattern: String,
    #[serde(default)]
    pub word_cloud: WordCloudConfig,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            segmentation: Segmentation::default(),
            stopwords: true,
            stopwords_path: None,
            lemmatizer: true,
            sentiment: true,
            key_sentence_pattern: default_key_sentence_pattern(),
            word_cloud: WordCloudConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WordCloudConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    /// Hex colour, `#rrggbb`.
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            max_words: default_max_words(),
            background: default_background(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let config = NlpConfig::default();
        assert_eq!(config.segmentation, Segmentation::Unicode);
        assert!(config.stopwords && config.lemmatizer && config.sentiment);
        assert!(config.stopwords_path.is_none());
        assert_eq!(config.word_cloud.width, 800);
        assert_eq!(config.word_cloud.height, 400);
        assert_eq!(config.word_cloud.background, "#ffffff");
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: NlpConfig = toml::from_str("").unwrap();
        assert_eq!(config.key_sentence_pattern, DEFAULT_KEY_SENTENCE_PATTERN);
        assert_eq!(config.word_cloud, WordCloudConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let config: NlpConfig = toml::from_str(
            r#"
            segmentation = "naive"
            sentiment = false

            [word_cloud]
            max_words = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.segmentation, Segmentation::Naive);
        assert!(!config.sentiment);
        assert!(config.stopwords);
        assert_eq!(config.word_cloud.max_words, 50);
        assert_eq!(config.word_cloud.width, 800);
    }
}
