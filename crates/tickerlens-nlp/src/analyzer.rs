use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cleanser::Cleanser;
use crate::config::NlpConfig;
use crate::error::{AnalyzerError, WordCloudError};
use crate::keywords::KeySentenceExtractor;
use crate::resources::LanguageResources;
use crate::sentiment::SentimentReport;
use crate::tagger;
use crate::tokenizer::tokenize;
use crate::wordcloud::WordCloudRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordCloudStatus {
    Rendered,
    EmptyCorpus,
    Failed,
}

/// Which resources were available for this analysis and how the word cloud
/// turned out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub sentence_model_loaded: bool,
    pub stopwords_loaded: bool,
    pub lemmatizer_loaded: bool,
    pub vader_loaded: bool,
    pub raw_token_count: usize,
    pub word_cloud: WordCloudStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub sentences: usize,
    /// Cleansed word count.
    pub words: usize,
    pub words_per_sentence: f64,
    pub sentiment: SentimentReport,
    pub key_sentences: Vec<String>,
    /// Base64 PNG, absent when nothing survived cleansing.
    pub word_cloud_image: Option<String>,
    pub metadata: AnalysisMetadata,
}

/// Runs the full pipeline over one text. Cheap to clone; resources are shared.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    resources: Arc<LanguageResources>,
    key_sentences: KeySentenceExtractor,
    word_cloud: WordCloudRenderer,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(LanguageResources::full()))
    }
}

impl TextAnalyzer {
    #[must_use]
    pub fn new(resources: Arc<LanguageResources>) -> Self {
        Self {
            resources,
            key_sentences: KeySentenceExtractor::default(),
            word_cloud: WordCloudRenderer::default(),
        }
    }

    /// Load resources and build the analyzer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidPattern`] if `key_sentence_pattern`
    /// does not compile.
    pub fn from_config(config: &NlpConfig) -> Result<Self, AnalyzerError> {
        let key_sentences =
            KeySentenceExtractor::new(&config.key_sentence_pattern).map_err(|source| {
                AnalyzerError::InvalidPattern {
                    pattern: config.key_sentence_pattern.clone(),
                    source,
                }
            })?;
        let resources = Arc::new(LanguageResources::load(config));
        tracing::info!(capabilities = ?resources.capabilities(), "text analyzer ready");
        Ok(Self {
            resources,
            key_sentences,
            word_cloud: WordCloudRenderer::new(&config.word_cloud),
        })
    }

    #[must_use]
    pub fn with_key_sentences(mut self, extractor: KeySentenceExtractor) -> Self {
        self.key_sentences = extractor;
        self
    }

    #[must_use]
    pub fn with_word_cloud(mut self, renderer: WordCloudRenderer) -> Self {
        self.word_cloud = renderer;
        self
    }

    #[must_use]
    pub fn resources(&self) -> &LanguageResources {
        &self.resources
    }

    #[must_use]
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let tokenized = tokenize(text, self.resources.segmentation());
        let tagged = tagger::tag(&tokenized.tokens);
        let cleansed =
            Cleanser::new(self.resources.stopwords(), self.resources.lemmatizer()).cleanse(&tagged);

        let sentiment = match self.resources.sentiment() {
            Some(scorer) => SentimentReport::Scored(scorer.score(text)),
            None => SentimentReport::Disabled,
        };

        let key_sentences = self.key_sentences.extract(&tokenized.sentences);

        let (word_cloud_image, word_cloud) = match self.word_cloud.render_corpus(&cleansed.join(" ")) {
            Ok(cloud) => (Some(cloud.to_base64()), WordCloudStatus::Rendered),
            Err(WordCloudError::EmptyCorpus) => (None, WordCloudStatus::EmptyCorpus),
            Err(e) => {
                tracing::warn!("word cloud rendering failed: {e:#}");
                (None, WordCloudStatus::Failed)
            }
        };

        let sentences = tokenized.sentence_count();
        let words = cleansed.len();
        #[allow(clippy::cast_precision_loss)]
        let words_per_sentence = if sentences == 0 {
            0.0
        } else {
            words as f64 / sentences as f64
        };

        let caps = self.resources.capabilities();
        tracing::debug!(
            sentences,
            words,
            raw_tokens = tokenized.token_count(),
            key_sentences = key_sentences.len(),
            "text analyzed"
        );

        AnalysisResult {
            sentences,
            words,
            words_per_sentence,
            sentiment,
            key_sentences,
            word_cloud_image,
            metadata: AnalysisMetadata {
                sentence_model_loaded: caps.sentence_model,
                stopwords_loaded: caps.stopwords,
                lemmatizer_loaded: caps.lemmatizer,
                vader_loaded: caps.sentiment,
                raw_token_count: tokenized.token_count(),
                word_cloud,
            },
        }
    }
}
