use serde::Serialize;

use crate::config::NlpConfig;
use crate::lemmatizer::Lemmatizer;
use crate::sentiment::SentimentScorer;
use crate::stopwords::StopwordSet;
use crate::tokenizer::Segmentation;

/// Which optional resources are available to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub sentence_model: bool,
    pub stopwords: bool,
    pub lemmatizer: bool,
    pub sentiment: bool,
}

/// Language resources built once at startup and shared read-only between
/// analyses.
#[derive(Debug)]
pub struct LanguageResources {
    segmentation: Segmentation,
    stopwords: Option<StopwordSet>,
    lemmatizer: Option<Lemmatizer>,
    sentiment: Option<SentimentScorer>,
}

impl Default for LanguageResources {
    fn default() -> Self {
        Self::full()
    }
}

impl LanguageResources {
    /// Every resource loaded, built-in stopword list.
    #[must_use]
    pub fn full() -> Self {
        Self {
            segmentation: Segmentation::Unicode,
            stopwords: Some(StopwordSet::english()),
            lemmatizer: Some(Lemmatizer::new()),
            sentiment: Some(SentimentScorer::new()),
        }
    }

    /// No optional resources: naive segmentation, no stopwords, no
    /// lemmatizer, sentiment disabled.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            segmentation: Segmentation::Naive,
            stopwords: None,
            lemmatizer: None,
            sentiment: None,
        }
    }

    /// Load resources according to `config`. A resource that is switched off
    /// or fails to load is logged and left out; this never fails.
    #[must_use]
    pub fn load(config: &NlpConfig) -> Self {
        if config.segmentation == Segmentation::Naive {
            tracing::warn!("sentence model disabled, falling back to naive period splitting");
        }

        let stopwords = if config.stopwords {
            match &config.stopwords_path {
                Some(path) => match StopwordSet::from_file(path) {
                    Ok(set) => {
                        tracing::info!(path = %path.display(), words = set.len(), "stopwords loaded");
                        Some(set)
                    }
                    Err(e) => {
                        tracing::warn!("stopwords unavailable, skipping stopword filter: {e:#}");
                        None
                    }
                },
                None => Some(StopwordSet::english()),
            }
        } else {
            tracing::warn!("stopwords disabled, skipping stopword filter");
            None
        };

        let lemmatizer = if config.lemmatizer {
            Some(Lemmatizer::new())
        } else {
            tracing::warn!("lemmatizer disabled, words will not be lemmatized");
            None
        };

        let sentiment = if config.sentiment {
            Some(SentimentScorer::new())
        } else {
            tracing::warn!("sentiment lexicon disabled, sentiment will not be scored");
            None
        };

        Self {
            segmentation: config.segmentation,
            stopwords,
            lemmatizer,
            sentiment,
        }
    }

    #[must_use]
    pub fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.segmentation = segmentation;
        self
    }

    #[must_use]
    pub fn with_stopwords(mut self, stopwords: Option<StopwordSet>) -> Self {
        self.stopwords = stopwords;
        self
    }

    #[must_use]
    pub fn with_lemmatizer(mut self, lemmatizer: Option<Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    #[must_use]
    pub fn with_sentiment(mut self, sentiment: Option<SentimentScorer>) -> Self {
        self.sentiment = sentiment;
        self
    }

    #[must_use]
    pub fn segmentation(&self) -> Segmentation {
        self.segmentation
    }

    #[must_use]
    pub fn stopwords(&self) -> Option<&StopwordSet> {
        self.stopwords.as_ref()
    }

    #[must_use]
    pub fn lemmatizer(&self) -> Option<&Lemmatizer> {
        self.lemmatizer.as_ref()
    }

    #[must_use]
    pub fn sentiment(&self) -> Option<&SentimentScorer> {
        self.sentiment.as_ref()
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            sentence_model: self.segmentation == Segmentation::Unicode,
            stopwords: self.stopwords.is_some(),
            lemmatizer: self.lemmatizer.is_some(),
            sentiment: self.sentiment.is_some(),
        }
    }
}
