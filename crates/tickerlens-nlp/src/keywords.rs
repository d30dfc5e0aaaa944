use regex::{Regex, RegexBuilder};

use crate::tokenizer::Sentence;

/// Default pattern for finance-relevant sentences: digits, currency and
/// percent symbols, magnitude words and common reporting terms.
pub const DEFAULT_KEY_SENTENCE_PATTERN: &str = r"\d|[$€£¥%]|\b(?:thousand|million|billion|trillion)s?\b|\b(?:profit|loss|revenue|earning|dividend|eps|income|debt)(?:s|es)?\b";

#[derive(Debug, Clone)]
pub struct KeySentenceExtractor {
    pattern: Regex,
}

impl Default for KeySentenceExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_SENTENCE_PATTERN).expect("default key sentence pattern compiles")
    }
}

impl KeySentenceExtractor {
    /// Compile a case-insensitive extractor.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern })
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    #[must_use]
    pub fn is_key(&self, sentence: &str) -> bool {
        self.pattern.is_match(&sentence.to_lowercase())
    }

    /// Sentences that match, in document order.
    #[must_use]
    pub fn extract(&self, sentences: &[Sentence]) -> Vec<String> {
        sentences
            .iter()
            .filter(|s| self.is_key(&s.text))
            .map(|s| s.text.clone())
            .collect()
    }
}
