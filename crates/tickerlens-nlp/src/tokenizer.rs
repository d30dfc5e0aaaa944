use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Sentence boundary strategy.
///
/// `Unicode` follows UAX #29 sentence and word boundaries. `Naive` is the
/// degraded mode used when the sentence model is unavailable: split after each
/// period and on whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segmentation {
    #[default]
    Unicode,
    Naive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

/// Output of [`tokenize`]: sentences in document order and their word tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub sentences: Vec<Sentence>,
    pub tokens: Vec<String>,
    /// Number of tokens contributed by each sentence, parallel to `sentences`.
    pub tokens_per_sentence: Vec<usize>,
}

impl Tokenized {
    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

#[must_use]
pub fn tokenize(text: &str, segmentation: Segmentation) -> Tokenized {
    let mut out = Tokenized::default();

    for (index, raw) in split_sentences(text, segmentation).into_iter().enumerate() {
        let words = split_words(raw, segmentation);
        out.tokens_per_sentence.push(words.len());
        out.tokens.extend(words);
        out.sentences.push(Sentence {
            index,
            text: raw.to_owned(),
        });
    }

    out
}

#[must_use]
pub fn split_sentences(text: &str, segmentation: Segmentation) -> Vec<&str> {
    match segmentation {
        Segmentation::Unicode => text
            .unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
        Segmentation::Naive => text
            .split_inclusive('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
    }
}

#[must_use]
pub fn split_words(sentence: &str, segmentation: Segmentation) -> Vec<String> {
    match segmentation {
        Segmentation::Unicode => sentence
            .split_word_bounds()
            .filter(|w| !w.trim().is_empty())
            .map(str::to_owned)
            .collect(),
        Segmentation::Naive => sentence.split_whitespace().map(str::to_owned).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_nothing() {
        let out = tokenize("", Segmentation::Unicode);
        assert_eq!(out.sentence_count(), 0);
        assert_eq!(out.token_count(), 0);
        assert!(out.tokens_per_sentence.is_empty());
    }

    #[test]
    fn whitespace_only_input_yields_nothing() {
        let out = tokenize("   \n\t ", Segmentation::Unicode);
        assert_eq!(out.sentence_count(), 0);
    }

    #[test]
    fn unicode_sentences_in_order() {
        let out = tokenize(
            "Apple profit rose 5%. The weather was nice.",
            Segmentation::Unicode,
        );
        let texts: Vec<&str> = out.sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["Apple profit rose 5%.", "The weather was nice."]);
        assert_eq!(out.sentences[1].index, 1);
    }

    #[test]
    fn unicode_words_split_punctuation() {
        let words = split_words("Apple profit rose 5%.", Segmentation::Unicode);
        assert_eq!(words, ["Apple", "profit", "rose", "5", "%", "."]);
    }

    #[test]
    fn tokens_per_sentence_sums_to_token_count() {
        let out = tokenize("One two. Three four five!", Segmentation::Unicode);
        assert_eq!(out.tokens_per_sentence.iter().sum::<usize>(), out.token_count());
        assert_eq!(out.tokens_per_sentence.len(), out.sentence_count());
    }

    #[test]
    fn naive_splits_after_periods() {
        let out = tokenize("Shares fell. Investors sold. ", Segmentation::Naive);
        let texts: Vec<&str> = out.sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["Shares fell.", "Investors sold."]);
        assert_eq!(out.tokens, ["Shares", "fell.", "Investors", "sold."]);
    }

    #[test]
    fn naive_keeps_trailing_fragment_without_period() {
        let sentences = split_sentences("First one. trailing words", Segmentation::Naive);
        assert_eq!(sentences, ["First one.", "trailing words"]);
    }

    #[test]
    fn segmentation_deserializes_lowercase() {
        let s: Segmentation = serde_json::from_str("\"naive\"").unwrap();
        assert_eq!(s, Segmentation::Naive);
    }
}
