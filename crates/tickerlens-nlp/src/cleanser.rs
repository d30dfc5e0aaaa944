use crate::lemmatizer::{Lemmatizer, WordClass};
use crate::stopwords::StopwordSet;
use crate::tagger::TaggedToken;

/// Turns tagged tokens into lowercased, lemmatized content words.
///
/// Either resource may be absent. Without stopwords every word passes the
/// stopword test; without a lemmatizer words are kept as lowercased.
#[derive(Debug, Clone, Copy)]
pub struct Cleanser<'a> {
    stopwords: Option<&'a StopwordSet>,
    lemmatizer: Option<&'a Lemmatizer>,
}

impl<'a> Cleanser<'a> {
    #[must_use]
    pub fn new(stopwords: Option<&'a StopwordSet>, lemmatizer: Option<&'a Lemmatizer>) -> Self {
        Self {
            stopwords,
            lemmatizer,
        }
    }

    /// Cleanse tokens in order. Duplicates are kept.
    #[must_use]
    pub fn cleanse(&self, tokens: &[TaggedToken]) -> Vec<String> {
        tokens
            .iter()
            .filter_map(|token| self.cleanse_one(token))
            .collect()
    }

    fn cleanse_one(&self, token: &TaggedToken) -> Option<String> {
        let lower = token.text.to_lowercase();
        let word = lower.trim_end_matches('.');

        if !is_word_charset(word) || word.chars().count() <= 1 {
            return None;
        }
        if self.stopwords.is_some_and(|s| s.contains(word)) {
            return None;
        }

        Some(match self.lemmatizer {
            Some(lemmatizer) => lemmatizer.lemmatize(word, WordClass::from_tag(token.tag)),
            None => word.to_owned(),
        })
    }
}

fn is_word_charset(word: &str) -> bool {
    word.chars()
        .all(|c| c.is_alphabetic() || c == '-' || c == '+')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger;

    fn tagged(words: &[&str]) -> Vec<TaggedToken> {
        let tokens: Vec<String> = words.iter().map(|w| (*w).to_owned()).collect();
        tagger::tag(&tokens)
    }

    #[test]
    fn full_resources_filter_and_lemmatize() {
        let stopwords = StopwordSet::english();
        let lemmatizer = Lemmatizer::new();
        let cleanser = Cleanser::new(Some(&stopwords), Some(&lemmatizer));

        let out = cleanser.cleanse(&tagged(&[
            "The", "companies", "reported", "higher", "profits", ".",
        ]));
        assert_eq!(out, ["company", "report", "high", "profit"]);
    }

    #[test]
    fn drops_numbers_punctuation_and_single_chars() {
        let cleanser = Cleanser::new(None, None);
        let out = cleanser.cleanse(&tagged(&["5", "%", "$", "x", "rose", "3.5"]));
        assert_eq!(out, ["rose"]);
    }

    #[test]
    fn keeps_hyphen_and_plus_words() {
        let cleanser = Cleanser::new(None, None);
        let out = cleanser.cleanse(&tagged(&["year-over-year", "c++"]));
        assert_eq!(out, ["year-over-year", "c++"]);
    }

    #[test]
    fn strips_trailing_periods() {
        let cleanser = Cleanser::new(None, None);
        let out = cleanser.cleanse(&tagged(&["Shares", "fell."]));
        assert_eq!(out, ["shares", "fell"]);
    }

    #[test]
    fn without_stopwords_common_words_survive() {
        let lemmatizer = Lemmatizer::new();
        let cleanser = Cleanser::new(None, Some(&lemmatizer));
        let out = cleanser.cleanse(&tagged(&["the", "the", "the"]));
        assert_eq!(out, ["the", "the", "the"]);
    }

    #[test]
    fn without_lemmatizer_words_pass_through() {
        let stopwords = StopwordSet::english();
        let cleanser = Cleanser::new(Some(&stopwords), None);
        let out = cleanser.cleanse(&tagged(&["Investors", "were", "selling"]));
        assert_eq!(out, ["investors", "selling"]);
    }

    #[test]
    fn duplicates_are_retained() {
        let stopwords = StopwordSet::english();
        let cleanser = Cleanser::new(Some(&stopwords), None);
        let out = cleanser.cleanse(&tagged(&["stock", "stock", "stock"]));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn only_stopwords_yields_empty() {
        let stopwords = StopwordSet::english();
        let lemmatizer = Lemmatizer::new();
        let cleanser = Cleanser::new(Some(&stopwords), Some(&lemmatizer));
        assert!(cleanser.cleanse(&tagged(&["the", "the", "the", "."])).is_empty());
    }
}
