use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

/// VADER polarity scores for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SentimentReport {
    Scored(PolarityScores),
    /// The sentiment lexicon was not loaded.
    Disabled,
}

impl SentimentReport {
    #[must_use]
    pub fn scores(&self) -> Option<&PolarityScores> {
        match self {
            Self::Scored(scores) => Some(scores),
            Self::Disabled => None,
        }
    }
}

pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl std::fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentScorer").finish_non_exhaustive()
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Score the full text. Whitespace-only input scores all zeros.
    #[must_use]
    pub fn score(&self, text: &str) -> PolarityScores {
        if text.trim().is_empty() {
            return PolarityScores::default();
        }

        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        PolarityScores {
            neg: get("neg"),
            neu: get("neu"),
            pos: get("pos"),
            compound: get("compound"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_scores_zero() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score(""), PolarityScores::default());
        assert_eq!(scorer.score("  \n "), PolarityScores::default());
    }

    #[test]
    fn positive_text_has_positive_compound() {
        let scorer = SentimentScorer::new();
        let scores = scorer.score("The results were great and investors are very happy.");
        assert!(scores.compound > 0.0);
        assert!(scores.pos > scores.neg);
    }

    #[test]
    fn negative_text_has_negative_compound() {
        let scorer = SentimentScorer::new();
        let scores = scorer.score("The quarter was terrible and the outlook is awful.");
        assert!(scores.compound < 0.0);
        assert!(scores.neg > scores.pos);
    }

    #[test]
    fn scores_stay_in_range() {
        let scorer = SentimentScorer::new();
        let s = scorer.score("Shares rose sharply after a strong earnings beat.");
        assert!((-1.0..=1.0).contains(&s.compound));
        for p in [s.neg, s.neu, s.pos] {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn report_serializes_with_status_tag() {
        let scored = SentimentReport::Scored(PolarityScores {
            neg: 0.0,
            neu: 1.0,
            pos: 0.0,
            compound: 0.0,
        });
        let json = serde_json::to_value(scored).unwrap();
        assert_eq!(json["status"], "scored");
        assert_eq!(json["neu"], 1.0);

        let disabled = serde_json::to_value(SentimentReport::Disabled).unwrap();
        assert_eq!(disabled, serde_json::json!({"status": "disabled"}));
    }

    #[test]
    fn scores_accessor() {
        assert!(SentimentReport::Disabled.scores().is_none());
        let report = SentimentReport::Scored(PolarityScores::default());
        assert_eq!(report.scores(), Some(&PolarityScores::default()));
    }
}
