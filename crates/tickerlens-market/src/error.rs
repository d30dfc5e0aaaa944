use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("response too large: {bytes} bytes (max: {max})")]
    TooLarge { bytes: usize, max: usize },

    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("blocked URL: {0}")]
    Blocked(String),

    #[error("could not find stock info for {0}, ticker may be delisted or does not exist")]
    UnknownTicker(String),

    #[error("article is behind a paywall: {0}")]
    Paywalled(String),

    #[error("no article text found at {0}")]
    NoContent(String),

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl MarketError {
    /// Whether a retry may succeed: transport failures, 429 and 5xx.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_transience() {
        let status = |status| MarketError::Status {
            status,
            url: "http://x".into(),
        };
        assert!(status(429).is_transient());
        assert!(status(503).is_transient());
        assert!(!status(404).is_transient());
        assert!(!MarketError::UnknownTicker("ZZZZ".into()).is_transient());
    }

    #[test]
    fn unknown_ticker_message() {
        let err = MarketError::UnknownTicker("ZZZZ".into());
        assert_eq!(
            err.to_string(),
            "could not find stock info for ZZZZ, ticker may be delisted or does not exist"
        );
    }
}
