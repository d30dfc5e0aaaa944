use std::path::PathBuf;

use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_server();
        self.apply_env_overrides_nlp();
        self.apply_env_overrides_market();
    }

    fn apply_env_overrides_server(&mut self) {
        if let Ok(v) = std::env::var("TICKERLENS_LOG_LEVEL") {
            self.log_level = v;
        }
        if let Ok(v) = std::env::var("TICKERLENS_SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = std::env::var("TICKERLENS_SERVER_PORT") {
            if let Ok(port) = v.parse::<u16>() {
                self.server.port = port;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_SERVER_PORT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TICKERLENS_SERVER_AUTH_TOKEN") {
            self.server.auth_token = (!v.is_empty()).then_some(v);
        }
        if let Ok(v) = std::env::var("TICKERLENS_SERVER_RATE_LIMIT") {
            if let Ok(limit) = v.parse::<u32>() {
                self.server.rate_limit = limit;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_SERVER_RATE_LIMIT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TICKERLENS_SERVER_MAX_BODY_SIZE") {
            if let Ok(size) = v.parse::<usize>() {
                self.server.max_body_size = size;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_SERVER_MAX_BODY_SIZE value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TICKERLENS_SERVER_CORS") {
            if let Ok(enabled) = v.parse::<bool>() {
                self.server.cors = enabled;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_SERVER_CORS value: {v}");
            }
        }
    }

    fn apply_env_overrides_nlp(&mut self) {
        if let Ok(v) = std::env::var("TICKERLENS_NLP_SEGMENTATION") {
            if let Ok(mode) = serde_json::from_value(serde_json::Value::String(v.to_lowercase())) {
                self.nlp.segmentation = mode;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_NLP_SEGMENTATION value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TICKERLENS_NLP_STOPWORDS") {
            if let Ok(enabled) = v.parse::<bool>() {
                self.nlp.stopwords = enabled;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_NLP_STOPWORDS value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TICKERLENS_NLP_STOPWORDS_PATH") {
            self.nlp.stopwords_path = (!v.is_empty()).then(|| PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("TICKERLENS_NLP_LEMMATIZER") {
            if let Ok(enabled) = v.parse::<bool>() {
                self.nlp.lemmatizer = enabled;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_NLP_LEMMATIZER value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TICKERLENS_NLP_SENTIMENT") {
            if let Ok(enabled) = v.parse::<bool>() {
                self.nlp.sentiment = enabled;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_NLP_SENTIMENT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TICKERLENS_NLP_KEY_SENTENCE_PATTERN") {
            self.nlp.key_sentence_pattern = v;
        }
        if let Ok(v) = std::env::var("TICKERLENS_WORD_CLOUD_WIDTH")
            && let Ok(width) = v.parse::<u32>()
        {
            self.nlp.word_cloud.width = width;
        }
        if let Ok(v) = std::env::var("TICKERLENS_WORD_CLOUD_HEIGHT")
            && let Ok(height) = v.parse::<u32>()
        {
            self.nlp.word_cloud.height = height;
        }
        if let Ok(v) = std::env::var("TICKERLENS_WORD_CLOUD_MAX_WORDS")
            && let Ok(max) = v.parse::<usize>()
        {
            self.nlp.word_cloud.max_words = max;
        }
        if let Ok(v) = std::env::var("TICKERLENS_WORD_CLOUD_BACKGROUND") {
            self.nlp.word_cloud.background = v;
        }
    }

    fn apply_env_overrides_market(&mut self) {
        if let Ok(v) = std::env::var("TICKERLENS_MARKET_BASE_URL") {
            self.market.base_url = v;
        }
        if let Ok(v) = std::env::var("TICKERLENS_MARKET_TIMEOUT") {
            if let Ok(secs) = v.parse::<u64>() {
                self.market.timeout = secs;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_MARKET_TIMEOUT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TICKERLENS_MARKET_NEWS_LIMIT") {
            if let Ok(limit) = v.parse::<usize>() {
                self.market.news_limit = limit;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_MARKET_NEWS_LIMIT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TICKERLENS_MARKET_FALLBACK_PATH") {
            self.market.fallback_path = (!v.is_empty()).then(|| PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("TICKERLENS_MARKET_RETRY_ATTEMPTS") {
            if let Ok(attempts) = v.parse::<u32>() {
                self.market.retry.max_attempts = attempts;
            } else {
                tracing::warn!("ignoring invalid TICKERLENS_MARKET_RETRY_ATTEMPTS value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TICKERLENS_MARKET_RETRY_BACKOFF_MS")
            && let Ok(ms) = v.parse::<u64>()
        {
            self.market.retry.backoff_ms = ms;
        }
    }
}
