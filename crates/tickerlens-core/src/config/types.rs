use serde::{Deserialize, Serialize};
use tickerlens_market::MarketConfig;
use tickerlens_nlp::NlpConfig;

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8090
}

fn default_rate_limit() -> u32 {
    120
}

fn default_max_body_size() -> usize {
    1_048_576
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub nlp: NlpConfig,
    #[serde(default)]
    pub market: MarketConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            nlp: NlpConfig::default(),
            market: MarketConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bearer token required on the analysis routes when set.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Requests per minute per client IP; 0 disables limiting.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    #[serde(default = "default_true")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth_token: None,
            rate_limit: default_rate_limit(),
            max_body_size: default_max_body_size(),
            cors: true,
        }
    }
}
