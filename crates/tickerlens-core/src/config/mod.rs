mod env;
mod types;


pub use types::*;

use std::path::Path;

use anyhow::{Context, bail};

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!("config file {} not found, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reject values the services cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }
        let canvas = &self.nlp.word_cloud;
        if canvas.width == 0 || canvas.height == 0 {
            bail!(
                "nlp.word_cloud dimensions must be non-zero, got {}x{}",
                canvas.width,
                canvas.height
            );
        }
        if self.market.retry.max_attempts == 0 {
            bail!("market.retry.max_attempts must be at least 1");
        }
        regex::Regex::new(&self.nlp.key_sentence_pattern)
            .context("nlp.key_sentence_pattern is not a valid regex")?;
        Ok(())
    }

    /// Read the JSON document served when live stock data is unavailable.
    ///
    /// Returns `Ok(None)` when `market.fallback_path` is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured file cannot be read or is not JSON.
    pub fn load_fallback(&self) -> anyhow::Result<Option<serde_json::Value>> {
        let Some(path) = &self.market.fallback_path else {
            return Ok(None);
        };
        let content = std::fs::read(path)
            .with_context(|| format!("failed to read fallback data {}", path.display()))?;
        let value = serde_json::from_slice(&content)
            .with_context(|| format!("failed to parse fallback data {}", path.display()))?;
        Ok(Some(value))
    }
}
