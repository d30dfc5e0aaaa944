//! HTTP client construction and size-capped body reads shared by the Yahoo
//! client and the article scraper.

use std::time::Duration;

use crate::config::MarketConfig;
use crate::error::MarketError;

/// News sites serve stripped pages to unknown agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the client used for every market request.
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialized (should never happen with rustls).
#[must_use]
pub fn build_client(config: &MarketConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(BROWSER_USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(3))
        .build()
        .expect("market HTTP client construction must not fail")
}

/// GET `url` and return the body, failing on non-success status or when the
/// body exceeds `max_body_bytes`.
pub(crate) async fn fetch_bytes(
    client: &reqwest::Client,
    url: &str,
    accept: &str,
    max_body_bytes: usize,
) -> Result<Vec<u8>, MarketError> {
    let resp = client.get(url).header("Accept", accept).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(MarketError::Status {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    if let Some(len) = resp.content_length()
        && usize::try_from(len).unwrap_or(usize::MAX) > max_body_bytes
    {
        return Err(MarketError::TooLarge {
            bytes: usize::try_from(len).unwrap_or(usize::MAX),
            max: max_body_bytes,
        });
    }

    let bytes = resp.bytes().await?;
    if bytes.len() > max_body_bytes {
        return Err(MarketError::TooLarge {
            bytes: bytes.len(),
            max: max_body_bytes,
        });
    }
    Ok(bytes.to_vec())
}
