use url::Url;

use crate::config::MarketConfig;
use crate::error::MarketError;
use crate::http::{build_client, fetch_bytes};
use crate::yahoo::NewsArticle;

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Tried in order; the first selector that yields any text wins.
const ARTICLE_SELECTORS: &[&str] = &["div.body", "article", "div.article__content", "p"];

const PAYWALL_MARKER: &str = "Continue Reading";
const PAYWALL_SELECTORS: &[&str] = &["a", "button", "span", "p", "div"];

/// Fetches news article pages and extracts their body text.
#[derive(Debug, Clone)]
pub struct ArticleScraper {
    client: reqwest::Client,
    max_body_bytes: usize,
    allow_private_hosts: bool,
}

impl ArticleScraper {
    #[must_use]
    pub fn new(config: &MarketConfig) -> Self {
        Self {
            client: build_client(config),
            max_body_bytes: config.max_body_bytes,
            allow_private_hosts: false,
        }
    }

    /// Permit loopback and private addresses. Intended for tests.
    #[must_use]
    pub fn allow_private_hosts(mut self, allow: bool) -> Self {
        self.allow_private_hosts = allow;
        self
    }

    /// Fetch one article and return its text.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Blocked`] or [`MarketError::InvalidUrl`] for
    /// rejected URLs, [`MarketError::Paywalled`] for paywalled pages,
    /// [`MarketError::NoContent`] when no selector yields text, or the
    /// underlying fetch error.
    pub async fn scrape(&self, url: &str) -> Result<String, MarketError> {
        validate_url(url, self.allow_private_hosts)?;
        let bytes = fetch_bytes(&self.client, url, HTML_ACCEPT, self.max_body_bytes).await?;
        let html = String::from_utf8_lossy(&bytes).into_owned();
        let url = url.to_owned();
        tokio::task::spawn_blocking(move || extract_article_text(&html, &url)).await?
    }

    /// Scrape every article, skipping failures, and join the texts with spaces.
    pub async fn scrape_all(&self, articles: &[NewsArticle]) -> String {
        let mut texts = Vec::with_capacity(articles.len());
        for article in articles {
            match self.scrape(&article.link).await {
                Ok(text) => {
                    tracing::debug!(url = %article.link, chars = text.len(), "article scraped");
                    texts.push(text);
                }
                Err(MarketError::Paywalled(url)) => {
                    tracing::info!(%url, "skipping article (paywall)");
                }
                Err(e) => {
                    tracing::warn!(url = %article.link, "article skipped: {e}");
                }
            }
        }
        texts.join(" ")
    }
}

/// Extract article text from a page.
///
/// # Errors
///
/// Returns [`MarketError::Paywalled`] if the page carries a paywall marker and
/// [`MarketError::NoContent`] if none of the article selectors match text.
pub fn extract_article_text(html: &str, url: &str) -> Result<String, MarketError> {
    let soup = scrape_core::Soup::parse(html);

    for selector in PAYWALL_SELECTORS {
        let tags = soup
            .find_all(selector)
            .map_err(|e| MarketError::Selector(format!("{selector}: {e}")))?;
        if tags.iter().any(|t| t.text().trim() == PAYWALL_MARKER) {
            return Err(MarketError::Paywalled(url.to_owned()));
        }
    }

    for selector in ARTICLE_SELECTORS {
        let tags = soup
            .find_all(selector)
            .map_err(|e| MarketError::Selector(format!("{selector}: {e}")))?;
        let text = tags
            .iter()
            .map(|t| normalize_whitespace(&t.text()))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !text.is_empty() {
            return Ok(text);
        }
    }

    Err(MarketError::NoContent(url.to_owned()))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn validate_url(raw: &str, allow_private: bool) -> Result<(), MarketError> {
    let parsed = Url::parse(raw).map_err(|e| MarketError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(MarketError::Blocked(format!(
            "scheme not allowed: {}",
            parsed.scheme()
        )));
    }

    if !allow_private
        && let Some(host) = parsed.host()
        && is_private_host(&host)
    {
        return Err(MarketError::Blocked(format!(
            "private/local host: {}",
            parsed.host_str().unwrap_or("")
        )));
    }

    Ok(())
}

fn is_private_ipv4(v4: std::net::Ipv4Addr) -> bool {
    v4.is_loopback() || v4.is_private() || v4.is_link_local() || v4.is_unspecified() || v4.is_broadcast()
}

fn is_private_host(host: &url::Host<&str>) -> bool {
    match host {
        url::Host::Domain(d) => *d == "localhost" || d.ends_with(".localhost"),
        url::Host::Ipv4(v4) => is_private_ipv4(*v4),
        url::Host::Ipv6(v6) => {
            if v6.is_loopback() || v6.is_unspecified() {
                return true;
            }
            let seg = v6.segments();
            // fe80::/10 link-local, fc00::/7 unique local
            if seg[0] & 0xffc0 == 0xfe80 || seg[0] & 0xfe00 == 0xfc00 {
                return true;
            }
            v6.to_ipv4_mapped().is_some_and(is_private_ipv4)
        }
    }
}
