use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::MarketConfig;
use crate::error::MarketError;
use crate::http::{build_client, fetch_bytes};
use crate::retry::RetryPolicy;

const SUMMARY_MODULES: &str =
    "assetProfile,price,financialData,defaultKeyStatistics,calendarEvents";

/// Company profile fields. Missing text is `""`, missing figures are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub long_name: String,
    pub sector: String,
    pub website: String,
    pub full_time_employees: Option<u64>,
    pub market_cap: Option<f64>,
    pub total_revenue: Option<f64>,
    pub trailing_eps: Option<f64>,
}

/// Daily opening prices for the last twelve months, parallel to `date`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub price: Vec<f64>,
    pub date: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct Raw<T> {
    raw: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ResultList<T> {
    result: Option<Vec<T>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryEnvelope {
    quote_summary: ResultList<QuoteSummary>,
}

/// Decoded `quoteSummary` result.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    asset_profile: Option<AssetProfile>,
    price: Option<PriceModule>,
    financial_data: Option<FinancialData>,
    default_key_statistics: Option<KeyStatistics>,
    calendar_events: Option<CalendarEvents>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetProfile {
    sector: Option<String>,
    website: Option<String>,
    full_time_employees: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    long_name: Option<String>,
    market_cap: Option<Raw<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    total_revenue: Option<Raw<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    trailing_eps: Option<Raw<f64>>,
}

#[derive(Debug, Deserialize)]
struct CalendarEvents {
    earnings: Option<EarningsEvents>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EarningsEvents {
    #[serde(default)]
    earnings_date: Vec<Raw<i64>>,
}

impl QuoteSummary {
    #[must_use]
    pub fn basic_info(&self) -> BasicInfo {
        let profile = self.asset_profile.as_ref();
        let price = self.price.as_ref();
        BasicInfo {
            long_name: price
                .and_then(|p| p.long_name.clone())
                .unwrap_or_default(),
            sector: profile.and_then(|p| p.sector.clone()).unwrap_or_default(),
            website: profile.and_then(|p| p.website.clone()).unwrap_or_default(),
            full_time_employees: profile.and_then(|p| p.full_time_employees),
            market_cap: price
                .and_then(|p| p.market_cap.as_ref())
                .and_then(|r| r.raw),
            total_revenue: self
                .financial_data
                .as_ref()
                .and_then(|f| f.total_revenue.as_ref())
                .and_then(|r| r.raw),
            trailing_eps: self
                .default_key_statistics
                .as_ref()
                .and_then(|k| k.trailing_eps.as_ref())
                .and_then(|r| r.raw),
        }
    }

    /// Earnings dates strictly after `today`, ascending, as `YYYY-MM-DD`.
    #[must_use]
    pub fn future_earnings_dates(&self, today: NaiveDate) -> Vec<String> {
        let mut dates: Vec<NaiveDate> = self
            .calendar_events
            .as_ref()
            .and_then(|c| c.earnings.as_ref())
            .map(|e| e.earnings_date.iter().filter_map(|d| d.raw).collect::<Vec<_>>())
            .unwrap_or_default()
            .into_iter()
            .filter_map(timestamp_to_date)
            .filter(|d| *d > today)
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates.into_iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ResultList<ChartResult>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    open: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<SearchNews>,
}

#[derive(Debug, Deserialize)]
struct SearchNews {
    title: Option<String>,
    link: Option<String>,
}

fn timestamp_to_date(ts: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

/// Client for the public Yahoo Finance JSON endpoints.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
    max_body_bytes: usize,
    news_limit: usize,
    retry: RetryPolicy,
}

impl YahooClient {
    #[must_use]
    pub fn new(config: &MarketConfig) -> Self {
        Self {
            client: build_client(config),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            max_body_bytes: config.max_body_bytes,
            news_limit: config.news_limit,
            retry: RetryPolicy::from(config.retry),
        }
    }

    /// Override the API base URL. Intended for tests.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, MarketError> {
        let raw = format!("{}{path}", self.base_url);
        Url::parse_with_params(&raw, query).map_err(|e| MarketError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, MarketError> {
        let client = &self.client;
        let max = self.max_body_bytes;
        let body = self
            .retry
            .run(url.path(), move || {
                fetch_bytes(client, url.as_str(), "application/json", max)
            })
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the quote summary used for the profile and earnings calendar.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::UnknownTicker`] when Yahoo has no quote for
    /// `ticker`, or the underlying request/parse error.
    pub async fn quote_summary(&self, ticker: &str) -> Result<QuoteSummary, MarketError> {
        let url = self.endpoint(
            &format!("/v10/finance/quoteSummary/{ticker}"),
            &[("modules", SUMMARY_MODULES)],
        )?;
        let envelope: SummaryEnvelope = match self.get_json(&url).await {
            Ok(v) => v,
            Err(MarketError::Status { status: 404, .. }) => {
                return Err(MarketError::UnknownTicker(ticker.to_owned()));
            }
            Err(e) => return Err(e),
        };

        if let Some(err) = envelope.quote_summary.error {
            tracing::warn!(
                ticker,
                "quote summary error: {}",
                err.description.unwrap_or_default()
            );
        }
        envelope
            .quote_summary
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| MarketError::UnknownTicker(ticker.to_owned()))
    }

    /// # Errors
    ///
    /// Returns [`MarketError::UnknownTicker`] if the company has no name.
    pub async fn basic_info(&self, ticker: &str) -> Result<BasicInfo, MarketError> {
        let info = self.quote_summary(ticker).await?.basic_info();
        if info.long_name.is_empty() {
            return Err(MarketError::UnknownTicker(ticker.to_owned()));
        }
        Ok(info)
    }

    /// # Errors
    ///
    /// Returns the underlying request or parse error.
    pub async fn future_earnings_dates(&self, ticker: &str) -> Result<Vec<String>, MarketError> {
        let today = Utc::now().date_naive();
        Ok(self.quote_summary(ticker).await?.future_earnings_dates(today))
    }

    /// Twelve months of daily opening prices. Days without an open are skipped.
    ///
    /// # Errors
    ///
    /// Returns the underlying request or parse error.
    pub async fn price_history(&self, ticker: &str) -> Result<PriceHistory, MarketError> {
        let url = self.endpoint(
            &format!("/v8/finance/chart/{ticker}"),
            &[("range", "1y"), ("interval", "1d")],
        )?;
        let envelope: ChartEnvelope = self.get_json(&url).await?;
        let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(PriceHistory::default());
        };

        let opens = result
            .indicators
            .and_then(|i| i.quote.into_iter().next())
            .map(|q| q.open)
            .unwrap_or_default();

        let mut history = PriceHistory::default();
        for (ts, open) in result.timestamp.into_iter().zip(opens) {
            if let (Some(open), Some(date)) = (open, timestamp_to_date(ts)) {
                history.price.push(open);
                history.date.push(date.format("%Y-%m-%d").to_string());
            }
        }
        Ok(history)
    }

    /// Recent headlines for `ticker`, at most `news_limit`.
    ///
    /// # Errors
    ///
    /// Returns the underlying request or parse error.
    pub async fn news(&self, ticker: &str) -> Result<Vec<NewsArticle>, MarketError> {
        let limit = self.news_limit.to_string();
        let url = self.endpoint(
            "/v1/finance/search",
            &[("q", ticker), ("quotesCount", "0"), ("newsCount", limit.as_str())],
        )?;
        let response: SearchResponse = self.get_json(&url).await?;
        Ok(response
            .news
            .into_iter()
            .filter_map(|n| {
                Some(NewsArticle {
                    title: n.title?,
                    link: n.link?,
                })
            })
            .take(self.news_limit)
            .collect())
    }
}
