use chrono::Utc;
use serde::{Deserialize, Serialize};
use tickerlens_nlp::{AnalysisResult, TextAnalyzer};

use crate::config::MarketConfig;
use crate::error::MarketError;
use crate::scraper::ArticleScraper;
use crate::yahoo::{BasicInfo, NewsArticle, PriceHistory, YahooClient};

/// Everything known about one ticker, including analysis of its news text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub basic_info: BasicInfo,
    pub price_history: PriceHistory,
    pub future_earnings_dates: Vec<String>,
    pub news_articles: Vec<NewsArticle>,
    pub news_text_analysis: AnalysisResult,
}

#[derive(Debug, Clone)]
pub struct StockService {
    yahoo: YahooClient,
    scraper: ArticleScraper,
    analyzer: TextAnalyzer,
}

impl StockService {
    #[must_use]
    pub fn new(config: &MarketConfig, analyzer: TextAnalyzer) -> Self {
        Self {
            yahoo: YahooClient::new(config),
            scraper: ArticleScraper::new(config),
            analyzer,
        }
    }

    #[must_use]
    pub fn from_parts(yahoo: YahooClient, scraper: ArticleScraper, analyzer: TextAnalyzer) -> Self {
        Self {
            yahoo,
            scraper,
            analyzer,
        }
    }

    /// Build the full report for `ticker`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::UnknownTicker`] if the company has no name, or
    /// the first failing Yahoo request. Individual article failures are
    /// skipped.
    pub async fn report(&self, ticker: &str) -> Result<StockReport, MarketError> {
        let summary = self.yahoo.quote_summary(ticker).await?;
        let basic_info = summary.basic_info();
        if basic_info.long_name.is_empty() {
            return Err(MarketError::UnknownTicker(ticker.to_owned()));
        }

        let price_history = self.yahoo.price_history(ticker).await?;
        let future_earnings_dates = summary.future_earnings_dates(Utc::now().date_naive());
        let news_articles = self.yahoo.news(ticker).await?;

        let text = self.scraper.scrape_all(&news_articles).await;
        let analyzer = self.analyzer.clone();
        let news_text_analysis = tokio::task::spawn_blocking(move || analyzer.analyze(&text)).await?;

        tracing::info!(
            ticker,
            prices = price_history.price.len(),
            articles = news_articles.len(),
            "stock report built"
        );

        Ok(StockReport {
            basic_info,
            price_history,
            future_earnings_dates,
            news_articles,
            news_text_analysis,
        })
    }
}
