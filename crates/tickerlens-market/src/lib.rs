//! Company stock data from Yahoo Finance, news article scraping and the
//! combined per-ticker report.

pub mod config;
pub mod error;
pub mod http;
pub mod retry;
pub mod scraper;
pub mod service;
pub mod yahoo;

pub use config::{MarketConfig, RetryConfig};
pub use error::MarketError;
pub use retry::RetryPolicy;
pub use scraper::ArticleScraper;
pub use service::{StockReport, StockService};
pub use yahoo::{BasicInfo, NewsArticle, PriceHistory, YahooClient};
