use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use tickerlens_market::StockService;
use tickerlens_nlp::TextAnalyzer;
use tokio::sync::watch;

use crate::error::GatewayError;
use crate::router::{RouterOptions, build_router};

/// Shared handler state. Cloned per request; everything inside is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: TextAnalyzer,
    pub stocks: StockService,
    /// Served in place of live data when a stock report cannot be built.
    pub fallback: Option<Arc<serde_json::Value>>,
    pub started_at: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(analyzer: TextAnalyzer, stocks: StockService) -> Self {
        Self {
            analyzer,
            stocks,
            fallback: None,
            started_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Option<serde_json::Value>) -> Self {
        self.fallback = fallback.map(Arc::new);
        self
    }
}

pub struct GatewayServer {
    addr: SocketAddr,
    options: RouterOptions,
    state: AppState,
    shutdown_rx: watch::Receiver<bool>,
}

impl GatewayServer {
    #[must_use]
    pub fn new(bind: &str, port: u16, state: AppState, shutdown_rx: watch::Receiver<bool>) -> Self {
        let addr: SocketAddr = format!("{bind}:{port}").parse().unwrap_or_else(|e| {
            tracing::warn!("invalid bind '{bind}': {e}, falling back to 127.0.0.1:{port}");
            SocketAddr::from(([127, 0, 0, 1], port))
        });

        if bind == "0.0.0.0" {
            tracing::warn!("gateway binding to 0.0.0.0, reachable from every interface");
        }

        Self {
            addr,
            options: RouterOptions::default(),
            state,
            shutdown_rx,
        }
    }

    #[must_use]
    pub fn with_auth(mut self, token: Option<String>) -> Self {
        self.options.auth_token = token;
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, limit: u32) -> Self {
        self.options.rate_limit = limit;
        self
    }

    #[must_use]
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.options.max_body_size = size;
        self
    }

    #[must_use]
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.options.cors = enabled;
        self
    }

    /// Start the HTTP gateway server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or encounters a fatal I/O error.
    pub async fn serve(self) -> Result<(), GatewayError> {
        let router = build_router(self.state, self.options);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| GatewayError::Bind(self.addr.to_string(), e))?;
        tracing::info!("gateway listening on {}", self.addr);

        let mut shutdown_rx = self.shutdown_rx;
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            while !*shutdown_rx.borrow_and_update() {
                if shutdown_rx.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
            tracing::info!("gateway shutting down");
        })
        .await
        .map_err(|e| GatewayError::Server(format!("{e}")))?;

        Ok(())
    }
}
