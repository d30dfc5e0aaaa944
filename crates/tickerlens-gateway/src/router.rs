use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{analyze_stock_handler, analyze_text_handler, health_handler};
use crate::server::AppState;

/// Middleware settings for [`build_router`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub auth_token: Option<String>,
    /// Requests per minute per client IP; 0 disables limiting.
    pub rate_limit: u32,
    pub max_body_size: usize,
    pub cors: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            auth_token: None,
            rate_limit: 120,
            max_body_size: 1_048_576,
            cors: true,
        }
    }
}

#[derive(Clone)]
struct AuthConfig {
    token: Option<String>,
}

const MAX_RATE_LIMIT_ENTRIES: usize = 10_000;
const RATE_WINDOW: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct RateLimitState {
    limit: u32,
    counters: Arc<Mutex<HashMap<IpAddr, (u32, Instant)>>>,
}

pub fn build_router(state: AppState, options: RouterOptions) -> Router {
    let auth_cfg = AuthConfig {
        token: options.auth_token,
    };
    let rate_state = RateLimitState {
        limit: options.rate_limit,
        counters: Arc::new(Mutex::new(HashMap::new())),
    };

    let protected = Router::new()
        .route("/analyze-text", post(analyze_text_handler))
        .route("/analyze-stock/{ticker}", get(analyze_stock_handler))
        .layer(middleware::from_fn_with_state(
            rate_state,
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(auth_cfg, auth_middleware))
        .layer(RequestBodyLimitLayer::new(options.max_body_size));

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(protected)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if options.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn auth_middleware(
    axum::extract::State(cfg): axum::extract::State<AuthConfig>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref expected) = cfg.token {
        let token = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or("");

        // compare fixed-length digests so timing does not leak token length
        let token_hash = blake3::hash(token.as_bytes());
        let expected_hash = blake3::hash(expected.as_bytes());
        if !bool::from(token_hash.as_bytes().ct_eq(expected_hash.as_bytes())) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    next.run(req).await
}

async fn rate_limit_middleware(
    axum::extract::State(state): axum::extract::State<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if state.limit == 0 {
        return next.run(req).await;
    }

    let ip = req
        .extensions()
        .get::<ConnectInfo<std::net::SocketAddr>>()
        .map_or(IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), |ci| ci.0.ip());

    let now = Instant::now();
    let mut counters = state.counters.lock().await;

    if counters.len() >= MAX_RATE_LIMIT_ENTRIES && !counters.contains_key(&ip) {
        counters.retain(|_, (_, ts)| now.duration_since(*ts) < RATE_WINDOW);
    }

    let entry = counters.entry(ip).or_insert((0, now));
    if now.duration_since(entry.1) >= RATE_WINDOW {
        *entry = (1, now);
    } else {
        entry.0 += 1;
        if entry.0 > state.limit {
            tracing::debug!(%ip, "rate limit exceeded");
            return StatusCode::TOO_MANY_REQUESTS.into_response();
        }
    }
    drop(counters);

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tickerlens_market::{
        ArticleScraper, MarketConfig, RetryPolicy, StockService, YahooClient,
    };
    use tickerlens_nlp::TextAnalyzer;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn stocks_at(base_url: &str) -> StockService {
        let config = MarketConfig::default();
        StockService::from_parts(
            YahooClient::new(&config)
                .with_base_url(base_url)
                .with_retry(RetryPolicy::none()),
            ArticleScraper::new(&config).allow_private_hosts(true),
            TextAnalyzer::default(),
        )
    }

    fn test_state() -> AppState {
        // unroutable base so stock lookups fail fast
        AppState::new(TextAnalyzer::default(), stocks_at("http://127.0.0.1:1"))
    }

    fn make_router(auth: Option<String>, rate_limit: u32) -> Router {
        build_router(
            test_state(),
            RouterOptions {
                auth_token: auth,
                rate_limit,
                ..RouterOptions::default()
            },
        )
    }

    fn analyze_request(body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze-text")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_returns_up() {
        let app = make_router(None, 0);
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "up");
        assert!(json["uptime_secs"].is_u64());
    }

    #[tokio::test]
    async fn analyze_text_success() {
        let app = make_router(None, 0);
        let req = analyze_request(&json!({"text": "Apple profit rose 5%. The weather was nice."}));
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["result"]["sentences"], 2);
        assert_eq!(json["result"]["keySentences"], json!(["Apple profit rose 5%."]));
        assert!(json["result"]["wordCloudImage"].is_string());
    }

    #[tokio::test]
    async fn analyze_text_missing_text() {
        for body in [json!({}), json!({"text": ""}), json!({"text": null})] {
            let app = make_router(None, 0);
            let resp = app.oneshot(analyze_request(&body)).await.unwrap();
            assert_eq!(resp.status(), 400);
            let json = body_json(resp).await;
            assert_eq!(json["success"], false);
            assert_eq!(json["message"], "No text provided to analyze.");
        }
    }

    #[tokio::test]
    async fn analyze_text_invalid_json() {
        let app = make_router(None, 0);
        let req = Request::builder()
            .method("POST")
            .uri("/analyze-text")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn analyze_stock_rejects_bad_ticker() {
        let app = make_router(None, 0);
        let req = Request::builder()
            .uri("/analyze-stock/BAD%20TICKER")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 400);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn analyze_stock_failure_serves_fallback() {
        let state = test_state().with_fallback(Some(json!({"basicInfo": {"longName": "Cached"}})));
        let app = build_router(state, RouterOptions::default());
        let req = Request::builder()
            .uri("/analyze-stock/aapl")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["ticker"], "AAPL");
        assert_eq!(
            json["message"],
            "Failed to fetch live data for AAPL, using fallback data."
        );
        assert_eq!(json["data"]["basicInfo"]["longName"], "Cached");
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn analyze_stock_failure_without_fallback() {
        let app = make_router(None, 0);
        let req = Request::builder()
            .uri("/analyze-stock/MSFT")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(req).await.unwrap()).await;
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn analyze_stock_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v10/finance/quoteSummary/IBM"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "quoteSummary": {"result": [{"price": {"longName": "IBM"}}], "error": null}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/IBM"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chart": {"result": [], "error": null}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/finance/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"news": []})))
            .mount(&server)
            .await;

        let state = AppState::new(TextAnalyzer::default(), stocks_at(&server.uri()));
        let app = build_router(state, RouterOptions::default());
        let req = Request::builder()
            .uri("/analyze-stock/ibm")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["ticker"], "IBM");
        assert_eq!(json["data"]["basicInfo"]["longName"], "IBM");
        assert_eq!(json["data"]["newsTextAnalysis"]["sentences"], 0);
    }

    #[tokio::test]
    async fn auth_rejects_missing_token() {
        let app = make_router(Some("secret".into()), 0);
        let resp = app
            .oneshot(analyze_request(&json!({"text": "hi there"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), 401);
    }

    #[tokio::test]
    async fn auth_accepts_valid_token() {
        let app = make_router(Some("secret".into()), 0);
        let mut req = analyze_request(&json!({"text": "hi there"}));
        req.headers_mut()
            .insert("authorization", "Bearer secret".parse().unwrap());
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn auth_rejects_wrong_token() {
        let app = make_router(Some("secret".into()), 0);
        let mut req = analyze_request(&json!({"text": "hi there"}));
        req.headers_mut()
            .insert("authorization", "Bearer wrong".parse().unwrap());
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 401);
    }

    #[tokio::test]
    async fn health_skips_auth() {
        let app = make_router(Some("secret".into()), 0);
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn rate_limit_enforced() {
        use tower::Service;

        let mut app = make_router(None, 2);
        let make_req = || analyze_request(&json!({"text": "Shares rose."}));

        let resp = app.call(make_req()).await.unwrap();
        assert_eq!(resp.status(), 200);
        let resp = app.call(make_req()).await.unwrap();
        assert_eq!(resp.status(), 200);
        let resp = app.call(make_req()).await.unwrap();
        assert_eq!(resp.status(), 429);
    }

    #[tokio::test]
    async fn body_size_limit() {
        let app = build_router(
            test_state(),
            RouterOptions {
                max_body_size: 64,
                ..RouterOptions::default()
            },
        );
        let oversized = json!({"text": "a".repeat(128)});
        let resp = app.oneshot(analyze_request(&oversized)).await.unwrap();
        assert_eq!(resp.status(), 413);
    }

    #[tokio::test]
    async fn cors_headers_when_enabled() {
        let app = make_router(None, 0);
        let req = Request::builder()
            .uri("/health")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.headers().contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn no_cors_headers_when_disabled() {
        let app = build_router(
            test_state(),
            RouterOptions {
                cors: false,
                ..RouterOptions::default()
            },
        );
        let req = Request::builder()
            .uri("/health")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(!resp.headers().contains_key("access-control-allow-origin"));
    }
}
