use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::server::AppState;

const MAX_TICKER_LEN: usize = 12;

#[derive(serde::Deserialize)]
pub(crate) struct AnalyzeTextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    uptime_secs: u64,
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "up",
        message: "tickerlens gateway is running",
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "message": message})),
    )
        .into_response()
}

pub(crate) async fn analyze_text_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let text = serde_json::from_slice::<AnalyzeTextRequest>(&body)
        .ok()
        .and_then(|req| req.text)
        .filter(|t| !t.is_empty());
    let Some(text) = text else {
        return bad_request("No text provided to analyze.");
    };

    let analyzer = state.analyzer.clone();
    match tokio::task::spawn_blocking(move || analyzer.analyze(&text)).await {
        Ok(result) => Json(json!({"success": true, "result": result})).into_response(),
        Err(e) => {
            tracing::error!("text analysis task failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Text analysis failed.",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Trim and uppercase; `None` when empty, too long, or containing characters
/// outside `A-Z 0-9 . ^ = -`.
pub(crate) fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim().to_uppercase();
    let valid = !ticker.is_empty()
        && ticker.len() <= MAX_TICKER_LEN
        && ticker
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '^' | '=' | '-'));
    valid.then_some(ticker)
}

pub(crate) async fn analyze_stock_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Response {
    if raw.trim().is_empty() {
        return bad_request("No ticker provided");
    }
    let Some(ticker) = normalize_ticker(&raw) else {
        return bad_request("Invalid ticker symbol");
    };

    match state.stocks.report(&ticker).await {
        Ok(report) => Json(json!({
            "success": true,
            "ticker": ticker,
            "data": report,
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(%ticker, "stock report failed: {e}");
            Json(json!({
                "success": false,
                "ticker": ticker,
                "message": format!("Failed to fetch live data for {ticker}, using fallback data."),
                "data": state.fallback.as_deref(),
                "error": e.to_string(),
            }))
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "up",
            message: "tickerlens gateway is running",
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"up\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }

    #[test]
    fn analyze_request_deserializes() {
        let req: AnalyzeTextRequest = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(req.text.as_deref(), Some("hello"));
        let req: AnalyzeTextRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_none());
    }

    #[test]
    fn tickers_normalized() {
        assert_eq!(normalize_ticker(" aapl ").as_deref(), Some("AAPL"));
        assert_eq!(normalize_ticker("brk.b").as_deref(), Some("BRK.B"));
        assert_eq!(normalize_ticker("^gspc").as_deref(), Some("^GSPC"));
        assert_eq!(normalize_ticker("eurusd=x").as_deref(), Some("EURUSD=X"));
    }

    #[test]
    fn invalid_tickers_rejected() {
        assert!(normalize_ticker("").is_none());
        assert!(normalize_ticker("   ").is_none());
        assert!(normalize_ticker("AA PL").is_none());
        assert!(normalize_ticker("../etc").is_none());
        assert!(normalize_ticker("ABCDEFGHIJKLM").is_none());
    }
}
