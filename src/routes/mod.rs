//! HTTP surface: route table + middleware stack.

pub mod tickers;

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{require_api_key, ApiKey};
use crate::state::SharedState;
use tickers::{
    get_ticker_detail, get_ticker_snapshot, get_ticker_types, get_tickers,
    get_tickers_by_cursor, register_tickers,
};

// ─── GET /health ──────────────────────────────────────────────────────────────

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

pub fn build_router(state: SharedState, api_key: ApiKey) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Ticker Search ─────────────────────────────────────────────────────
        .route("/api/tickers",                  get(get_tickers))
        .route("/api/tickers/cursor/:cursor",   get(get_tickers_by_cursor))
        .route("/api/tickers/types",            get(get_ticker_types))
        // ── Ticker Detail ─────────────────────────────────────────────────────
        .route("/api/tickers/register",         post(register_tickers))
        .route("/api/tickers/:symbol",          get(get_ticker_detail))
        .route("/api/tickers/:symbol/snapshot", get(get_ticker_snapshot))
        // ── Liveness ──────────────────────────────────────────────────────────
        .route("/health",                       get(health_check))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(middleware::from_fn_with_state(api_key, require_api_key))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::client::ReferenceDataClient;
    use crate::error::AppError;
    use crate::models::upstream::{
        ResultsEnvelope, TickerDetailResponse, TickerDetailResult, TickerSnapshotResponse,
        TickerTypesResponse, TickersResponse,
    };
    use crate::models::{TickerDetail, TickersSearchConfig};
    use crate::service::ReferenceDataService;
    use crate::state::AppState;
    use crate::store::{MemoryTickerDetailStore, TickerDetailStore};

    /// Polygon ปลอม: รู้จักแค่ AAPL, MSFT ตอบ 500
    struct StubClient;

    #[async_trait]
    impl ReferenceDataClient for StubClient {
        async fn get_tickers(&self, config: &TickersSearchConfig) -> Result<TickersResponse, AppError> {
            assert_eq!(config.search_term.as_deref(), Some("apple inc"));
            Ok(ResultsEnvelope {
                results: Some(vec![]),
                next_url: Some("https://api.polygon.io/v3/reference/tickers?cursor=PAGE2".into()),
                status: Some("OK".into()),
            })
        }

        async fn get_tickers_by_cursor(&self, _cursor: &str) -> Result<TickersResponse, AppError> {
            Ok(ResultsEnvelope { results: Some(vec![]), next_url: None, status: None })
        }

        async fn get_ticker_details(&self, symbol: &str) -> Result<TickerDetailResponse, AppError> {
            match symbol {
                "AAPL" => Ok(ResultsEnvelope {
                    results: Some(TickerDetailResult {
                        symbol: "AAPL".into(),
                        name: Some("Apple Inc.".into()),
                        market: None,
                        primary_exchange: None,
                        currency_name: None,
                        ticker_type: None,
                        description: None,
                        market_cap: None,
                        homepage_url: None,
                        total_employees: None,
                        list_date: None,
                        share_class_shares_outstanding: None,
                        weighted_shares_outstanding: None,
                    }),
                    next_url: None,
                    status: Some("OK".into()),
                }),
                "MSFT" => Err(AppError::UpstreamServer { status: 500, body: "oops".into() }),
                _ => Ok(ResultsEnvelope { results: None, next_url: None, status: Some("OK".into()) }),
            }
        }

        async fn get_ticker_types(&self) -> Result<TickerTypesResponse, AppError> {
            Ok(ResultsEnvelope { results: None, next_url: None, status: None })
        }

        async fn get_ticker_snapshot(&self, _symbol: &str) -> Result<TickerSnapshotResponse, AppError> {
            Ok(TickerSnapshotResponse { ticker: None, status: None })
        }
    }

    fn make_app(store: Arc<MemoryTickerDetailStore>, api_key: Option<&str>) -> Router {
        let service = ReferenceDataService::new(Arc::new(StubClient), store, 2);
        let state = Arc::new(AppState::new(service));
        build_router(state, ApiKey(api_key.map(str::to_string)))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_next_cursor() {
        let app = make_app(Arc::new(MemoryTickerDetailStore::new()), None);
        let (status, body) = send(app, get_req("/api/tickers?search-term=apple%20inc")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["nextCursor"], "PAGE2");
        assert_eq!(body["results"], json!([]));
    }

    #[tokio::test]
    async fn test_types_route_not_shadowed_by_symbol() {
        let app = make_app(Arc::new(MemoryTickerDetailStore::new()), None);
        let (status, body) = send(app, get_req("/api/tickers/types")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "results": [] }));
    }

    #[tokio::test]
    async fn test_detail_from_store_and_not_found() {
        let store = Arc::new(MemoryTickerDetailStore::new());
        let mut cached = TickerDetail::bare("TSLA");
        cached.name = Some("Tesla, Inc.".into());
        store.save(cached).await.unwrap();

        let (status, body) = send(make_app(store.clone(), None), get_req("/api/tickers/tsla")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["symbol"], "TSLA");
        assert_eq!(body["result"]["name"], "Tesla, Inc.");

        let (status, body) = send(make_app(store, None), get_req("/api/tickers/ZZZZ")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_register_reports_failures() {
        let store = Arc::new(MemoryTickerDetailStore::new());
        let request = Request::builder()
            .method("POST")
            .uri("/api/tickers/register")
            .header("content-type", "application/json")
            .body(Body::from(r#"{ "symbols": ["aapl", "MSFT"] }"#))
            .unwrap();

        let (status, body) = send(make_app(store.clone(), None), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["registered"], json!(["AAPL"]));
        assert!(body["failed"]["MSFT"].as_str().unwrap().contains("500"));
        assert_eq!(body["ok"], false);
        assert!(store.find_by_symbol("AAPL").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_register_rejects_empty_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/tickers/register")
            .header("content-type", "application/json")
            .body(Body::from(r#"{ "symbols": [] }"#))
            .unwrap();

        let (status, _) = send(make_app(Arc::new(MemoryTickerDetailStore::new()), None), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_key_guard() {
        let store = Arc::new(MemoryTickerDetailStore::new());

        let (status, _) = send(make_app(store.clone(), Some("secret")), get_req("/api/tickers/types")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(make_app(store.clone(), Some("secret")), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::builder()
            .uri("/api/tickers/types")
            .header("X-API-Key", "secret")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(make_app(store, Some("secret")), request).await;
        assert_eq!(status, StatusCode::OK);
    }
}
