//! # client::polygon
//!
//! **Polygon REST client**: ยิง GET ไปที่ Polygon ผ่าน `reqwest`
//!
//! | Operation               | Upstream path                                          |
//! |-------------------------|--------------------------------------------------------|
//! | `get_tickers`           | `/v3/reference/tickers?ticker=&search=`                |
//! | `get_tickers_by_cursor` | `/v3/reference/tickers?cursor=`                        |
//! | `get_ticker_details`    | `/v3/reference/tickers/{symbol}`                       |
//! | `get_ticker_types`      | `/v3/reference/tickers/types`                          |
//! | `get_ticker_snapshot`   | `/v2/snapshot/locale/us/markets/stocks/tickers/{symbol}` |

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use super::ReferenceDataClient;
use crate::error::AppError;
use crate::models::upstream::{
    TickerDetailResponse, TickerSnapshotResponse, TickerTypesResponse, TickersResponse,
};
use crate::models::TickersSearchConfig;

const TICKERS_PATH: [&str; 3] = ["v3", "reference", "tickers"];

#[derive(Debug, Clone)]
pub struct PolygonClient {
    http:     reqwest::Client,
    base_url: Url,
    api_key:  String,
    timeout:  Duration,
}

impl PolygonClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).context("POLYGON_BASE_URL is not a valid URL")?;
        if base_url.cannot_be_a_base() {
            bail!("POLYGON_BASE_URL cannot be used as a base URL: {base_url}");
        }

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            timeout,
        })
    }

    /// Base URL + path segments. Segments are percent-encoded, so a symbol
    /// like `BRK/A` cannot escape its slot in the path.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        debug!(url = %url, ?query, "➡️ [POLYGON] Request");

        // ── HTTP GET ──────────────────────────────────────────────────────────
        let response = self
            .http
            .get(url.clone())
            .query(query)
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "Polygon unreachable");
                AppError::UpstreamTransport(format!("Polygon unreachable: {e}"))
            })?;

        let status = response.status();
        debug!(http_status = %status, url = %url, "⬅️ [POLYGON] Response");

        // ── HTTP Status ───────────────────────────────────────────────────────
        if status.is_client_error() || status.is_server_error() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(http_status = %status, error = %e, "Failed to read Polygon error body");
                    String::new()
                }
            };
            warn!(http_status = %status, body = %body, "Polygon returned HTTP error");
            return Err(classify_error(status, body));
        }

        // ── Parse Response ────────────────────────────────────────────────────
        response.json::<T>().await.map_err(|e| {
            error!(error = %e, url = %url, "Polygon response parse failed");
            AppError::UpstreamTransport(format!("Polygon response parse error: {e}"))
        })
    }
}

/// 4xx → client error, anything else (5xx) → server error. Raw body kept for
/// diagnostics.
fn classify_error(status: StatusCode, body: String) -> AppError {
    if status.is_client_error() {
        AppError::UpstreamClient { status: status.as_u16(), body }
    } else {
        AppError::UpstreamServer { status: status.as_u16(), body }
    }
}

#[async_trait]
impl ReferenceDataClient for PolygonClient {
    async fn get_tickers(&self, config: &TickersSearchConfig) -> Result<TickersResponse, AppError> {
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(2);
        if let Some(ticker) = config.ticker.as_deref().filter(|t| !t.is_empty()) {
            query.push(("ticker", ticker));
        }
        if let Some(term) = config.search_term.as_deref().filter(|t| !t.is_empty()) {
            query.push(("search", term));
        }

        self.get_json(self.endpoint(&TICKERS_PATH), &query).await
    }

    /// `cursor` is already query-encoded, so it goes into the URL as-is
    /// instead of through `.query()`.
    async fn get_tickers_by_cursor(&self, cursor: &str) -> Result<TickersResponse, AppError> {
        let mut url = self.endpoint(&TICKERS_PATH);
        url.set_query(Some(&format!("cursor={cursor}")));
        self.get_json(url, &[]).await
    }

    async fn get_ticker_details(&self, symbol: &str) -> Result<TickerDetailResponse, AppError> {
        let url = self.endpoint(&["v3", "reference", "tickers", symbol]);
        self.get_json(url, &[]).await
    }

    async fn get_ticker_types(&self) -> Result<TickerTypesResponse, AppError> {
        let url = self.endpoint(&["v3", "reference", "tickers", "types"]);
        self.get_json(url, &[]).await
    }

    async fn get_ticker_snapshot(&self, symbol: &str) -> Result<TickerSnapshotResponse, AppError> {
        let url = self.endpoint(&[
            "v2", "snapshot", "locale", "us", "markets", "stocks", "tickers", symbol,
        ]);
        self.get_json(url, &[]).await
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
