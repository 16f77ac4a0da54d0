//! # service: Reference Data Service
//!
//! The core of the backend: reshapes upstream responses into our DTOs and
//! runs the **read-through** path for ticker details.
//!
//! ```text
//!  get_ticker_detail(sym)            get_and_save_ticker_detail(sym)
//!        │                                   │
//!        ├─ store.find_by_symbol ── hit ──▶ return
//!        │        │ Err ──▶ AppError::Repository (no fallback!)
//!        │        ▼ None
//!        ├─ client.get_ticker_details
//!        │        │ results = null ──▶ AppError::TickerNotFound
//!        │        ▼
//!        └─ return               store.save ──▶ return
//! ```
//!
//! Only a genuine `None` from the store falls through to Polygon. A store
//! error is propagated as-is, wrapped with the symbol.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures_util::{stream, StreamExt};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::client::ReferenceDataClient;
use crate::error::AppError;
use crate::models::upstream::TickersResponse;
use crate::models::{
    TickerDetail, TickerDetailDto, TickerSnapshot, TickerTypesDto, TickersDto,
    TickersSearchConfig,
};
use crate::store::TickerDetailStore;

// ─── Registration Outcome ─────────────────────────────────────────────────────

/// Per-symbol result of a bulk registration.
#[derive(Debug, Default)]
pub struct RegistrationOutcome {
    /// Symbols now present in the store.
    pub registered: HashSet<String>,
    /// Symbols that failed, with the error that stopped them.
    pub failed: HashMap<String, AppError>,
}

// ─── ReferenceDataService ─────────────────────────────────────────────────────

pub struct ReferenceDataService {
    client: Arc<dyn ReferenceDataClient>,
    store: Arc<dyn TickerDetailStore>,
    /// Max symbols in flight during `register_tickers`.
    register_concurrency: usize,
}

impl ReferenceDataService {
    pub fn new(
        client: Arc<dyn ReferenceDataClient>,
        store: Arc<dyn TickerDetailStore>,
        register_concurrency: usize,
    ) -> Self {
        Self {
            client,
            store,
            register_concurrency: register_concurrency.max(1),
        }
    }

    // ── Search ────────────────────────────────────────────────────────────────

    pub async fn get_tickers(&self, config: &TickersSearchConfig) -> Result<TickersDto, AppError> {
        let response = self.client.get_tickers(config).await?;
        Ok(into_tickers_dto(response))
    }

    /// `cursor` goes upstream verbatim: we never look inside it.
    pub async fn get_tickers_by_cursor(&self, cursor: &str) -> Result<TickersDto, AppError> {
        let response = self.client.get_tickers_by_cursor(cursor).await?;
        Ok(into_tickers_dto(response))
    }

    pub async fn get_ticker_types(&self) -> Result<TickerTypesDto, AppError> {
        let response = self.client.get_ticker_types().await?;
        Ok(TickerTypesDto {
            results: response.results.unwrap_or_default(),
        })
    }

    pub async fn get_ticker_snapshot(&self, symbol: &str) -> Result<TickerSnapshot, AppError> {
        let response = self.client.get_ticker_snapshot(symbol).await?;
        response.ticker.ok_or_else(|| {
            warn!(symbol, status = ?response.status, "No snapshot returned from client");
            AppError::TickerNotFound(symbol.to_string())
        })
    }

    // ── Ticker Detail: building blocks ────────────────────────────────────────

    /// Store lookup. `Ok(None)` = not cached; `Err` = the store is broken.
    pub async fn get_ticker_detail_by_symbol(
        &self,
        symbol: &str,
    ) -> Result<Option<TickerDetail>, AppError> {
        self.store.find_by_symbol(symbol).await.map_err(|source| {
            error!(symbol, error = %source, "Error fetching ticker detail from store");
            AppError::Repository {
                symbol: symbol.to_string(),
                source,
            }
        })
    }

    /// Polygon lookup. A `null` results body means Polygon does not know the
    /// symbol.
    pub async fn get_ticker_detail_from_client(&self, symbol: &str) -> Result<TickerDetail, AppError> {
        let response = self.client.get_ticker_details(symbol).await?;

        match response.results {
            Some(result) => Ok(TickerDetail::from(result)),
            None => {
                warn!(symbol, status = ?response.status, "No ticker detail found from client");
                Err(AppError::TickerNotFound(symbol.to_string()))
            }
        }
    }

    async fn save_ticker_detail(&self, detail: TickerDetail) -> Result<TickerDetail, AppError> {
        let symbol = detail.symbol.clone();
        self.store.save(detail).await.map_err(|source| {
            error!(symbol = %symbol, error = %source, "Error saving ticker detail");
            AppError::Repository { symbol, source }
        })
    }

    // ── Ticker Detail: read-through ───────────────────────────────────────────

    /// Store first, then Polygon. Never writes.
    pub async fn get_ticker_detail(&self, symbol: &str) -> Result<TickerDetailDto, AppError> {
        let result = match self.get_ticker_detail_by_symbol(symbol).await? {
            Some(cached) => cached,
            None => self.get_ticker_detail_from_client(symbol).await?,
        };

        Ok(TickerDetailDto { result })
    }

    /// Store first, then Polygon: and on a miss, persist what Polygon returned.
    pub async fn get_and_save_ticker_detail(&self, symbol: &str) -> Result<TickerDetail, AppError> {
        if let Some(cached) = self.get_ticker_detail_by_symbol(symbol).await? {
            debug!(symbol, "ticker detail cache hit");
            return Ok(cached);
        }

        let fetched = self.get_ticker_detail_from_client(symbol).await?;
        let saved = self.save_ticker_detail(fetched).await?;
        info!(symbol = %saved.symbol, "💾 Ticker detail cached");
        Ok(saved)
    }

    // ── Bulk Registration ─────────────────────────────────────────────────────

    /// Register every symbol; failures are silently left out of the result.
    pub async fn register_tickers(&self, symbols: HashSet<String>) -> HashSet<String> {
        self.register_tickers_detailed(symbols).await.registered
    }

    /// Same as [`Self::register_tickers`] but hands back the failures too.
    ///
    /// Each symbol is an independent unit of work; one failing never stops the
    /// others. Up to `register_concurrency` run at once, in no particular order.
    pub async fn register_tickers_detailed(&self, symbols: HashSet<String>) -> RegistrationOutcome {
        let requested = symbols.len();

        let results: Vec<(String, Result<TickerDetail, AppError>)> = stream::iter(symbols)
            .map(|symbol| async move {
                let outcome = self.get_and_save_ticker_detail(&symbol).await;
                (symbol, outcome)
            })
            .buffer_unordered(self.register_concurrency)
            .collect()
            .await;

        let mut outcome = RegistrationOutcome::default();
        for (symbol, result) in results {
            match result {
                Ok(detail) => {
                    outcome.registered.insert(detail.symbol);
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Ticker registration failed");
                    outcome.failed.insert(symbol, e);
                }
            }
        }

        info!(
            requested,
            registered = outcome.registered.len(),
            failed = outcome.failed.len(),
            "📋 Ticker registration finished"
        );

        outcome
    }
}

// ─── Cursor Extraction ────────────────────────────────────────────────────────

fn into_tickers_dto(response: TickersResponse) -> TickersDto {
    let dto = TickersDto {
        results: response.results.unwrap_or_default(),
        next_cursor: cursor_from_next_url(response.next_url.as_deref()),
    };
    debug!(
        count = dto.results.len(),
        has_next = dto.has_next_page(),
        status = ?response.status,
        "tickers page"
    );
    dto
}

/// Pull the `cursor` query parameter out of Polygon's `next_url`.
///
/// The value comes back raw, exactly as it appears in the query string (no
/// percent-decoding), so it can be handed back upstream untouched. Returns
/// `""` (last page) when the URL is absent, unparsable, or has no `cursor`
/// parameter. Parse failures are logged, never propagated.
pub fn cursor_from_next_url(next_url: Option<&str>) -> String {
    let Some(raw) = next_url.filter(|u| !u.trim().is_empty()) else {
        return String::new();
    };

    match parse_next_url(raw) {
        Ok(url) => url
            .query()
            .and_then(|query| query.split('&').find_map(|pair| pair.strip_prefix("cursor=")))
            .unwrap_or_default()
            .to_string(),
        Err(e) => {
            warn!(next_url = raw, error = %e, "Unparsable next_url; treating as last page");
            String::new()
        }
    }
}

/// Absolute URL as-is; a path-only URL is resolved against a placeholder origin.
fn parse_next_url(raw: &str) -> Result<Url, url::ParseError> {
    match Url::parse(raw) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/").and_then(|base| base.join(raw))
        }
        other => other,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
