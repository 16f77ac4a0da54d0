//! # models::ticker
//!
//! Defines [`TickerDetail`], the cached reference record keyed by symbol, and
//! the lightweight ticker summaries returned by search.
//!
//! Outbound JSON is camelCase (internal DTO format); inbound JSON from Polygon
//! is snake_case, hence the split `rename_all` on types that travel both ways.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── TickerDetail ─────────────────────────────────────────────────────────────

/// Reference record for a single ticker: เก็บลง Store ครั้งแรกที่ fetch สำเร็จ
///
/// `symbol` is the sole identity key: saving a record with an existing symbol
/// overwrites the previous one wholesale (no field merge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TickerDetail {
    pub symbol: String,
    pub name: Option<String>,
    pub market: Option<String>,
    pub primary_exchange: Option<String>,
    pub currency_name: Option<String>,
    /// Polygon asset type code, e.g. `"CS"` for common stock.
    #[serde(rename = "type")]
    pub ticker_type: Option<String>,
    pub description: Option<String>,
    pub market_cap: Option<f64>,
    pub homepage_url: Option<String>,
    pub total_employees: Option<i64>,
    pub list_date: Option<NaiveDate>,
    pub share_class_shares_outstanding: Option<i64>,
    pub weighted_shares_outstanding: Option<i64>,
}

#[cfg(test)]
impl TickerDetail {
    /// A record with only the symbol set: every other field is unknown.
    pub fn bare(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
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
        }
    }
}

// ─── TickerResult ─────────────────────────────────────────────────────────────

/// One row of a ticker search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct TickerResult {
    pub ticker: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub primary_exchange: Option<String>,
    #[serde(default, rename = "type")]
    pub ticker_type: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub currency_name: Option<String>,
    #[serde(default)]
    pub cik: Option<String>,
    #[serde(default)]
    pub composite_figi: Option<String>,
    #[serde(default)]
    pub share_class_figi: Option<String>,
    #[serde(default)]
    pub last_updated_utc: Option<String>,
}

// ─── TickerType ───────────────────────────────────────────────────────────────

/// Entry of the upstream ticker-type enumeration (`CS`, `ETF`, `ADRC`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct TickerType {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub asset_class: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

// ─── TickersSearchConfig ──────────────────────────────────────────────────────

/// Search input built per request from the `ticker` / `search-term` query
/// parameters. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TickersSearchConfig {
    /// Exact-match ticker filter.
    pub ticker: Option<String>,
    /// Free-text search over ticker and company name.
    #[serde(rename = "search-term")]
    pub search_term: Option<String>,
}
