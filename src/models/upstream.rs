//! # models::upstream
//!
//! Response envelopes as Polygon sends them. These types only ever get
//! deserialized; the service reshapes them into the DTOs in [`super::dto`].

use chrono::NaiveDate;
use serde::Deserialize;

use super::{TickerDetail, TickerResult, TickerSnapshot, TickerType};

/// Generic `{ results, next_url, status }` envelope.
///
/// `results` may be absent or `null`: callers decide whether that is an empty
/// page or a not-found.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsEnvelope<T> {
    pub results: Option<T>,
    /// Absolute URL of the next page; carries the `cursor` query parameter.
    #[serde(default, alias = "nextUrl")]
    pub next_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

pub type TickersResponse = ResultsEnvelope<Vec<TickerResult>>;
pub type TickerTypesResponse = ResultsEnvelope<Vec<TickerType>>;
pub type TickerDetailResponse = ResultsEnvelope<TickerDetailResult>;

/// Snapshot endpoint uses `ticker` instead of `results` as the body key.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerSnapshotResponse {
    #[serde(default)]
    pub ticker: Option<TickerSnapshot>,
    #[serde(default)]
    pub status: Option<String>,
}

// ─── TickerDetailResult ───────────────────────────────────────────────────────

/// `results` body of `/v3/reference/tickers/{ticker}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerDetailResult {
    #[serde(rename = "ticker")]
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub primary_exchange: Option<String>,
    #[serde(default)]
    pub currency_name: Option<String>,
    #[serde(default, rename = "type")]
    pub ticker_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub homepage_url: Option<String>,
    #[serde(default)]
    pub total_employees: Option<i64>,
    #[serde(default)]
    pub list_date: Option<NaiveDate>,
    #[serde(default)]
    pub share_class_shares_outstanding: Option<i64>,
    #[serde(default)]
    pub weighted_shares_outstanding: Option<i64>,
}

impl From<TickerDetailResult> for TickerDetail {
    fn from(result: TickerDetailResult) -> Self {
        TickerDetail {
            symbol:                         result.symbol,
            name:                           result.name,
            market:                         result.market,
            primary_exchange:               result.primary_exchange,
            currency_name:                  result.currency_name,
            ticker_type:                    result.ticker_type,
            description:                    result.description,
            market_cap:                     result.market_cap,
            homepage_url:                   result.homepage_url,
            total_employees:                result.total_employees,
            list_date:                      result.list_date,
            share_class_shares_outstanding: result.share_class_shares_outstanding,
            weighted_shares_outstanding:    result.weighted_shares_outstanding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_results_is_none() {
        let resp: TickerDetailResponse =
            serde_json::from_str(r#"{ "results": null, "status": "OK" }"#).unwrap();
        assert!(resp.results.is_none());
        assert_eq!(resp.status.as_deref(), Some("OK"));
    }

    #[test]
    fn test_missing_results_key_is_none() {
        let resp: TickerDetailResponse = serde_json::from_str(r#"{ "status": "NOT_FOUND" }"#).unwrap();
        assert!(resp.results.is_none());
        assert!(resp.next_url.is_none());
    }

    #[test]
    fn test_next_url_accepts_camel_alias() {
        let resp: TickersResponse = serde_json::from_str(
            r#"{ "results": [], "nextUrl": "https://api.example.com/v3/tickers?cursor=X", "status": "OK" }"#,
        )
        .unwrap();
        assert_eq!(
            resp.next_url.as_deref(),
            Some("https://api.example.com/v3/tickers?cursor=X")
        );
    }

    #[test]
    fn test_detail_result_maps_ticker_to_symbol() {
        let raw = r#"{
            "results": {
                "ticker": "AAPL",
                "name": "Apple Inc.",
                "market": "stocks",
                "type": "CS",
                "market_cap": 2771126040150.0,
                "total_employees": 154000,
                "list_date": "1980-12-12",
                "weighted_shares_outstanding": 16334371000
            },
            "status": "OK"
        }"#;
        let resp: TickerDetailResponse = serde_json::from_str(raw).unwrap();
        let detail = TickerDetail::from(resp.results.unwrap());

        assert_eq!(detail.symbol, "AAPL");
        assert_eq!(detail.ticker_type.as_deref(), Some("CS"));
        assert_eq!(detail.total_employees, Some(154000));
        assert_eq!(detail.list_date, NaiveDate::from_ymd_opt(1980, 12, 12));
        assert_eq!(detail.homepage_url, None);
    }
}
