//! # models::snapshot
//!
//! Defines [`TickerSnapshot`]: สรุปราคาวันนี้และเมื่อวานของ ticker เดียว
//! จาก Polygon snapshot endpoint. Never persisted.

use serde::{Deserialize, Serialize};

/// OHLCV aggregate for one trading day.
///
/// Polygon sends single-letter keys (`o`, `h`, ...); we expose full names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBar {
    #[serde(default, rename(deserialize = "o"))]
    pub open: f64,
    #[serde(default, rename(deserialize = "h"))]
    pub high: f64,
    #[serde(default, rename(deserialize = "l"))]
    pub low: f64,
    #[serde(default, rename(deserialize = "c"))]
    pub close: f64,
    #[serde(default, rename(deserialize = "v"))]
    pub volume: f64,
    /// Volume-weighted average price.
    #[serde(default, rename(deserialize = "vw"))]
    pub vwap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSnapshot {
    /// Last update, nanoseconds since the Unix epoch.
    #[serde(default)]
    pub updated: Option<i64>,
    pub ticker: String,
    #[serde(default)]
    pub day: Option<DailyBar>,
    #[serde(default)]
    pub prev_day: Option<DailyBar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_expands_bar_keys() {
        let raw = r#"{
            "ticker": "AAPL",
            "updated": 1605192894630916600,
            "day": { "o": 119.62, "h": 120.53, "l": 118.57, "c": 120.4, "v": 28727868, "vw": 119.725 },
            "prevDay": { "o": 117.19, "h": 119.63, "l": 116.44, "c": 119.49, "v": 110597265, "vw": 118.4998 },
            "todaysChange": 0.98
        }"#;
        let snapshot: TickerSnapshot = serde_json::from_str(raw).unwrap();
        let day = snapshot.day.unwrap();
        assert_eq!(day.close, 120.4);
        assert_eq!(snapshot.prev_day.unwrap().open, 117.19);

        let out = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(out["day"]["high"], 120.53);
        assert!(out["prevDay"]["vwap"].is_number());
    }
}
