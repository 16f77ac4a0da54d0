//! # models::dto
//!
//! Shapes returned to our own callers (camelCase JSON).

use serde::{Deserialize, Serialize};

use super::{TickerDetail, TickerResult, TickerType};

/// One page of ticker search results.
///
/// `next_cursor` is `""` when there is no further page: never `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickersDto {
    pub results: Vec<TickerResult>,
    pub next_cursor: String,
}

impl TickersDto {
    pub fn has_next_page(&self) -> bool {
        !self.next_cursor.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerTypesDto {
    pub results: Vec<TickerType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerDetailDto {
    pub result: TickerDetail,
}

/// Body of `POST /api/tickers/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterTickersRequest {
    pub symbols: Vec<String>,
}
