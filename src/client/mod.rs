//! # client: Upstream Reference Data Client
//!
//! [`ReferenceDataClient`] is everything the service needs from the upstream
//! provider. Every method yields the parsed envelope or one of the classified
//! upstream errors:
//!
//! - [`AppError::UpstreamClient`]: 4xx, raw body attached
//! - [`AppError::UpstreamServer`]: 5xx, raw body attached
//! - [`AppError::UpstreamTransport`]: unreachable / timeout / undecodable body
//!
//! [`AppError::UpstreamClient`]: crate::error::AppError::UpstreamClient
//! [`AppError::UpstreamServer`]: crate::error::AppError::UpstreamServer
//! [`AppError::UpstreamTransport`]: crate::error::AppError::UpstreamTransport

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::upstream::{
    TickerDetailResponse, TickerSnapshotResponse, TickerTypesResponse, TickersResponse,
};
use crate::models::TickersSearchConfig;

mod polygon;

pub use polygon::PolygonClient;

#[async_trait]
pub trait ReferenceDataClient: Send + Sync {
    /// Fresh search by exact ticker and/or free-text term.
    async fn get_tickers(&self, config: &TickersSearchConfig) -> Result<TickersResponse, AppError>;

    /// Continue a previous search. `cursor` is sent as-is.
    async fn get_tickers_by_cursor(&self, cursor: &str) -> Result<TickersResponse, AppError>;

    async fn get_ticker_details(&self, symbol: &str) -> Result<TickerDetailResponse, AppError>;

    async fn get_ticker_types(&self) -> Result<TickerTypesResponse, AppError>;

    async fn get_ticker_snapshot(&self, symbol: &str) -> Result<TickerSnapshotResponse, AppError>;
}
