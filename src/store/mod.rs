//! # store: Ticker Detail Persistence
//!
//! [`TickerDetailStore`] is the seam between the reference-data service and
//! wherever ticker details live:
//!
//! | Impl                        | When                                     |
//! |-----------------------------|------------------------------------------|
//! | [`PgTickerDetailStore`]     | `--features postgres` + `DATABASE_URL`   |
//! | [`MemoryTickerDetailStore`] | everything else (dev mode, tests)        |
//!
//! `find_by_symbol` returns `Ok(None)` for an absent record. `Err` always
//! means the store itself failed.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::TickerDetail;

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

pub use memory::MemoryTickerDetailStore;
#[cfg(feature = "postgres")]
pub use postgres::PgTickerDetailStore;

#[derive(Debug, Error)]
#[cfg_attr(not(feature = "postgres"), allow(dead_code))]
pub enum StoreError {
    /// Could not reach the database / acquire a connection.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    Query(String),

    /// Begin / commit failed.
    #[error("transaction failed: {0}")]
    Transaction(String),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}

#[async_trait]
pub trait TickerDetailStore: Send + Sync {
    /// Look up a ticker detail by symbol.
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<TickerDetail>, StoreError>;

    /// Upsert by symbol: last write wins.
    async fn save(&self, detail: TickerDetail) -> Result<TickerDetail, StoreError>;
}
