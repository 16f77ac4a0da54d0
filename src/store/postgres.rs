//! # store::postgres: PostgreSQL Ticker Store
//!
//! ใช้ `sqlx` สำหรับ async PostgreSQL
//!
//! ## Setup
//! 1. สร้าง database
//! 2. ตั้ง `DATABASE_URL` ใน `.env`
//! 3. `cargo run --features postgres`: migration รันเองตอน startup
//!
//! Every call opens its own transaction and commits before returning, so a
//! caller never sees half-applied state.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{debug, info};

use super::{StoreError, TickerDetailStore};
use crate::models::TickerDetail;

#[derive(Clone)]
pub struct PgTickerDetailStore {
    pool: PgPool,
}

impl PgTickerDetailStore {
    /// สร้าง PgPool และ run migration
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        run_migrations(&pool).await?;

        info!("✅ PostgreSQL connected and migrations applied");
        Ok(Self { pool })
    }
}

async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(include_str!("../../migrations/001_ticker_details.sql"))
        .execute(pool)
        .await
        .context("Failed to run migration 001_ticker_details.sql")?;

    Ok(())
}

#[async_trait]
impl TickerDetailStore for PgTickerDetailStore {
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<TickerDetail>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Transaction(e.to_string()))?;

        let row = sqlx::query_as::<_, TickerDetail>(
            r#"
            SELECT symbol, name, market, primary_exchange, currency_name,
                   ticker_type, description, market_cap, homepage_url,
                   total_employees, list_date, share_class_shares_outstanding,
                   weighted_shares_outstanding
            FROM ticker_details
            WHERE symbol = $1
            "#,
        )
        .bind(symbol)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| StoreError::Transaction(e.to_string()))?;

        debug!(symbol, hit = row.is_some(), "ticker_details lookup");
        Ok(row)
    }

    async fn save(&self, detail: TickerDetail) -> Result<TickerDetail, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Transaction(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO ticker_details
              (symbol, name, market, primary_exchange, currency_name,
               ticker_type, description, market_cap, homepage_url,
               total_employees, list_date, share_class_shares_outstanding,
               weighted_shares_outstanding)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (symbol) DO UPDATE SET
              name                           = EXCLUDED.name,
              market                         = EXCLUDED.market,
              primary_exchange               = EXCLUDED.primary_exchange,
              currency_name                  = EXCLUDED.currency_name,
              ticker_type                    = EXCLUDED.ticker_type,
              description                    = EXCLUDED.description,
              market_cap                     = EXCLUDED.market_cap,
              homepage_url                   = EXCLUDED.homepage_url,
              total_employees                = EXCLUDED.total_employees,
              list_date                      = EXCLUDED.list_date,
              share_class_shares_outstanding = EXCLUDED.share_class_shares_outstanding,
              weighted_shares_outstanding    = EXCLUDED.weighted_shares_outstanding,
              updated_at                     = now()
            "#,
        )
        .bind(&detail.symbol)
        .bind(&detail.name)
        .bind(&detail.market)
        .bind(&detail.primary_exchange)
        .bind(&detail.currency_name)
        .bind(&detail.ticker_type)
        .bind(&detail.description)
        .bind(detail.market_cap)
        .bind(&detail.homepage_url)
        .bind(detail.total_employees)
        .bind(detail.list_date)
        .bind(detail.share_class_shares_outstanding)
        .bind(detail.weighted_shares_outstanding)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| StoreError::Transaction(e.to_string()))?;

        debug!(symbol = %detail.symbol, "ticker_details upserted");
        Ok(detail)
    }
}
