//! # state
//!
//! AppState: ถือ ReferenceDataService ตัวเดียวที่ share ให้ทุก handler

use std::sync::Arc;

use tracing::warn;

use crate::client::{PolygonClient, ReferenceDataClient};
use crate::config::Config;
use crate::service::ReferenceDataService;
use crate::store::{MemoryTickerDetailStore, TickerDetailStore};

/// Top-level shared state injected into every Axum handler.
pub struct AppState {
    pub reference_data: ReferenceDataService,
}

impl AppState {
    pub fn new(reference_data: ReferenceDataService) -> Self {
        Self { reference_data }
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

/// ประกอบ client + store + service จาก Config
pub async fn build_state(config: &Config) -> anyhow::Result<SharedState> {
    // reqwest Client ตัวเดียวทั้งระบบ (connection pooling)
    let client: Arc<dyn ReferenceDataClient> = Arc::new(PolygonClient::new(
        reqwest::Client::new(),
        &config.polygon_base_url,
        config.polygon_api_key.clone(),
        config.upstream_timeout,
    )?);

    let store = build_store(config).await?;

    Ok(Arc::new(AppState::new(ReferenceDataService::new(
        client,
        store,
        config.register_concurrency,
    ))))
}

#[cfg(feature = "postgres")]
async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn TickerDetailStore>> {
    match &config.database_url {
        Some(url) => Ok(Arc::new(crate::store::PgTickerDetailStore::connect(url).await?)),
        None => {
            warn!("DATABASE_URL not set; ticker details cached in memory only");
            Ok(Arc::new(MemoryTickerDetailStore::new()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn TickerDetailStore>> {
    if config.database_url.is_some() {
        warn!("DATABASE_URL set but built without `postgres` feature; ignoring it");
    }
    warn!("Ticker details cached in memory only");
    Ok(Arc::new(MemoryTickerDetailStore::new()))
}
