//! In-process store: ใช้ตอนไม่มี DATABASE_URL (dev mode) และใน tests

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TickerDetailStore};
use crate::models::TickerDetail;

#[derive(Debug, Default)]
pub struct MemoryTickerDetailStore {
    records: RwLock<HashMap<String, TickerDetail>>,
}

impl MemoryTickerDetailStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl TickerDetailStore for MemoryTickerDetailStore {
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<TickerDetail>, StoreError> {
        let guard = self.records.read().await;
        Ok(guard.get(symbol).cloned())
    }

    async fn save(&self, detail: TickerDetail) -> Result<TickerDetail, StoreError> {
        let mut guard = self.records.write().await;
        guard.insert(detail.symbol.clone(), detail.clone());
        Ok(detail)
    }
}
