//! # config: อ่าน Config จาก Environment Variables

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_POLYGON_BASE_URL: &str = "https://api.polygon.io";

/// Config ทั้งหมดที่ service ต้องการ
#[derive(Debug, Clone)]
pub struct Config {
    /// Polygon API secret: ส่งเป็น Bearer token ทุก request
    pub polygon_api_key:      String,
    /// Base URL ของ Polygon REST API
    pub polygon_base_url:     String,
    /// Timeout ต่อ 1 request ไป Polygon
    pub upstream_timeout:     Duration,
    /// จำนวน symbol ที่ register พร้อมกันได้สูงสุด
    pub register_concurrency: usize,
    /// PostgreSQL URL: None = ใช้ in-memory store
    pub database_url:         Option<String>,
    pub bind_addr:            SocketAddr,
    /// Inbound `X-API-Key`: None = dev mode (ไม่เช็ค)
    pub api_key:              Option<String>,
    /// Symbols ที่ register เข้า store ตอน startup (warm cache)
    pub preload_symbols:      Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let polygon_api_key = std::env::var("POLYGON_API_KEY")
            .context("POLYGON_API_KEY environment variable is required")?;

        let timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("UPSTREAM_TIMEOUT_SECS must be a number")?;

        let register_concurrency: usize = std::env::var("REGISTER_CONCURRENCY")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .context("REGISTER_CONCURRENCY must be a number")?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        Ok(Self {
            polygon_api_key,
            polygon_base_url: std::env::var("POLYGON_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_POLYGON_BASE_URL.to_string()),
            upstream_timeout: Duration::from_secs(timeout_secs),
            // 0 จะทำให้ buffer_unordered ไม่เดินเลย
            register_concurrency: register_concurrency.max(1),
            database_url: std::env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            bind_addr,
            api_key: std::env::var("API_KEY").ok().filter(|key| !key.is_empty()),
            preload_symbols: parse_symbol_list(
                &std::env::var("PRELOAD_SYMBOLS").unwrap_or_default(),
            ),
        })
    }
}

/// `"aapl, MSFT,,nvda"` → `["AAPL", "MSFT", "NVDA"]`
fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbol_list() {
        assert_eq!(parse_symbol_list("aapl, MSFT,,nvda "), vec!["AAPL", "MSFT", "NVDA"]);
        assert!(parse_symbol_list("").is_empty());
    }
}
