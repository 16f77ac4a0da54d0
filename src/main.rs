//! # Compass Stocks: Reference Data Backend
//!
//! ```text
//!  ┌─────────────┐  GET  /api/tickers?...        ┌──────────────────────────┐
//!  │  Frontend   │ ────────────────────────────▶ │ ReferenceDataService     │
//!  └─────────────┘  GET  /api/tickers/:symbol    │ ├─ TickerDetailStore ◀─┐ │
//!                   POST /api/tickers/register   │ │   (Postgres / memory) │ │
//!                                                │ └─ PolygonClient ───────┘ │
//!                                                └────────────┬─────────────┘
//!                                                             │ reqwest
//!                                                             ▼
//!                                                   api.polygon.io
//! ```
//!
//! ## Environment Variables
//!
//! | Variable                | Default                  | Description                        |
//! |-------------------------|--------------------------|------------------------------------|
//! | `POLYGON_API_KEY`       | -                        | Polygon secret (required)          |
//! | `POLYGON_BASE_URL`      | `https://api.polygon.io` | Upstream base URL                  |
//! | `UPSTREAM_TIMEOUT_SECS` | `10`                     | Per-request upstream timeout       |
//! | `REGISTER_CONCURRENCY`  | `8`                      | Parallel symbols in registration   |
//! | `PRELOAD_SYMBOLS`       | -                        | Comma list registered at startup   |
//! | `DATABASE_URL`          | -                        | PostgreSQL (`--features postgres`) |
//! | `BIND_ADDR`             | `0.0.0.0:3000`           | Address Axum listens on            |
//! | `API_KEY`               | -                        | Required `X-API-Key` when set      |
//! | `RUST_LOG`              | `compass_stocks=debug`   | Tracing filter                     |

use std::collections::HashSet;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod client;
mod config;
mod error;
mod models;
mod routes;
mod service;
mod state;
mod store;

use auth::ApiKey;
use config::Config;
use routes::build_router;
use state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("compass_stocks=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("📈 Compass Stocks: reference data backend");

    // ── 3. Config + shared state ──────────────────────────────────────────────
    let config = Config::from_env()?;
    let state = build_state(&config).await?;

    // ── 4. Warm cache (background, ไม่บล็อก server start) ───────────────────
    if !config.preload_symbols.is_empty() {
        let preload: HashSet<String> = config.preload_symbols.iter().cloned().collect();
        let state = state.clone();
        tokio::spawn(async move {
            let registered = state.reference_data.register_tickers(preload).await;
            info!(count = registered.len(), ?registered, "🔥 Preloaded ticker details");
        });
    }

    // ── 5. Router ─────────────────────────────────────────────────────────────
    let app = build_router(state, ApiKey(config.api_key.clone()));

    // ── 6. Bind & Serve ───────────────────────────────────────────────────────
    info!(addr = ?config.bind_addr, "🚀 Compass Stocks server starting");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
