//! # routes::tickers
//!
//! Ticker reference-data endpoints
//!
//! | Method | Path                              | Description                    |
//! |--------|-----------------------------------|--------------------------------|
//! | GET    | `/api/tickers?ticker=&search-term=` | ค้นหา ticker (หน้าแรก)       |
//! | GET    | `/api/tickers/cursor/:cursor`     | หน้าถัดไปด้วย cursor           |
//! | GET    | `/api/tickers/types`              | ประเภท ticker ทั้งหมด          |
//! | GET    | `/api/tickers/:symbol`            | Ticker detail (read-through)   |
//! | GET    | `/api/tickers/:symbol/snapshot`   | ราคาวันนี้ / เมื่อวาน          |
//! | POST   | `/api/tickers/register`           | Fetch + cache หลาย symbol      |

use std::collections::{BTreeMap, BTreeSet, HashSet};

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    error::AppError,
    models::{
        RegisterTickersRequest, TickerDetailDto, TickerSnapshot, TickerTypesDto, TickersDto,
        TickersSearchConfig,
    },
    state::SharedState,
};

/// Trim + uppercase; reject blanks.
fn normalize_symbol(raw: &str) -> Result<String, AppError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(AppError::BadRequest("ticker symbol must not be empty".into()));
    }
    Ok(symbol)
}

// ─── GET /api/tickers ─────────────────────────────────────────────────────────

pub async fn get_tickers(
    State(state): State<SharedState>,
    Query(config): Query<TickersSearchConfig>,
) -> Result<Json<TickersDto>, AppError> {
    let page = state.reference_data.get_tickers(&config).await?;
    Ok(Json(page))
}

// ─── GET /api/tickers/cursor/:cursor ──────────────────────────────────────────

pub async fn get_tickers_by_cursor(
    State(state): State<SharedState>,
    Path(cursor): Path<String>,
) -> Result<Json<TickersDto>, AppError> {
    if cursor.is_empty() {
        return Err(AppError::BadRequest("cursor must not be empty".into()));
    }
    let page = state.reference_data.get_tickers_by_cursor(&cursor).await?;
    Ok(Json(page))
}

// ─── GET /api/tickers/types ───────────────────────────────────────────────────

pub async fn get_ticker_types(
    State(state): State<SharedState>,
) -> Result<Json<TickerTypesDto>, AppError> {
    Ok(Json(state.reference_data.get_ticker_types().await?))
}

// ─── GET /api/tickers/:symbol ─────────────────────────────────────────────────

/// Read-through lookup: ไม่เขียนลง store
pub async fn get_ticker_detail(
    State(state): State<SharedState>,
    Path(symbol): Path<String>,
) -> Result<Json<TickerDetailDto>, AppError> {
    let symbol = normalize_symbol(&symbol)?;
    Ok(Json(state.reference_data.get_ticker_detail(&symbol).await?))
}

// ─── GET /api/tickers/:symbol/snapshot ────────────────────────────────────────

pub async fn get_ticker_snapshot(
    State(state): State<SharedState>,
    Path(symbol): Path<String>,
) -> Result<Json<TickerSnapshot>, AppError> {
    let symbol = normalize_symbol(&symbol)?;
    Ok(Json(state.reference_data.get_ticker_snapshot(&symbol).await?))
}

// ─── POST /api/tickers/register ───────────────────────────────────────────────

/// Fetch-and-cache ทุก symbol ใน body; symbol ที่ fail จะอยู่ใน `failed`
pub async fn register_tickers(
    State(state): State<SharedState>,
    Json(body): Json<RegisterTickersRequest>,
) -> Result<impl IntoResponse, AppError> {
    let symbols = body
        .symbols
        .iter()
        .map(|s| normalize_symbol(s))
        .collect::<Result<HashSet<_>, _>>()?;

    if symbols.is_empty() {
        return Err(AppError::BadRequest("symbols must not be empty".into()));
    }

    let outcome = state.reference_data.register_tickers_detailed(symbols).await;

    // sort ให้ response อ่านง่ายและ deterministic
    let registered: BTreeSet<String> = outcome.registered.into_iter().collect();
    let failed: BTreeMap<String, String> = outcome
        .failed
        .into_iter()
        .map(|(symbol, e)| (symbol, e.to_string()))
        .collect();

    Ok(Json(json!({
        "ok":         failed.is_empty(),
        "registered": registered,
        "failed":     failed,
    })))
}
