//! # error
//!
//! Centralised application error type.
//!
//! Every service operation and handler returns `Result<_, AppError>`. Each
//! failure kind stays a distinct variant all the way to the HTTP edge, where
//! Axum's `IntoResponse` impl maps it to a status code and a structured JSON
//! body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Polygon answered 4xx. `body` is the raw upstream error payload.
    #[error("Upstream client error (HTTP {status}): {body}")]
    UpstreamClient { status: u16, body: String },

    /// Polygon answered 5xx. `body` is the raw upstream error payload.
    #[error("Upstream server error (HTTP {status}): {body}")]
    UpstreamServer { status: u16, body: String },

    /// Polygon unreachable, timed out, or sent a body we could not decode.
    #[error("Upstream transport error: {0}")]
    UpstreamTransport(String),

    /// The ticker store itself failed: never a plain "not found".
    #[error("Error accessing database for ticker symbol: {symbol}")]
    Repository {
        symbol: String,
        #[source]
        source: StoreError,
    },

    /// Neither the store nor Polygon know this symbol.
    #[error("No ticker detail found for: {0}")]
    TickerNotFound(String),

    /// The inbound request was syntactically correct but semantically invalid.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UpstreamClient { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamServer { .. } | AppError::UpstreamTransport(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::TickerNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Repository { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "ok":    false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::UpstreamClient { status: 403, body: "{}".into() }, StatusCode::BAD_REQUEST),
            (AppError::UpstreamServer { status: 503, body: "{}".into() }, StatusCode::BAD_GATEWAY),
            (AppError::TickerNotFound("ZZZZ".into()), StatusCode::NOT_FOUND),
            (
                AppError::Repository {
                    symbol: "AAPL".into(),
                    source: StoreError::Unavailable("pool closed".into()),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{err}");
        }
    }

    #[test]
    fn test_messages_name_the_symbol() {
        let err = AppError::TickerNotFound("ZZZZ".into());
        assert!(err.to_string().contains("ZZZZ"));

        let err = AppError::Repository {
            symbol: "MSFT".into(),
            source: StoreError::Unavailable("boom".into()),
        };
        assert!(err.to_string().contains("MSFT"));
    }
}
