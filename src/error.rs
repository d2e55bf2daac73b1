use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of the market data provider for a single ticker.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("ticker not found: {0}")]
    NotFound(String),

    #[error("market data unavailable: {0}")]
    UpstreamUnavailable(String),
}

/// The price series cannot produce a trend signal.
#[derive(Debug, Error, PartialEq)]
pub enum TrendError {
    #[error("insufficient history: need {needed} sessions, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    #[error("degenerate price series: {0}")]
    DegenerateSeries(String),
}

#[derive(Debug, Error)]
#[error("email delivery failed: {0}")]
pub struct DeliveryError(pub String);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        let msg = err.to_string();
        if msg.contains("E11000") {
            StoreError::Conflict(msg)
        } else {
            StoreError::Database(msg)
        }
    }
}

impl From<mongodb::bson::document::ValueAccessError> for StoreError {
    fn from(err: mongodb::bson::document::ValueAccessError) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Errors returned by the JSON endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unavailable(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::Conflict(msg) => ApiError::Conflict(msg),
            StoreError::Database(msg) => ApiError::Unavailable(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
