use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Rejected caller input to the distance, fee and status functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("unknown order status: {0}")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error("{table} table has no tiers")]
    EmptyTable { table: &'static str },

    #[error("{table} table must end with an unbounded tier")]
    MissingOpenTier { table: &'static str },

    #[error("{table} tier {index} has a negative, empty or non-finite bound")]
    InvalidBound { table: &'static str, index: usize },

    #[error("{table} tier {index} is out of order")]
    UnsortedTiers { table: &'static str, index: usize },

    #[error("{table} tier {index} has an empty label")]
    EmptyLabel { table: &'static str, index: usize },

    #[error("fee tier {index} has a negative or non-finite value")]
    InvalidFee { index: usize },

    #[error("checkout policy: {0}")]
    InvalidCheckout(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid delivery policy: {0}")]
    Policy(#[from] PolicyError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Policy(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
