//! Error types for the stock dashboard API
//!
//! Provides unified error handling using thiserror. Upstream failures are
//! logged where they happen and reach the client only as a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == API Error Enum ==
/// Every way a stock endpoint can refuse or fail a request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid symbol")]
    InvalidSymbol,

    #[error("Invalid range")]
    InvalidRange,

    #[error("Too many requests")]
    RateLimited,

    /// Upstream call failed; carries the endpoint's generic client message
    #[error("{0}")]
    Upstream(&'static str),

    /// Local failure (serialization, task join)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidSymbol | ApiError::InvalidRange => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("serialization failed: {err}"))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                error!(error = %detail, "internal error while handling request");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (self.status_code(), Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the API layer.
pub type Result<T> = std::result::Result<T, ApiError>;
