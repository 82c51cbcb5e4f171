//! API error types mapped to HTTP status codes.
//!
//! Every variant renders as `{"error": "message"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use trickle_core::error::TrickleError;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed payload or empty query (400).
    BadRequest(String),
    /// Broken invariant or unexpected failure (500).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<TrickleError> for ApiError {
    fn from(e: TrickleError) -> Self {
        if e.is_client_error() {
            return ApiError::BadRequest(match e {
                TrickleError::InvalidQuery(msg) => msg,
                other => other.to_string(),
            });
        }
        tracing::error!("Query failed: {e}");
        ApiError::Internal(e.to_string())
    }
}
