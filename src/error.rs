use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::rate_limit::WINDOW_MS;

// Everything the handler can answer with besides a session object
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("REALTIME_API_KEY is not configured")]
    MissingCredential,

    #[error("origin {origin} is not allowed")]
    OriginRejected {
        origin: String,
        allowlist: Vec<String>,
    },

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("upstream session request failed: {detail}")]
    Upstream { detail: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingCredential => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "REALTIME_API_KEY is not configured" })),
            )
                .into_response(),
            ApiError::OriginRejected { origin, allowlist } => (
                StatusCode::FORBIDDEN,
                // diagnostic aid for integrators, the allowlist is not a secret
                Json(json!({
                    "error": "origin not allowed",
                    "origin": origin,
                    "allowed_origins": allowlist,
                })),
            )
                .into_response(),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, (WINDOW_MS / 1000).to_string())],
                Json(json!({ "error": "rate limit exceeded, try again later" })),
            )
                .into_response(),
            ApiError::Upstream { detail } => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "upstream session request failed", "detail": detail })),
            )
                .into_response(),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": msg })),
            )
                .into_response(),
        }
    }
}
