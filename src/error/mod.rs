// Error types for the gardener gateway
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Asset precache failed: {0}")]
    Install(String),

    #[error("Asset cache error: {0}")]
    CacheStorage(String),

    #[error("Quota storage error: {0}")]
    QuotaStorage(String),

    #[error("Upload limit reached ({0})")]
    UploadLimit(String),

    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Convert GatewayError to HTTP responses for Axum. The body carries a plain
// `error` field, which is what the chat widget reads on failure.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            GatewayError::UploadLimit(_) => {
                (StatusCode::TOO_MANY_REQUESTS, "rate_limit_error", self.to_string())
            }
            GatewayError::InvalidRequest(_) | GatewayError::Json(_) => {
                (StatusCode::BAD_REQUEST, "invalid_request_error", self.to_string())
            }
            GatewayError::Upstream(_) | GatewayError::Http(_) => {
                (StatusCode::BAD_GATEWAY, "api_error", self.to_string())
            }
            GatewayError::Config(_) | GatewayError::ConfigParsing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", self.to_string())
            }
            GatewayError::Install(_) | GatewayError::CacheStorage(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "asset_cache_error", self.to_string())
            }
            GatewayError::QuotaStorage(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "quota_storage_error", self.to_string())
            }
            _ => {
                (StatusCode::INTERNAL_SERVER_ERROR, "api_error", self.to_string())
            }
        };

        let body = json!({
            "type": error_type,
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
