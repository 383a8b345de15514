// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::assets::AssetKey;
use crate::error::GatewayError;
use crate::filter::{self, Screening};
use crate::metrics;
use crate::quota::gate::today;
use crate::upstream::models::validate_image_size;
use crate::upstream::ImageFormat;
use axum::body::Body;
use axum::http::{header, Method, Uri};
use axum::{extract::State, response::{IntoResponse, Response}, Json};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Canned reply for messages containing blocked terms.
const LANGUAGE_REPLY: &str = "⚠️ Please avoid inappropriate language.";

/// Canned reply for clean but off-topic messages.
const OFF_TOPIC_REPLY: &str =
    "🌱 I can talk about plants, gardening or just chat a little. How can I help you today?";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Check the asset cache generation
    let asset_check = if state.assets.is_installed() {
        let stats = state.assets.stats();
        HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "Generation {} installed ({} hits, {} misses)",
                state.config.assets.cache_version, stats.hits, stats.misses
            ),
        }
    } else {
        // Without an installed generation every request goes to the network
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: "No installed generation, serving passthrough only".to_string(),
        }
    };
    checks.insert("asset_cache".to_string(), asset_check);

    // Check the upload quota record
    let quota_check = match state.gate.current_record() {
        Some(record) if record.date == today() => HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "{} of {} uploads used today",
                record.count,
                state.gate.max_per_day()
            ),
        },
        _ => HealthCheck {
            status: "ok".to_string(),
            message: "Fresh quota".to_string(),
        },
    };
    checks.insert("upload_quota".to_string(), quota_check);

    // Check configuration
    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!("Upstream: {}", state.config.upstream.api_url),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

#[derive(Debug, Deserialize)]
pub struct ChatSendRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatSendResponse {
    pub reply: String,
}

/// Handler for the /api/chat endpoint.
///
/// Screens the message first: blocked terms and off-topic questions are
/// answered locally with a canned reply and never reach the proxy.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatSendRequest>,
) -> Result<Json<ChatSendResponse>, GatewayError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(GatewayError::InvalidRequest("empty message".to_string()));
    }

    match filter::screen(message) {
        Screening::Inappropriate => {
            debug!("Message rejected by language screen");
            Ok(Json(ChatSendResponse {
                reply: LANGUAGE_REPLY.to_string(),
            }))
        }
        Screening::OffTopic => {
            debug!("Message rejected as off-topic");
            Ok(Json(ChatSendResponse {
                reply: OFF_TOPIC_REPLY.to_string(),
            }))
        }
        Screening::Allowed => {
            let reply = state.upstream.send_chat(message).await?;
            Ok(Json(ChatSendResponse { reply }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ImageAnalyzeRequest {
    /// Base64-encoded image bytes.
    pub data: String,
    /// MIME type of the encoded image.
    pub media_type: String,
}

/// Handler for the /api/image endpoint.
///
/// Consults the upload gate before anything is sent; the upload is counted
/// only after the analysis comes back, so a failed analysis does not burn
/// quota.
pub async fn image_handler(
    State(state): State<AppState>,
    Json(req): Json<ImageAnalyzeRequest>,
) -> Result<Json<ChatSendResponse>, GatewayError> {
    if state.gate.check_limit()? {
        info!("Image analysis blocked by daily upload limit");
        metrics::record_upload_decision("blocked");
        return Err(GatewayError::UploadLimit(format!(
            "{} per day",
            state.gate.max_per_day()
        )));
    }
    metrics::record_upload_decision("allowed");

    let format = ImageFormat::from_mime_type(&req.media_type).ok_or_else(|| {
        GatewayError::InvalidRequest(format!("unsupported media type {}", req.media_type))
    })?;

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&req.data)
        .map_err(|e| GatewayError::InvalidRequest(format!("invalid base64 payload: {}", e)))?;
    validate_image_size(decoded.len()).map_err(GatewayError::InvalidRequest)?;

    let data_url = format!("data:{};base64,{}", format.mime_type(), req.data);
    let content = state.upstream.analyze_image(&data_url).await?;

    state.gate.record_upload()?;

    Ok(Json(ChatSendResponse { reply: content }))
}

/// Fallback handler: the fetch interception path.
///
/// Replays the stored response on a cache hit; on a miss the request goes to
/// the origin and its response is returned untouched. A network failure on
/// the miss path surfaces as a gateway error, no retry and no fallback body.
pub async fn asset_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, GatewayError> {
    let key = AssetKey {
        method: method.to_string(),
        path: uri.path().to_string(),
    };

    let stored = state.assets.fetch(&key).await?;

    let mut builder = Response::builder().status(stored.status);
    if let Some(content_type) = &stored.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder
        .body(Body::from(stored.body))
        .map_err(|e| GatewayError::Internal(format!("response build failed: {}", e)))
}
