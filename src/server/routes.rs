// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    asset_handler, chat_handler, health_handler, image_handler, metrics_handler,
};
use super::middleware::request_id_layers;
use crate::assets::AssetCacheManager;
use crate::config::AppConfig;
use crate::error::Result;
use crate::quota::{FileStore, UploadGate};
use crate::upstream::AssistantClient;
use axum::{routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub assets: Arc<AssetCacheManager>,
    pub gate: Arc<UploadGate<FileStore>>,
    pub upstream: Arc<AssistantClient>,
}

pub fn create_router(
    config: AppConfig,
    assets: AssetCacheManager,
    upstream: AssistantClient,
) -> Result<Router> {
    let gate = UploadGate::new(
        FileStore::new(&config.quota.storage_dir),
        config.quota.max_uploads_per_day,
    );

    let state = AppState {
        config,
        assets: Arc::new(assets),
        gate: Arc::new(gate),
        upstream: Arc::new(upstream),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/image", post(image_handler))
        // Everything else is an asset request and goes through the cache
        .fallback(asset_handler)
        // Allow large request bodies for base64-encoded images
        // 20MB image = ~27MB base64, so allow up to 50MB to be safe
        .layer(tower_http::limit::RequestBodyLimitLayer::new(50 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
