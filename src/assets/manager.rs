// Asset cache manager - install/activate/fetch lifecycle
// Author: kelexine (https://github.com/kelexine)

use crate::assets::models::{AssetKey, FetchStats, StoredResponse};
use crate::assets::store::CacheStorage;
use crate::config::AssetConfig;
use crate::error::{GatewayError, Result};
use crate::metrics;
use parking_lot::RwLock;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Manager for the versioned asset cache.
///
/// Owns the cache storage, the origin HTTP client, and the precache
/// manifest. Exactly one generation (the configured `cache_version`) is
/// live after a successful install + activate cycle.
pub struct AssetCacheManager {
    storage: Arc<dyn CacheStorage>,
    http_client: Client,
    config: AssetConfig,
    stats: RwLock<FetchStats>,
}

impl AssetCacheManager {
    /// Create a new manager over `storage` for the configured origin.
    pub fn new(storage: Arc<dyn CacheStorage>, config: AssetConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            storage,
            http_client,
            config,
            stats: RwLock::new(FetchStats::default()),
        })
    }

    /// Pre-fetch every manifest path and commit them as a unit into the
    /// current generation.
    ///
    /// All fetches must succeed before anything is written: a single failed
    /// fetch aborts the install with an error and the storage is untouched,
    /// so a previous generation keeps serving.
    pub async fn install(&self) -> Result<()> {
        let mut entries = Vec::with_capacity(self.config.manifest.len());

        for path in &self.config.manifest {
            let url = self.origin_url(path);
            debug!("Precaching {}", url);

            let response = self
                .http_client
                .get(&url)
                .send()
                .await
                .map_err(|e| GatewayError::Install(format!("fetch of {} failed: {}", path, e)))?;

            if !response.status().is_success() {
                return Err(GatewayError::Install(format!(
                    "fetch of {} returned {}",
                    path,
                    response.status()
                )));
            }

            let stored = Self::store_response(response).await?;
            entries.push((AssetKey::get(path), stored));
        }

        let cache = self.storage.open(&self.config.cache_version)?;
        cache.put_all(entries)?;

        info!(
            "Installed {} assets into generation {}",
            self.config.manifest.len(),
            self.config.cache_version
        );
        Ok(())
    }

    /// Delete every generation that is not the current one.
    ///
    /// Idempotent: once only the current generation remains, repeated
    /// activation is a no-op beyond the enumeration scan.
    pub fn activate(&self) -> Result<()> {
        for name in self.storage.keys()? {
            if name != self.config.cache_version {
                self.storage.delete(&name)?;
                info!("Removed stale asset cache generation {}", name);
            }
        }
        Ok(())
    }

    /// Answer a request cache-first.
    ///
    /// A hit replays the stored response without touching the network. A
    /// miss performs the request against the origin and returns the live
    /// response; only install populates the cache, so the miss path never
    /// stores anything. Network failure on a miss propagates to the caller.
    pub async fn fetch(&self, key: &AssetKey) -> Result<StoredResponse> {
        if let Some(stored) = self.storage.match_key(&self.config.cache_version, key)? {
            debug!("Asset cache hit: {} {}", key.method, key.path);
            self.stats.write().hits += 1;
            metrics::record_asset_fetch("hit");
            return Ok(stored);
        }

        debug!("Asset cache miss: {} {}", key.method, key.path);
        self.stats.write().misses += 1;
        metrics::record_asset_fetch("miss");

        let method = reqwest::Method::from_bytes(key.method.as_bytes())
            .map_err(|_| GatewayError::InvalidRequest(format!("bad method {}", key.method)))?;
        let url = self.origin_url(&key.path);
        let response = self.http_client.request(method, &url).send().await?;
        Self::store_response(response).await
    }

    /// Names of every generation currently present in storage.
    pub fn generations(&self) -> Result<Vec<String>> {
        self.storage.keys()
    }

    /// Whether the current generation has been committed.
    pub fn is_installed(&self) -> bool {
        self.storage
            .keys()
            .map(|names| names.iter().any(|n| n == &self.config.cache_version))
            .unwrap_or(false)
    }

    /// Get fetch statistics
    pub fn stats(&self) -> FetchStats {
        self.stats.read().clone()
    }

    fn origin_url(&self, path: &str) -> String {
        format!("{}{}", self.config.origin.trim_end_matches('/'), path)
    }

    async fn store_response(response: reqwest::Response) -> Result<StoredResponse> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(StoredResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::store::MemoryCacheStorage;

    fn manager_for(origin: &str, version: &str, manifest: &[&str]) -> AssetCacheManager {
        let config = AssetConfig {
            origin: origin.to_string(),
            cache_version: version.to_string(),
            manifest: manifest.iter().map(|p| p.to_string()).collect(),
        };
        AssetCacheManager::new(Arc::new(MemoryCacheStorage::new()), config).unwrap()
    }

    #[test]
    fn test_origin_url_joins_without_double_slash() {
        let manager = manager_for("http://127.0.0.1:5173/", "v1", &[]);
        assert_eq!(manager.origin_url("/app.js"), "http://127.0.0.1:5173/app.js");
    }

    #[test]
    fn test_not_installed_before_first_install() {
        let manager = manager_for("http://127.0.0.1:5173", "v1", &["/"]);
        assert!(!manager.is_installed());
        assert!(manager.generations().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_install_empty_manifest_commits_generation() {
        let manager = manager_for("http://127.0.0.1:5173", "v1", &[]);
        manager.install().await.unwrap();
        assert!(manager.is_installed());
    }
}
