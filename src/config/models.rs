//! Configuration data structures for the gardener gateway.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the upstream AI proxy endpoint, the asset precache
//! manifest, and the daily image upload quota.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream AI proxy settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Asset precache settings.
    #[serde(default)]
    pub assets: AssetConfig,

    /// Daily image upload quota settings.
    #[serde(default)]
    pub quota: QuotaConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads for the Axum server.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Settings for the upstream AI proxy connection.
///
/// The proxy is an external collaborator: it accepts a POST with a JSON
/// `messages` array and answers with `reply` (chat), with
/// `choices[0].message.content` (image analysis), or with an `error` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Full URL of the AI proxy endpoint.
    /// Default: `http://127.0.0.1:3000/api/openai`
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Optional bearer key forwarded to the proxy.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model requested for image analysis.
    /// Default: `gpt-4-turbo`
    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    /// System prompt prepended to every chat request.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Connection and request timeout in seconds.
    /// Default: `120`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for the versioned asset cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Origin the static assets are fetched from at install time and on
    /// cache misses.
    /// Default: `http://127.0.0.1:5173`
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Name of the current cache generation. Bumping this retires every
    /// previous generation at activation.
    /// Default: `gardener-ai-cache-v1`
    #[serde(default = "default_cache_version")]
    pub cache_version: String,

    /// Paths pre-fetched and stored as a unit at install time.
    #[serde(default = "default_manifest")]
    pub manifest: Vec<String>,
}

/// Settings for the daily image upload quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Maximum number of image analyses per calendar day.
    /// Default: `3`
    #[serde(default = "default_max_uploads")]
    pub max_uploads_per_day: u32,

    /// Directory holding the persisted upload record.
    /// Default: `~/.gardener-gateway`
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask upstream API keys in logs.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub sanitize_tokens: bool,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            vision_model: default_vision_model(),
            system_prompt: default_system_prompt(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            cache_version: default_cache_version(),
            manifest: default_manifest(),
        }
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            max_uploads_per_day: default_max_uploads(),
            storage_dir: default_storage_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            sanitize_tokens: true,
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_api_url() -> String {
    "http://127.0.0.1:3000/api/openai".to_string()
}

fn default_vision_model() -> String {
    "gpt-4-turbo".to_string()
}

fn default_system_prompt() -> String {
    "You are a plant expert AI. Use emojis like 🌿☀️💧🌸🪴 to keep answers short, helpful, and friendly.".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_origin() -> String {
    "http://127.0.0.1:5173".to_string()
}

fn default_cache_version() -> String {
    "gardener-ai-cache-v1".to_string()
}

fn default_manifest() -> Vec<String> {
    vec![
        "/".to_string(),
        "/index.html".to_string(),
        "/style.css".to_string(),
        "/app.js".to_string(),
        "/logo.png".to_string(),
    ]
}

fn default_max_uploads() -> u32 {
    3
}

fn default_storage_dir() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".gardener-gateway")
        .to_string_lossy()
        .to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
