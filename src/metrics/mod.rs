// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    ASSET_FETCHES,
    UPLOAD_DECISIONS,
    UPSTREAM_REQUESTS,
};

/// Record an asset interception outcome ("hit" or "miss")
pub fn record_asset_fetch(result: &str) {
    ASSET_FETCHES.with_label_values(&[result]).inc();
}

/// Record an upload gate decision ("allowed" or "blocked")
pub fn record_upload_decision(decision: &str) {
    UPLOAD_DECISIONS.with_label_values(&[decision]).inc();
}

/// Record an upstream proxy call
pub fn record_upstream_request(endpoint: &str, status_code: u16) {
    UPSTREAM_REQUESTS
        .with_label_values(&[endpoint, &status_code.to_string()])
        .inc();
}
