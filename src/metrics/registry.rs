// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Opts, Registry, TextEncoder,
    register_counter_vec_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Asset interception outcomes
    pub static ref ASSET_FETCHES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("asset_fetches_total", "Total intercepted asset requests"),
        &["result"], // result: hit, miss
        REGISTRY
    ).unwrap();

    /// Upload gate decisions
    pub static ref UPLOAD_DECISIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("upload_decisions_total", "Total upload gate decisions"),
        &["decision"], // decision: allowed, blocked
        REGISTRY
    ).unwrap();

    /// Upstream AI proxy calls
    pub static ref UPSTREAM_REQUESTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("upstream_requests_total", "Total upstream AI proxy calls"),
        &["endpoint", "status_code"], // endpoint: chat, image
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        ASSET_FETCHES.with_label_values(&["hit"]).inc();
        UPLOAD_DECISIONS.with_label_values(&["allowed"]).inc();
        UPSTREAM_REQUESTS.with_label_values(&["chat", "200"]).inc();

        let metrics = gather_metrics();
        assert!(metrics.contains("asset_fetches_total"));
        assert!(metrics.contains("upload_decisions_total"));
        assert!(metrics.contains("upstream_requests_total"));
    }
}
