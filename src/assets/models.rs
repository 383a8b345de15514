//! Cache keys, stored responses, and fetch statistics.

// Author: kelexine (https://github.com/kelexine)

use bytes::Bytes;

/// Key a stored response is filed under: request method plus path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub method: String,
    pub path: String,
}

impl AssetKey {
    /// Key for a plain GET of `path`, the only shape install produces.
    pub fn get(path: &str) -> Self {
        Self {
            method: "GET".to_string(),
            path: path.to_string(),
        }
    }
}

/// A response held in the asset cache, replayable to any later request
/// bearing the same key.
#[derive(Debug, Clone)]
pub struct StoredResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Statistics for the fetch interception path.
#[derive(Debug, Default, Clone)]
pub struct FetchStats {
    /// Requests answered from the cache.
    pub hits: u64,
    /// Requests that fell through to the network.
    pub misses: u64,
}
