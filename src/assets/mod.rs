//! Versioned asset cache for offline page loads.
//!
//! The gateway pre-fetches the page's core assets into a named cache
//! generation at startup (install), retires every older generation once the
//! new one is committed (activate), and answers asset requests cache-first
//! with a network passthrough on misses (fetch).
//!
//! # Submodules
//!
//! - `models`: Cache keys, stored responses, and fetch statistics.
//! - `store`: The cache storage interface and its in-memory implementation.
//! - `manager`: The install/activate/fetch lifecycle.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod manager;
pub mod models;
pub mod store;

pub use manager::AssetCacheManager;
pub use models::{AssetKey, FetchStats, StoredResponse};
pub use store::{AssetCache, CacheStorage, MemoryCacheStorage};
