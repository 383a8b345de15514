// Cache storage interface and in-memory implementation
// Author: kelexine (https://github.com/kelexine)

use crate::assets::models::{AssetKey, StoredResponse};
use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Storage for named cache generations.
///
/// `open` creates a generation if it does not exist yet; `match_key` is a
/// pure lookup and never creates one. Only install writes through `open`,
/// so a failed install leaves no trace in `keys`.
pub trait CacheStorage: Send + Sync {
    /// Open (or create) the generation named `name`.
    fn open(&self, name: &str) -> Result<Arc<dyn AssetCache>>;

    /// Look up `key` in the generation named `name` without creating it.
    fn match_key(&self, name: &str, key: &AssetKey) -> Result<Option<StoredResponse>>;

    /// Names of every existing generation.
    fn keys(&self) -> Result<Vec<String>>;

    /// Delete the generation named `name`. Returns whether it existed.
    fn delete(&self, name: &str) -> Result<bool>;
}

/// One cache generation.
pub trait AssetCache: Send + Sync {
    /// Store every entry as a unit.
    fn put_all(&self, entries: Vec<(AssetKey, StoredResponse)>) -> Result<()>;

    /// Look up a stored response for `key`.
    fn match_key(&self, key: &AssetKey) -> Result<Option<StoredResponse>>;
}

/// In-memory cache storage: a map of generation name to entry map.
#[derive(Default)]
pub struct MemoryCacheStorage {
    generations: RwLock<HashMap<String, Arc<MemoryCache>>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStorage for MemoryCacheStorage {
    fn open(&self, name: &str) -> Result<Arc<dyn AssetCache>> {
        let mut generations = self.generations.write();
        let cache = generations
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryCache::default()))
            .clone();
        Ok(cache as Arc<dyn AssetCache>)
    }

    fn match_key(&self, name: &str, key: &AssetKey) -> Result<Option<StoredResponse>> {
        let generations = self.generations.read();
        match generations.get(name) {
            Some(cache) => cache.match_key(key),
            None => Ok(None),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.generations.read().keys().cloned().collect())
    }

    fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.generations.write().remove(name).is_some())
    }
}

/// One in-memory generation.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<AssetKey, StoredResponse>>,
}

impl AssetCache for MemoryCache {
    fn put_all(&self, entries: Vec<(AssetKey, StoredResponse)>) -> Result<()> {
        let mut map = self.entries.write();
        for (key, response) in entries {
            map.insert(key, response);
        }
        Ok(())
    }

    fn match_key(&self, key: &AssetKey) -> Result<Option<StoredResponse>> {
        Ok(self.entries.read().get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn stored(body: &str) -> StoredResponse {
        StoredResponse {
            status: 200,
            content_type: Some("text/plain".to_string()),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_open_creates_generation_once() {
        let storage = MemoryCacheStorage::new();
        let cache = storage.open("v1").unwrap();
        cache
            .put_all(vec![(AssetKey::get("/index.html"), stored("hello"))])
            .unwrap();

        // Reopening returns the same generation, not a fresh one
        let reopened = storage.open("v1").unwrap();
        assert!(reopened.match_key(&AssetKey::get("/index.html")).unwrap().is_some());
        assert_eq!(storage.keys().unwrap(), vec!["v1".to_string()]);
    }

    #[test]
    fn test_match_key_does_not_create_generation() {
        let storage = MemoryCacheStorage::new();
        let found = storage.match_key("v1", &AssetKey::get("/")).unwrap();
        assert!(found.is_none());
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_delete_reports_existence() {
        let storage = MemoryCacheStorage::new();
        storage.open("v1").unwrap();
        assert!(storage.delete("v1").unwrap());
        assert!(!storage.delete("v1").unwrap());
    }

    #[test]
    fn test_method_is_part_of_the_key() {
        let storage = MemoryCacheStorage::new();
        let cache = storage.open("v1").unwrap();
        cache
            .put_all(vec![(AssetKey::get("/app.js"), stored("js"))])
            .unwrap();

        let post_key = AssetKey {
            method: "POST".to_string(),
            path: "/app.js".to_string(),
        };
        assert!(cache.match_key(&post_key).unwrap().is_none());
        assert!(cache.match_key(&AssetKey::get("/app.js")).unwrap().is_some());
    }
}
