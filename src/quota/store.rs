// Key-value storage for the upload record
// Author: kelexine (https://github.com/kelexine)

use crate::error::{GatewayError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Narrow per-origin key-value store the upload gate depends on.
///
/// `load` distinguishes "no value" (`Ok(None)`) from a storage failure;
/// the gate treats both the same way (fail-open), but callers that care
/// can tell them apart.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// Durable store writing one file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GatewayError::QuotaStorage(format!(
                "read of {} failed: {}",
                key, e
            ))),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| GatewayError::QuotaStorage(format!("create dir failed: {}", e)))?;
        fs::write(self.path_for(key), value)
            .map_err(|e| GatewayError::QuotaStorage(format!("write of {} failed: {}", key, e)))
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.load("imageUploads").unwrap().is_none());
        store.save("imageUploads", r#"{"date":"2026-08-07","count":1}"#).unwrap();
        assert_eq!(
            store.load("imageUploads").unwrap().unwrap(),
            r#"{"date":"2026-08-07","count":1}"#
        );
    }

    #[test]
    fn test_file_store_creates_directory_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        store.save("imageUploads", "{}").unwrap();
        assert!(store.load("imageUploads").unwrap().is_some());
    }
}
