//! Client-local key-value storage.
//!
//! A single JSON object on disk, one entry per key. Values are arbitrary
//! JSON; typed access goes through [`LocalStore::get`] / [`LocalStore::set`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StudioError, StudioResult};

/// File name used inside the data directory.
pub const STORE_FILE_NAME: &str = "local-store.json";

/// JSON-file backed key-value store.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Open the store located in `data_dir`. The file is created lazily on first write.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(STORE_FILE_NAME),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a typed value. Missing file or key yields `Ok(None)`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StudioResult<Option<T>> {
        let mut entries = self.read_all()?;
        match entries.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Write a typed value, replacing any previous one under the same key.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> StudioResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_all(&entries)
    }

    fn read_all(&self) -> StudioResult<BTreeMap<String, serde_json::Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StudioError::storage(format!("Corrupt store at {}: {e}", self.path.display()))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, serde_json::Value>) -> StudioResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path());
        let value: Option<Vec<String>> = store.get("anything").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("nested"));
        store.set("names", &vec!["a", "b"]).unwrap();
        store.set("other", &42).unwrap();

        let names: Vec<String> = store.get("names").unwrap().unwrap();
        assert_eq!(names, vec!["a", "b"]);
        let other: u32 = store.get("other").unwrap().unwrap();
        assert_eq!(other, 42);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path());
        std::fs::write(store.path(), "not json").unwrap();
        let err = store.get::<u32>("x").unwrap_err();
        assert!(matches!(err, StudioError::Storage { .. }));
    }
}
