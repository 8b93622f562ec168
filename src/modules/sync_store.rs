// Key-value persistence behind the bridge's storage methods.
// One JSON object per file; values are JSON documents keyed by name.
// The host platform is responsible for syncing the file across devices.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tauri::{AppHandle, Manager};

pub struct SyncStore {
    path: PathBuf,
}

impl SyncStore {
    pub fn new(app: &AppHandle) -> Self {
        let path = app
            .path()
            .app_data_dir()
            .expect("Failed to get app data dir")
            .join("sync_store.json");
        Self { path }
    }

    /// Store rooted at an explicit path (tests).
    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn load_map(&self) -> Result<HashMap<String, serde_json::Value>, String> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| e.to_string())?;
        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(e) => {
                log::warn!(
                    "[SyncStore] Failed to parse {}: {}, starting empty",
                    self.path.display(),
                    e
                );
                Ok(HashMap::new())
            }
        }
    }

    /// Read one key's value as a serialized JSON document.
    pub fn read(&self, key: &str) -> Result<Option<String>, String> {
        let map = self.load_map()?;
        Ok(map.get(key).map(|v| v.to_string()))
    }

    /// Read-modify-write of one key. `value` must itself be valid JSON;
    /// rejecting it here keeps the store file parseable.
    pub fn write(&self, key: &str, value: &str) -> Result<(), String> {
        let parsed: serde_json::Value = serde_json::from_str(value).map_err(|e| e.to_string())?;

        let mut map = self.load_map()?;
        map.insert(key.to_string(), parsed);

        let json = serde_json::to_string_pretty(&map).map_err(|e| e.to_string())?;

        let tmp_path = self.path.with_extension("tmp");
        let parent = self
            .path
            .parent()
            .ok_or_else(|| "sync store path has no parent".to_string())?;
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;

        // Atomic write: tmp + rename, never a half-written store.
        fs::write(&tmp_path, json).map_err(|e| e.to_string())?;
        fs::rename(tmp_path, &self.path).map_err(|e| e.to_string())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_key() {
        let dir = tempdir().unwrap();
        let store = SyncStore::from_path(dir.path().join("sync_store.json"));
        assert_eq!(store.read("categories").unwrap(), None);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let store = SyncStore::from_path(dir.path().join("sync_store.json"));

        store.write("categories", r#"[{"id":"1","name":"Bookmarks"}]"#).unwrap();
        let raw = store.read("categories").unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0]["name"], "Bookmarks");

        // Second key does not clobber the first
        store.write("other", r#"{"a":1}"#).unwrap();
        assert!(store.read("categories").unwrap().is_some());
    }

    #[test]
    fn test_rejects_invalid_json_value() {
        let dir = tempdir().unwrap();
        let store = SyncStore::from_path(dir.path().join("sync_store.json"));
        assert!(store.write("categories", "not json").is_err());
    }

    #[test]
    fn test_recovers_from_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sync_store.json");
        fs::write(&path, "{{{{").unwrap();

        let store = SyncStore::from_path(path);
        assert_eq!(store.read("categories").unwrap(), None);
        store.write("categories", "[]").unwrap();
        assert_eq!(store.read("categories").unwrap().unwrap(), "[]");
    }
}
