//! Durable local settings
//!
//! A small JSON-backed key-value file under the configured data directory.
//! The only production entry is the resolved tenant id, but the store is
//! key-agnostic so future client-local settings land in the same file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ClientResult;

/// Storage key for the resolved tenant id.
pub const ADMIN_ID_KEY: &str = "admin_id";

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    entries: HashMap<String, String>,
}

/// JSON-file backed key-value store.
///
/// Writes go to disk first and are only then committed to memory, so a
/// failed write leaves the in-memory view unchanged.
#[derive(Debug)]
pub struct SettingsStore {
    file_path: PathBuf,
    data: SettingsFile,
}

impl SettingsStore {
    /// Load the settings file from the data directory; a missing file is
    /// an empty store.
    pub fn load(data_dir: &Path) -> ClientResult<Self> {
        let file_path = data_dir.join(SETTINGS_FILE);

        let data = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            serde_json::from_str(&content)?
        } else {
            SettingsFile::default()
        };

        Ok(Self { file_path, data })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.entries.get(key).map(String::as_str)
    }

    /// Persist a value. Memory is updated only after the write succeeds.
    pub fn set(&mut self, key: &str, value: &str) -> ClientResult<()> {
        let mut updated = self.data.clone();
        updated.entries.insert(key.to_string(), value.to_string());
        self.save(&updated)?;
        self.data = updated;
        Ok(())
    }

    /// Remove a value. Memory is updated only after the write succeeds.
    pub fn remove(&mut self, key: &str) -> ClientResult<()> {
        let mut updated = self.data.clone();
        updated.entries.remove(key);
        self.save(&updated)?;
        self.data = updated;
        Ok(())
    }

    fn save(&self, data: &SettingsFile) -> ClientResult<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path()).unwrap();
        assert!(store.get(ADMIN_ID_KEY).is_none());
    }

    #[test]
    fn test_set_persists_across_loads() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = SettingsStore::load(dir.path()).unwrap();
        store.set(ADMIN_ID_KEY, "tenant-7").unwrap();
        assert_eq!(store.get(ADMIN_ID_KEY), Some("tenant-7"));

        let reloaded = SettingsStore::load(dir.path()).unwrap();
        assert_eq!(reloaded.get(ADMIN_ID_KEY), Some("tenant-7"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = SettingsStore::load(dir.path()).unwrap();
        store.set(ADMIN_ID_KEY, "tenant-7").unwrap();
        store.remove(ADMIN_ID_KEY).unwrap();

        let reloaded = SettingsStore::load(dir.path()).unwrap();
        assert!(reloaded.get(ADMIN_ID_KEY).is_none());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        // Parent of the settings file is a regular file, so the write fails
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, b"not a directory").unwrap();

        let mut store = SettingsStore::load(&blocked.join("sub")).unwrap();
        assert!(store.set(ADMIN_ID_KEY, "tenant-7").is_err());
        assert!(store.get(ADMIN_ID_KEY).is_none());
    }
}
