use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Key-value string storage for persisted collections.
///
/// Values are opaque strings; encoding them is the caller's concern.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, `None` if absent
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key` entirely. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Set aside a value that could not be decoded.
    /// The default leaves it in place for the next save to overwrite.
    fn quarantine(&mut self, _key: &str) -> Result<()> {
        Ok(())
    }
}

/// Store that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            values: HashMap::new(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Seed a raw value, as if written by an earlier session
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store keeping one `<key>.json` file per key in a directory.
/// Writes go to a `.tmp` file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        FileStore { dir }
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        Ok(Some(contents))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory {:?}", self.dir))?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, value)
            .with_context(|| format!("Failed to write to temporary file {:?}", tmp_path))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to rename {:?} to {:?}", tmp_path, path))?;

        log::debug!("Saved {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to remove {:?}", path))?;
            log::debug!("Removed {:?}", path);
        }
        Ok(())
    }

    fn quarantine(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        let backup_path = path.with_extension("json.corrupted");
        fs::rename(&path, &backup_path)
            .with_context(|| format!("Failed to back up {:?} to {:?}", path, backup_path))?;
        log::warn!("Moved unreadable {:?} to {:?}", path, backup_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);

        store.save("k", "[1]").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("[1]"));

        store.remove("k").unwrap();
        assert!(!store.contains("k"));
        store.remove("k").unwrap();
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));

        assert_eq!(store.load("scent_cart").unwrap(), None);
        store.save("scent_cart", "[]").unwrap();
        assert!(store.path_for("scent_cart").exists());
        assert!(!store.path_for("scent_cart").with_extension("json.tmp").exists());
        assert_eq!(store.load("scent_cart").unwrap().as_deref(), Some("[]"));

        store.save("scent_cart", "[1,2]").unwrap();
        assert_eq!(store.load("scent_cart").unwrap().as_deref(), Some("[1,2]"));

        store.remove("scent_cart").unwrap();
        assert!(!store.path_for("scent_cart").exists());
    }

    #[test]
    fn test_file_store_quarantine() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.save("scent_recent", "{not json").unwrap();

        store.quarantine("scent_recent").unwrap();
        assert_eq!(store.load("scent_recent").unwrap(), None);
        assert!(dir.path().join("scent_recent.json.corrupted").exists());
    }
}
