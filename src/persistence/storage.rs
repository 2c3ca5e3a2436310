//! Key-value record storage

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::constants::paths;

/// Text records addressed by key. Writes replace the whole record.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when no record exists under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, text: &str) -> Result<()>;
}

/// One file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data_dir>/gradient-fader`, or `./gradient-fader` if the platform has no data dir
    pub fn default_dir() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(paths::APP_DIR);
        path
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{}", paths::RECORD_EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key);
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), bytes = text.len(), "Read record");
                Ok(Some(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No record on disk");
                Ok(None)
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read record from {:?}", path)),
        }
    }

    fn set(&self, key: &str, text: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create storage directory {:?}", self.dir))?;

        // Write beside the record and rename over it so readers never see a partial file
        let path = self.record_path(key);
        let staging = path.with_extension(format!("{}.tmp", paths::RECORD_EXTENSION));
        fs::write(&staging, text)
            .with_context(|| format!("Failed to write record to {:?}", staging))?;
        fs::rename(&staging, &path)
            .with_context(|| format!("Failed to move {:?} into place at {:?}", staging, path))?;

        info!(path = %path.display(), "Wrote record");
        Ok(())
    }
}

/// In-process store, used where touching the filesystem is unwanted
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let records = self
            .records
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, text: &str) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        records.insert(key.to_string(), text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("shaderInputs").unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("records");
        let store = FileStore::new(&nested);

        store.set("shaderInputs", "{\"alpha\":1}").unwrap();

        assert!(nested.join("shaderInputs.json").exists());
        assert_eq!(store.get("shaderInputs").unwrap().as_deref(), Some("{\"alpha\":1}"));
    }

    #[test]
    fn test_file_store_overwrites_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_file_store_shorter_overwrite_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("k", "{\"alpha\":0.123456}").unwrap();
        store.set("k", "{\"alpha\":1}").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("{\"alpha\":1}"));
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("k.json")]);
    }

    #[test]
    fn test_file_store_read_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the record file should be cannot be read as text
        fs::create_dir_all(dir.path().join("k.json")).unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.get("k").is_err());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
