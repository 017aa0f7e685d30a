//! Load and save the board snapshot through a key-value store

use crate::storage::board::Snapshot;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Fixed key the snapshot is stored under
pub const STORAGE_KEY: &str = "kanban-todos-projects";

/// Errors related to persistence
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse stored state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage quota exceeded")]
    QuotaExceeded,
}

/// A minimal string key-value store
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Write `value` under `key`, replacing any prior value
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileKeyValueStore { dir: dir.into() }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;

        // Write aside and rename so a torn write never replaces the old value
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store, optionally limited in size
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryKeyValueStore {
    /// Create an unlimited store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects values longer than `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        MemoryKeyValueStore {
            values: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Raw value under `key`
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.quota.is_some_and(|quota| value.len() > quota) {
            return Err(PersistenceError::QuotaExceeded);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the whole snapshot under [`STORAGE_KEY`].
///
/// Neither direction ever fails from the caller's point of view: problems are
/// logged and reported as "nothing stored" or "not saved".
#[derive(Debug)]
pub struct Persistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Persistence { store }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored snapshot; None if absent or unreadable
    pub fn load(&self) -> Option<Snapshot> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(PersistenceError::Json(e)) => {
                log::warn!("Ignoring unreadable saved state: {}", e);
                None
            }
            Err(e) => {
                log::error!("Error loading saved state: {}", e);
                None
            }
        }
    }

    /// Save the snapshot, returning whether it was written
    pub fn save(&mut self, snapshot: &Snapshot) -> bool {
        match self.try_save(snapshot) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error saving state: {}", e);
                false
            }
        }
    }

    fn try_load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        match self.store.get(STORAGE_KEY)? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    fn try_save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let content = serde_json::to_string(snapshot)?;
        self.store.set(STORAGE_KEY, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnKey, DEFAULT_PROJECT_ID, Project, Task};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        let mut launch = Project::new("Launch");
        let created = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        launch
            .columns
            .get_mut(ColumnKey::Done)
            .tasks
            .push(Task::new(1717405200000, "Write spec", created, true));

        let mut snapshot = Snapshot::new();
        snapshot.insert(DEFAULT_PROJECT_ID.to_string(), Project::main());
        snapshot.insert("1717405100000".to_string(), launch);
        snapshot
    }

    #[test]
    fn test_load_absent() {
        let persistence = Persistence::new(MemoryKeyValueStore::new());
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_roundtrip_memory() {
        let mut persistence = Persistence::new(MemoryKeyValueStore::new());
        let snapshot = sample_snapshot();
        assert!(persistence.save(&snapshot));
        assert_eq!(persistence.load(), Some(snapshot));
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        let mut persistence = Persistence::new(MemoryKeyValueStore::new());
        let snapshot = sample_snapshot();
        persistence.save(&snapshot);
        let loaded = persistence.load().unwrap();
        let keys: Vec<_> = loaded.keys().cloned().collect();
        assert_eq!(keys, vec!["default", "1717405100000"]);
    }

    #[test]
    fn test_roundtrip_file() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp.path().join("state"));
        let mut persistence = Persistence::new(store);
        let snapshot = sample_snapshot();

        assert!(persistence.save(&snapshot));
        assert!(persistence.store().path_for(STORAGE_KEY).exists());
        assert_eq!(persistence.load(), Some(snapshot));
    }

    #[test]
    fn test_save_overwrites() {
        let mut persistence = Persistence::new(MemoryKeyValueStore::new());
        persistence.save(&sample_snapshot());

        let mut smaller = Snapshot::new();
        smaller.insert(DEFAULT_PROJECT_ID.to_string(), Project::main());
        persistence.save(&smaller);

        assert_eq!(persistence.load(), Some(smaller));
    }

    #[test]
    fn test_corrupt_state_is_absent() {
        let mut store = MemoryKeyValueStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();
        let persistence = Persistence::new(store);
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_corrupt_file_is_absent() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp.path());
        std::fs::write(store.path_for(STORAGE_KEY), "[1, 2, 3]").unwrap();
        let persistence = Persistence::new(store);
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_quota_exceeded_not_saved() {
        let mut persistence = Persistence::new(MemoryKeyValueStore::with_quota(16));
        assert!(!persistence.save(&sample_snapshot()));
        assert!(persistence.store().raw(STORAGE_KEY).is_none());
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_tolerates_unknown_fields() {
        let mut store = MemoryKeyValueStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"{"default": {"name": "Main Project", "color": "blue", "columns": {}}}"#,
            )
            .unwrap();
        let persistence = Persistence::new(store);
        let loaded = persistence.load().unwrap();
        assert_eq!(loaded[DEFAULT_PROJECT_ID], Project::main());
    }

    #[test]
    fn test_missing_column_title_keeps_tasks() {
        let mut store = MemoryKeyValueStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"{"default": {"name": "Main Project", "columns": {"done": {"tasks": [
                    {"id": 5, "text": "Shipped", "createdAt": "2024-06-03T09:00:00Z", "completed": true}
                ]}}}}"#,
            )
            .unwrap();
        let persistence = Persistence::new(store);

        let loaded = persistence.load().unwrap();
        let done = loaded[DEFAULT_PROJECT_ID].columns.get(ColumnKey::Done);
        assert_eq!(done.title, "Done");
        assert_eq!(done.tasks.len(), 1);
        assert_eq!(done.tasks[0].text, "Shipped");
    }
}
