//! File-backed store standing in for browser local storage.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::{KeyValueStore, StorageError};

/// Key-value store persisted as a single JSON object on disk.
///
/// The file is read once when the store is opened; every `set` and
/// `remove` rewrites it. Writes go to a sibling temp file that is then
/// renamed over the original, so a crash mid-write leaves the previous
/// contents intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing values if the file exists.
    ///
    /// An unreadable or malformed file is logged and the store starts empty;
    /// it will be replaced on the next write.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let values = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse storage file");
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read storage file");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "File storage opened");

        Self {
            path,
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current map to disk.
    fn persist(&self, values: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply `change` to a copy of the map, persist it, then install it.
    fn update(
        &self,
        change: impl FnOnce(&mut HashMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        let mut next = values.clone();
        change(&mut next);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|values| {
            values.remove(key);
        })
    }
}
