//! Filesystem key-value cache.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use mockdesk_core::error::{InvalidInputError, StorageError};
use mockdesk_core::traits::KeyValueStore;
use mockdesk_core::{Error, Result};

use crate::io::{read_optional, remove_optional, with_lock, write_atomic};

const EXTENSION: &str = "json";
const LOCK_FILE: &str = ".lock";

fn map_io(key: &str, err: std::io::Error) -> Error {
    StorageError::Io {
        key: key.to_string(),
        message: err.to_string(),
    }
    .into()
}

/// Metadata about one cached value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    /// Size of the stored value in bytes.
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// One JSON file per key under a root directory.
///
/// Writes go through a temp file and a rename under an exclusive lock, so
/// concurrent invocations never observe half-written values.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, EXTENSION)))
    }

    /// All cached keys, sorted, with their sizes and modification times.
    pub fn entries(&self) -> Result<Vec<CacheEntry>> {
        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io("*", e)),
        };

        let mut entries = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|e| map_io("*", e))?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_key(key).is_err() {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| map_io(key, e))?;
            entries.push(CacheEntry {
                key: key.to_string(),
                size: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            });
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    /// Remove every cached value. Returns the keys removed.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn clear(&self) -> Result<Vec<String>> {
        let keys: Vec<String> = self.entries()?.into_iter().map(|e| e.key).collect();
        for key in &keys {
            self.remove(key)?;
        }
        debug!(count = keys.len(), "Cleared cache");
        Ok(keys)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        read_optional(&path).map_err(|e| map_io(key, e))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        with_lock(&self.lock_path(), || write_atomic(&path, value)).map_err(|e| map_io(key, e))?;
        debug!(key, bytes = value.len(), "Cached value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        with_lock(&self.lock_path(), || remove_optional(&path)).map_err(|e| map_io(key, e))
    }
}

/// Keys become file names: lowercase ASCII letters, digits, `-` and `_`.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key.len() <= 64
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(InvalidInputError::Other {
            message: format!("invalid cache key: {:?}", key),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("posts").unwrap(), None);
        store.set("posts", "[{\"id\":1}]").unwrap();
        assert_eq!(store.get("posts").unwrap().as_deref(), Some("[{\"id\":1}]"));

        store.set("posts", "[]").unwrap();
        assert_eq!(store.get("posts").unwrap().as_deref(), Some("[]"));

        store.remove("posts").unwrap();
        assert_eq!(store.get("posts").unwrap(), None);
        store.remove("posts").unwrap();
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        for key in ["", "../escape", "Posts", "a/b", "with space"] {
            assert!(store.set(key, "x").is_err(), "{key:?} accepted");
        }
    }

    #[test]
    fn entries_lists_keys_with_metadata() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("users", "[]").unwrap();
        store.set("auth", "true").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let entries = store.entries().unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["auth", "users"]);
        assert_eq!(entries[0].size, 4);
        assert!(entries[0].modified.is_some());
    }

    #[test]
    fn entries_of_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        assert!(store.entries().unwrap().is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("posts", "[]").unwrap();
        store.set("users", "[]").unwrap();

        let removed = store.clear().unwrap();
        assert_eq!(removed, vec!["posts", "users"]);
        assert!(store.entries().unwrap().is_empty());
    }
}
