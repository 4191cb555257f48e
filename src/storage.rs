//! Durable key-value storage for cart snapshots and the pending discount code.
//!
//! Mirrors browser local-storage semantics: reads return `None` rather than
//! erroring, writes are last-write-wins, and I/O failures are logged and
//! swallowed so no cart mutation can fail on a storage problem.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::config;
use crate::error::Result;

/// Pluggable persistence boundary used by the cart store.
///
/// Implementations must be infallible from the caller's point of view;
/// failures are an implementation's own business to log.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

// ---------------------------------------------------------------------------
// FileStore — One file per key under a data directory
// ---------------------------------------------------------------------------

/// Filesystem-backed store, one file per key.
///
/// Writes go to a temp file first and rename on success, so an interrupted
/// write never leaves a corrupt snapshot behind.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `data_dir`, or the platform default when
    /// `None`. Creates the directory if it does not exist.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { data_dir: dir })
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed short identifiers; strip anything path-like anyway.
        let safe: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        self.data_dir.join(safe)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        if path.exists() {
            fs::read_to_string(&path).ok()
        } else {
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        let result = fs::write(&tmp, value).and_then(|_| fs::rename(&tmp, &path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            tracing::warn!(key, error = %e, "failed to persist value");
        }
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}

// ---------------------------------------------------------------------------
// MemoryStore — Ephemeral store for tests and in-memory sessions
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
