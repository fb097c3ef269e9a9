//! Persisted game state.
//!
//! A small key-value contract modelled on browser local storage. Values are
//! JSON so any provider can store them as text.
//!
//! Keys written by the game:
//!
//! | key                        | value                   |
//! |----------------------------|-------------------------|
//! | `answerIndex`              | integer                 |
//! | `lastRotationEpochSeconds` | integer                 |
//! | `attempts`                 | array of strings        |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

pub const ANSWER_INDEX_KEY: &str = "answerIndex";
pub const LAST_ROTATION_KEY: &str = "lastRotationEpochSeconds";
pub const ATTEMPTS_KEY: &str = "attempts";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed stored data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unexpected value for key '{key}'")]
    UnexpectedValue { key: String },
}

/// Key-value storage provider.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage. State is lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, Value>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage backed by a single JSON object on disk.
///
/// The whole object is rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl FileStorage {
    /// Open a storage file, starting empty if it does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StorageError::Io {
                    context: format!("reading {}", path.display()),
                    source,
                })
            }
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::Io {
            context: format!("writing {}", self.path.display()),
            source,
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            // Keep memory in step with what is on disk.
            match previous {
                Some(prev) => self.entries.insert(key.to_string(), prev),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if let Some(previous) = self.entries.remove(key) {
            if let Err(e) = self.flush() {
                self.entries.insert(key.to_string(), previous);
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Read an integer value.
pub fn read_i64<S: Storage + ?Sized>(storage: &S, key: &str) -> Result<Option<i64>, StorageError> {
    match storage.get(key)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| StorageError::UnexpectedValue {
                key: key.to_string(),
            }),
    }
}

/// Read a list of strings.
pub fn read_strings<S: Storage + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Option<Vec<String>>, StorageError> {
    match storage.get(key)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|_| StorageError::UnexpectedValue {
                key: key.to_string(),
            }),
    }
}
