//! Raw key-value storage substrate.
//!
//! [`StorageBackend`] is the equivalent of the browser's local storage API:
//! string keys, string values, and every operation can fail (disabled
//! storage, full quota, I/O errors). Backends report failures as
//! [`StorageError`]; translating those into non-fatal results is the
//! gateway's job, not the backend's.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

/// Errors produced by a storage backend.
///
/// These never cross the gateway boundary; the gateway reports them and
/// degrades to a no-op result.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failure (file backends)
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The substrate refused the write because it is full
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// The substrate is not usable at all (e.g. disabled by configuration)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Internal lock was poisoned by a panicking writer
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key-value storage substrate.
///
/// All operations are synchronous and may block briefly. Implementations
/// must be safe to share across threads; the gateway and middleware hold
/// them behind `Arc`.
pub trait StorageBackend: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the write cannot be performed
    /// (quota exceeded, I/O failure, storage disabled).
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read the value stored under `key`, or `None` when the key is absent.
    ///
    /// Absence is not an error: `Ok(None)` means "no value", `Err` means
    /// the read itself failed.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the read fails.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is Ok.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the removal fails.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<B> {
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-memory storage backend.
///
/// State survives for the lifetime of the process only. Useful as the
/// substrate in tests and for callers that want the full persistence
/// pipeline without durability.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// File-backed storage backend.
///
/// Each key is stored as one file under the backing directory, so state
/// survives across sessions. Keys are namespaced dotted names (no path
/// separators), which map directly to file names.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a file store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StorageBackend for FileStorage {
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value).map_err(|e| match e.kind() {
            io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => {
                StorageError::QuotaExceeded
            }
            _ => StorageError::Io(e),
        })
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}
