//! Local durable storage.
//!
//! Each key maps to one JSON file in the data directory holding a serialized
//! array. Files are read once at startup and rewritten after every mutation.
//! There is no schema versioning.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A keyed entry in local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Cart,
    Products,
    Categories,
    Packages,
    Orders,
}

impl StorageKey {
    /// File name within the data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Cart => "cart.json",
            Self::Products => "products.json",
            Self::Categories => "categories.json",
            Self::Packages => "packages.json",
            Self::Orders => "orders.json",
        }
    }
}

/// JSON-file storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file backing `key`.
    #[must_use]
    pub fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Whether `key` has ever been written.
    #[must_use]
    pub fn exists(&self, key: StorageKey) -> bool {
        self.path(key).exists()
    }

    /// Read the value stored under `key`, or `None` if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be read or parsed.
    pub fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory or file cannot be written.
    pub fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(value)?;
        let tmp = self.dir.join(format!(".{}.tmp", key.file_name()));
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, self.path(key))?;
        Ok(())
    }

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be removed.
    pub fn clear(&self, key: StorageKey) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
