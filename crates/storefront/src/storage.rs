//! Persistence port for client-side store state.
//!
//! Cart and wishlist state is serialized as one JSON blob per store under a
//! fixed key. The backend is injected, so the stores never care whether the
//! blob lands in a file, a browser's local storage, or a test map.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Storage key for the persisted cart line items.
pub const CART_KEY: &str = "ownit-cart";
/// Storage key for the persisted wishlist items.
pub const WISHLIST_KEY: &str = "ownit-wishlist";

/// Storage backend errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A key/value blob store for persisted session state.
///
/// Implementations must be safe to share across clones of a store. All
/// operations are synchronous; callers treat failures as degraded-mode
/// signals, not fatal errors.
pub trait StorageBackend: Send + Sync {
    /// Read the blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the blob stored under `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one `<key>.json` file per key under a data directory.
///
/// The stand-in for browser local storage. The directory is created lazily on
/// the first write.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        // Keys are fixed constants, but reject separators anyway so a bad
        // caller cannot escape the data directory.
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::Io(e.to_string()))?;
        std::fs::write(&path, value).map_err(|e| StorageError::Io(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key with a blob, e.g. to simulate a previous session.
    pub fn preload(&self, key: &str, value: &str) {
        if let Ok(mut blobs) = self.blobs.write() {
            blobs.insert(key.to_string(), value.to_string());
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.blobs
            .read()
            .map(|blobs| blobs.get(key).cloned())
            .map_err(|_| StorageError::Io("storage lock poisoned".to_string()))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs
            .write()
            .map(|mut blobs| {
                blobs.insert(key.to_string(), value.to_string());
            })
            .map_err(|_| StorageError::Io("storage lock poisoned".to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.blobs
            .write()
            .map(|mut blobs| {
                blobs.remove(key);
            })
            .map_err(|_| StorageError::Io("storage lock poisoned".to_string()))
    }
}

/// Load and deserialize persisted state, degrading to `T::default()`.
///
/// Unreadable storage and malformed payloads are treated identically: the
/// store starts empty and a warning is logged. Persisted state is a cache of
/// the session, never a source of truth worth failing over.
pub(crate) fn load_or_default<T>(storage: &dyn StorageBackend, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match storage.load(key) {
        Ok(Some(blob)) => match serde_json::from_str(&blob) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding malformed persisted state");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Storage unavailable, starting empty");
            T::default()
        }
    }
}

/// Serialize and persist store state, logging instead of failing.
///
/// A write failure leaves the in-memory state authoritative for the rest of
/// the session.
pub(crate) fn persist<T: serde::Serialize>(storage: &dyn StorageBackend, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(blob) => {
            if let Err(e) = storage.save(key, &blob) {
                tracing::warn!(key, error = %e, "Failed to persist state, keeping in-memory copy");
            }
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to serialize state");
        }
    }
}
