//! Durable local storage for session state.
//!
//! The dashboard persists two string-keyed JSON records (the token pair and
//! the session record) across restarts. Writes are synchronous: a mutation
//! is on disk before the call returns.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use support_common::PlatformError;

/// String-keyed store of JSON-serialized records.
///
/// Implementations must tolerate concurrent access from the UI thread and
/// background tasks; all operations are synchronous and must not be held
/// across awaits by callers.
pub trait KeyValueStorage: Send + Sync {
    /// Read a record. `Ok(None)` when the key has never been written.
    fn load(&self, key: &str) -> Result<Option<String>, PlatformError>;

    /// Write a record, replacing any previous value.
    fn store(&self, key: &str, value: &str) -> Result<(), PlatformError>;

    /// Remove a record. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), PlatformError>;
}

/// File-backed storage: one JSON file per key under a data directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PlatformError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PlatformError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        // Write-then-rename so a crash mid-write never leaves a torn record.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PlatformError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory storage for tests and UI shells without a disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PlatformError> {
        let records = self
            .records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(records.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PlatformError> {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        records.remove(key);
        Ok(())
    }
}
