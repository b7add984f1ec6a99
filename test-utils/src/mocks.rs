//! Mock implementations for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use support_admin_client::{KeyValueStorage, MemoryStorage};
use support_common::PlatformError;

/// One recorded storage operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    /// A read of the given key
    Load(String),
    /// A write of the given key
    Store(String),
    /// A removal of the given key
    Remove(String),
}

/// Storage backend that records every operation and can be told to fail
/// writes, for exercising write-through and cleanup paths.
#[derive(Debug, Default)]
pub struct RecordingStorage {
    inner: MemoryStorage,
    ops: Mutex<Vec<StorageOp>>,
    fail_writes: AtomicBool,
}

impl RecordingStorage {
    /// Create an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations seen so far, in order.
    #[must_use]
    pub fn ops(&self) -> Vec<StorageOp> {
        self.ops
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Keys written so far, in order.
    #[must_use]
    pub fn stored_keys(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                StorageOp::Store(key) => Some(key),
                _ => None,
            })
            .collect()
    }

    /// Make every subsequent write or removal fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn record(&self, op: StorageOp) {
        self.ops
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op);
    }

    fn check_writable(&self) -> Result<(), PlatformError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PlatformError::internal("storage write failure injected"));
        }
        Ok(())
    }
}

impl KeyValueStorage for RecordingStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PlatformError> {
        self.record(StorageOp::Load(key.to_string()));
        self.inner.load(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.record(StorageOp::Store(key.to_string()));
        self.check_writable()?;
        self.inner.store(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PlatformError> {
        self.record(StorageOp::Remove(key.to_string()));
        self.check_writable()?;
        self.inner.remove(key)
    }
}
