//! Key-value storage capability.
//!
//! ERROR HANDLING
//! ==============
//! Browsers throw from `localStorage` in private or sandboxed contexts, so
//! both operations return [`StorageError`]. Callers decide the fallback; the
//! theme preference treats any failure as "no stored value".

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

/// Error returned by [`Storage`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The storage area could not be reached at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The storage area refused a write (quota, policy).
    #[error("storage rejected write of {key}: {reason}")]
    Rejected { key: String, reason: String },
}

/// String key-value store.
pub trait Storage {
    /// Read the value under `key`; `Ok(None)` when the key is unset.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
