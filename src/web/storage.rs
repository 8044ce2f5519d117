//! `Storage` over `window.localStorage`.

use web_sys::Window;

use super::describe;
use crate::storage::{Storage, StorageError};

/// Resolves `localStorage` on every call; the property getter itself throws
/// when storage is disabled, so there is nothing useful to cache.
#[derive(Clone, Debug)]
pub struct BrowserStorage {
    window: Window,
}

impl BrowserStorage {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn local_storage(&self) -> Result<web_sys::Storage, StorageError> {
        match self.window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable("localStorage is not exposed".to_owned())),
            Err(err) => Err(StorageError::Unavailable(describe(&err))),
        }
    }
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.local_storage()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(describe(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.local_storage()?.set_item(key, value).map_err(|err| StorageError::Rejected {
            key: key.to_owned(),
            reason: describe(&err),
        })
    }
}
