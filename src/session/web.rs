use crate::errors::{AfterimageError, Result};
use crate::session::store::KeyValueStore;

/// Browser `localStorage` backend.
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| AfterimageError::StorageError("no global window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| AfterimageError::StorageError(format!("{e:?}")))?
            .ok_or_else(|| AfterimageError::StorageError("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| AfterimageError::StorageError(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| AfterimageError::StorageError(format!("{e:?}")))
    }
}
