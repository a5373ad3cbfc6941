use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use crate::storage::{Storage, StorageError};

/// An ordered list that lives under one storage key.
///
/// The whole list is written back on every mutation, before the mutating
/// call returns. A mutation whose write fails is not applied, so the
/// in-memory list and the stored copy never diverge.
pub struct PersistedCollection<T, S> {
    key: String,
    items: Vec<T>,
    storage: S,
}

impl<T, S> PersistedCollection<T, S>
where
    T: Serialize + DeserializeOwned + Clone,
    S: Storage,
{
    /// Read `key`, falling back to `default` when it is absent or unreadable,
    /// and write the result back so storage reflects the initial value.
    pub fn load(storage: S, key: impl Into<String>, default: Vec<T>) -> Result<Self, StorageError> {
        let key = key.into();
        let items = match storage.get_item(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(items) => {
                    debug!("Loaded {} items from '{}'", items.len(), key);
                    items
                }
                Err(e) => {
                    warn!("Stored value for '{}' is unreadable ({}), using default", key, e);
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!("Failed to read '{}' from storage ({}), using default", key, e);
                default
            }
        };

        let mut collection = Self { key, items: Vec::new(), storage };
        collection.write(items)?;
        Ok(collection)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply `f` to a copy of the list, persist the copy, then adopt it
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R, StorageError> {
        let mut next = self.items.clone();
        let out = f(&mut next);
        self.write(next)?;
        Ok(out)
    }

    pub fn push(&mut self, item: T) -> Result<(), StorageError> {
        self.update(|items| items.push(item))
    }

    /// Keep only items matching `keep`; returns how many were removed
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> Result<usize, StorageError> {
        self.update(|items| {
            let before = items.len();
            items.retain(|item| keep(item));
            before - items.len()
        })
    }

    pub fn replace_all(&mut self, items: Vec<T>) -> Result<(), StorageError> {
        self.write(items)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.write(Vec::new())
    }

    fn write(&mut self, items: Vec<T>) -> Result<(), StorageError> {
        let json = serde_json::to_string(&items).map_err(|source| StorageError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.storage.set_item(&self.key, json)?;
        self.items = items;
        Ok(())
    }
}
