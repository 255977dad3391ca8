use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// String-keyed durable slots holding serialized state.
#[async_trait]
pub trait StateSlotRepository: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been written yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write or overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl StateSlotRepository for InMemoryRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Bundles the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub slots: Arc<dyn StateSlotRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let slots: Arc<dyn StateSlotRepository> = Arc::new(InMemoryRepository::new());
        Self { slots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_overwrite_remove() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get("statev2").await.unwrap(), None);

        repo.put("statev2", "{}").await.unwrap();
        assert_eq!(repo.get("statev2").await.unwrap().as_deref(), Some("{}"));

        repo.put("statev2", r#"{"a":1}"#).await.unwrap();
        assert_eq!(
            repo.get("statev2").await.unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );

        repo.remove("statev2").await.unwrap();
        assert_eq!(repo.get("statev2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_slot_is_empty_not_an_error() {
        let repo = InMemoryRepository::new();
        assert!(matches!(repo.get("never-written").await, Ok(None)));
        assert!(repo.remove("never-written").await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_slots() {
        let storage = Storage::in_memory();
        let other = storage.clone();
        storage.slots.put("k", "v").await.unwrap();
        assert_eq!(other.slots.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
