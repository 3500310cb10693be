use crate::error::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

pub mod file_storage;
pub mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Durable key-value storage of named string slots
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads a slot, returning `None` when it was never written
    async fn load_slot(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the slot contents
    async fn save_slot(&self, key: &str, contents: &str) -> Result<()>;

    /// Deletes a slot; removing a missing slot is not an error
    async fn remove_slot(&self, key: &str) -> Result<()>;
}

/// Typed JSON access to the slots of a [`Storage`] backend
pub struct SlotAdapter {
    backend: Box<dyn Storage>,
}

impl SlotAdapter {
    pub fn new(backend: impl Storage + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Loads and deserializes a slot
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.load_slot(key).await? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    /// Serializes a value and writes it as the full contents of a slot
    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.backend.save_slot(key, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_typed_round_trip() {
        let slots = SlotAdapter::new(MemoryStorage::new());
        let mut value = BTreeMap::new();
        value.insert("a".to_string(), vec![1, 2, 3]);

        slots.save("numbers", &value).await.unwrap();
        let loaded: Option<BTreeMap<String, Vec<i32>>> = slots.load("numbers").await.unwrap();
        assert_eq!(loaded, Some(value));

        let missing: Option<Vec<i32>> = slots.load("other").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_slot_is_a_serialization_error() {
        let backend = MemoryStorage::new();
        backend.save_slot("broken", "{not json").await.unwrap();
        let slots = SlotAdapter::new(backend);

        let result: Result<Option<Vec<i32>>> = slots.load("broken").await;
        assert!(matches!(result, Err(BoardError::SerializationError(_))));
    }
}
