use crate::{error::Result, storage::Storage};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// In-process storage; contents live only as long as the value and its clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots currently stored
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load_slot(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn save_slot(&self, key: &str, contents: &str) -> Result<()> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }

    async fn remove_slot(&self, key: &str) -> Result<()> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_contents() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.save_slot("k", "v").await.unwrap();
        assert_eq!(handle.load_slot("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(handle.len().await, 1);

        handle.remove_slot("k").await.unwrap();
        assert!(storage.is_empty().await);
        assert!(storage.remove_slot("k").await.is_ok());
    }
}
