use crate::{
    error::{BoardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage: each slot is a `<key>.json` file in a data directory
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const SLOT_EXTENSION: &'static str = "json";

    /// Creates a new FileStorage rooted at the given data directory
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn slot_file(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(BoardError::StorageError(format!("invalid slot key '{}'", key)));
        }
        Ok(self
            .root_path
            .join(format!("{}.{}", key, Self::SLOT_EXTENSION)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load_slot(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.slot_file(key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn save_slot(&self, key: &str, contents: &str) -> Result<()> {
        let file_path = self.slot_file(key)?;
        self.ensure_directory_exists(&self.root_path).await?;

        // Write a sibling file, then rename it over the slot
        let tmp_path = file_path.with_extension("json.tmp");
        fs::write(&tmp_path, contents).await?;
        fs::rename(&tmp_path, &file_path).await?;
        Ok(())
    }

    async fn remove_slot(&self, key: &str) -> Result<()> {
        let file_path = self.slot_file(key)?;

        if file_path.exists() {
            fs::remove_file(file_path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_slot_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.load_slot("taskBoards").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_slot_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("nested"));

        storage.save_slot("taskBoards", "[]").await.unwrap();
        assert!(temp_dir.path().join("nested/taskBoards.json").exists());

        let loaded = storage.load_slot("taskBoards").await.unwrap();
        assert_eq!(loaded.as_deref(), Some("[]"));

        storage.save_slot("taskBoards", "[1]").await.unwrap();
        let loaded = storage.load_slot("taskBoards").await.unwrap();
        assert_eq!(loaded.as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_remove_slot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.save_slot("k", "v").await.unwrap();
        storage.remove_slot("k").await.unwrap();
        assert!(storage.load_slot("k").await.unwrap().is_none());

        assert!(storage.remove_slot("k").await.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                storage.save_slot(key, "x").await,
                Err(BoardError::StorageError(_))
            ));
        }
    }
}
