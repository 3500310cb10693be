use crate::{
    domain::{Column, ColumnType},
    error::{BoardError, Result},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Store configuration: where the document is persisted and what new
/// boards and groups start with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Name of the storage slot holding the boards document
    pub storage_key: String,
    /// Title of the board synthesized on first run
    pub default_board_title: String,
    /// Title of the group synthesized on first run
    pub default_group_title: String,
    /// Column set copied into every newly created group
    pub default_columns: Vec<Column>,
}

impl StoreConfig {
    pub const DEFAULT_STORAGE_KEY: &'static str = "taskBoards";

    /// Parses a JSON config; missing fields take their default values
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(BoardError::ConfigError(
                "storage key must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.default_columns {
            if !seen.insert(&column.id) {
                return Err(BoardError::ConfigError(format!(
                    "duplicate default column id '{}'",
                    column.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            default_board_title: "My Board".to_string(),
            default_group_title: "Main Tasks".to_string(),
            default_columns: vec![
                Column::new("1", "Title", ColumnType::Text).with_width(200.0),
                Column::new("2", "Seller", ColumnType::Text).with_width(200.0),
                Column::new("3", "Buyer", ColumnType::Text).with_width(200.0),
                Column::new("4", "Status", ColumnType::Status)
                    .with_options(["To Do", "In Progress", "Done"])
                    .with_width(120.0),
                Column::new("5", "Priority", ColumnType::Dropdown)
                    .with_options(["Low", "Medium", "High"])
                    .with_width(100.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "taskBoards");
        assert_eq!(config.default_columns.len(), 5);

        let titles: Vec<&str> = config.default_columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Title", "Seller", "Buyer", "Status", "Priority"]);
        assert_eq!(config.default_columns[3].kind, ColumnType::Status);
        assert_eq!(config.default_columns[4].kind, ColumnType::Dropdown);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = StoreConfig::from_json_str(r#"{"storageKey":"boards-v2"}"#).unwrap();
        assert_eq!(config.storage_key, "boards-v2");
        assert_eq!(config.default_board_title, "My Board");
        assert_eq!(config.default_columns.len(), 5);
    }

    #[test]
    fn test_rejects_duplicate_column_ids() {
        let json = r#"{"defaultColumns":[
            {"id":"1","title":"A","type":"text"},
            {"id":"1","title":"B","type":"number"}
        ]}"#;
        assert!(matches!(
            StoreConfig::from_json_str(json),
            Err(BoardError::ConfigError(_))
        ));
    }

    #[test]
    fn test_rejects_empty_storage_key() {
        assert!(StoreConfig::from_json_str(r#"{"storageKey":" "}"#).is_err());
    }
}
