use crate::{domain::ids::ColumnId, error::BoardError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Kind of data a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Dropdown,
    /// Like `Dropdown`, rendered as a colored badge
    Status,
}

impl ColumnType {
    /// Whether the column carries a list of selectable options
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Status)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Number => write!(f, "number"),
            Self::Dropdown => write!(f, "dropdown"),
            Self::Status => write!(f, "status"),
        }
    }
}

impl FromStr for ColumnType {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "dropdown" => Ok(Self::Dropdown),
            "status" => Ok(Self::Status),
            _ => Err(BoardError::InvalidColumnType(s.to_string())),
        }
    }
}

/// A typed field definition shared by every row of a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            options: kind.has_options().then(Vec::new),
            width: None,
        }
    }

    /// Sets the options; ignored for column types without options
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.kind.has_options() {
            self.options = Some(options.into_iter().map(Into::into).collect());
        }
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Applies a partial update. Existing cell values are left as they are
    /// even when the type changes.
    pub fn apply(&mut self, patch: ColumnPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(options) = patch.options {
            self.options = options;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
    }
}

/// Partial update of a [`Column`]. The nested options clear a field when set
/// to `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPatch {
    pub title: Option<String>,
    pub kind: Option<ColumnType>,
    pub options: Option<Option<Vec<String>>>,
    pub width: Option<Option<f64>>,
}

impl ColumnPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Parses an options text box: one option per line, trimmed, blanks dropped
pub fn parse_options(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
