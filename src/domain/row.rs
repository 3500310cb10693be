use crate::domain::{
    column::{Column, ColumnType},
    ids::{ColumnId, RowId},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// Value stored in a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Value a new cell starts with: 0 for number columns, empty text otherwise
    pub fn default_for(kind: ColumnType) -> Self {
        match kind {
            ColumnType::Number => Self::Number(0.0),
            _ => Self::Text(String::new()),
        }
    }

    /// Converts committed editor input into a value for the column type.
    /// Number columns fall back to 0 when the input is not a finite number.
    pub fn from_input(kind: ColumnType, input: &str) -> Self {
        match kind {
            ColumnType::Number => {
                let trimmed = input.trim();
                let number = if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite())
                        .unwrap_or(0.0)
                };
                Self::Number(number)
            }
            _ => Self::Text(input.to_string()),
        }
    }

    /// Replaces NaN and infinite numbers with 0, which JSON cannot carry
    pub fn finite(self) -> Self {
        match self {
            Self::Number(n) if !n.is_finite() => Self::Number(0.0),
            other => other,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// A (column reference, value) pair within a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub column_id: ColumnId,
    pub value: CellValue,
}

impl Cell {
    pub fn new(column_id: impl Into<ColumnId>, value: impl Into<CellValue>) -> Self {
        Self {
            column_id: column_id.into(),
            value: value.into(),
        }
    }

    /// Default-valued cell for the given column
    pub fn for_column(column: &Column) -> Self {
        Self {
            column_id: column.id.clone(),
            value: CellValue::default_for(column.kind),
        }
    }
}

/// One record of a group's table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub cells: Vec<Cell>,
}

impl Row {
    /// Creates a row holding one default-valued cell per column
    pub fn new(id: RowId, columns: &[Column]) -> Self {
        Self {
            id,
            cells: columns.iter().map(Cell::for_column).collect(),
        }
    }

    pub fn cell(&self, column_id: &ColumnId) -> Option<&Cell> {
        self.cells.iter().find(|cell| &cell.column_id == column_id)
    }

    /// Sets the value of the cell for `column_id`. Returns false when the row
    /// has no such cell; no cell is created in that case. Non-finite numbers
    /// are stored as 0.
    pub fn set_value(&mut self, column_id: &ColumnId, value: CellValue) -> bool {
        match self.cells.iter_mut().find(|cell| &cell.column_id == column_id) {
            Some(cell) => {
                cell.value = value.finite();
                true
            }
            None => false,
        }
    }

    /// Brings the cells in line with `columns`: one cell per column in column
    /// order, keeping existing values, backfilling missing cells with defaults
    /// and dropping cells for unknown or repeated column ids. Non-finite
    /// numbers become 0.
    pub fn reconcile(&mut self, columns: &[Column]) {
        let mut seen = HashSet::new();
        let mut existing: Vec<Cell> = std::mem::take(&mut self.cells)
            .into_iter()
            .filter(|cell| seen.insert(cell.column_id.clone()))
            .collect();

        self.cells = columns
            .iter()
            .map(|column| {
                match existing.iter().position(|cell| cell.column_id == column.id) {
                    Some(pos) => {
                        let cell = existing.swap_remove(pos);
                        Cell {
                            column_id: cell.column_id,
                            value: cell.value.finite(),
                        }
                    }
                    None => Cell::for_column(column),
                }
            })
            .collect();
    }

    /// Whether the row's cells match `columns` one-to-one
    pub fn is_consistent_with(&self, columns: &[Column]) -> bool {
        if self.cells.len() != columns.len() {
            return false;
        }
        let cell_ids: HashSet<&ColumnId> = self.cells.iter().map(|c| &c.column_id).collect();
        cell_ids.len() == columns.len() && columns.iter().all(|col| cell_ids.contains(&col.id))
    }
}

/// Partial update of a [`Row`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowPatch {
    pub cells: Option<Vec<Cell>>,
}
