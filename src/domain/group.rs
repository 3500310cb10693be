use crate::domain::{
    column::Column,
    ids::{ColumnId, GroupId, RowId},
    row::{Cell, CellValue, Row},
};
use serde::{Deserialize, Serialize};

/// A titled, collapsible table within a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    #[serde(default)]
    pub is_collapsed: bool,
    #[serde(default)]
    pub order: i64,
}

impl Group {
    pub fn new(id: GroupId, title: impl Into<String>, columns: Vec<Column>, order: i64) -> Self {
        Self {
            id,
            title: title.into(),
            columns,
            rows: Vec::new(),
            is_collapsed: false,
            order,
        }
    }

    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|col| &col.id == column_id)
    }

    pub fn row(&self, row_id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|row| &row.id == row_id)
    }

    pub fn row_mut(&mut self, row_id: &RowId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| &row.id == row_id)
    }

    /// Appends a column and a default-valued cell for it on every row
    pub fn push_column(&mut self, column: Column) {
        for row in &mut self.rows {
            row.cells.push(Cell::for_column(&column));
        }
        self.columns.push(column);
    }

    /// Removes a column together with its cell on every row
    pub fn remove_column(&mut self, column_id: &ColumnId) -> Option<Column> {
        let pos = self.columns.iter().position(|col| &col.id == column_id)?;
        for row in &mut self.rows {
            row.cells.retain(|cell| &cell.column_id != column_id);
        }
        Some(self.columns.remove(pos))
    }

    /// Appends a row with one default cell per current column
    pub fn push_row(&mut self, row_id: RowId) -> &Row {
        let row = Row::new(row_id, &self.columns);
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    pub fn remove_row(&mut self, row_id: &RowId) -> Option<Row> {
        let pos = self.rows.iter().position(|row| &row.id == row_id)?;
        Some(self.rows.remove(pos))
    }

    /// Appends a cell with the given column id and value to every row.
    /// Duplicate column ids are not checked; non-finite numbers become 0.
    pub fn backfill_cells(&mut self, column_id: &ColumnId, value: &CellValue) {
        let value = value.clone().finite();
        for row in &mut self.rows {
            row.cells.push(Cell {
                column_id: column_id.clone(),
                value: value.clone(),
            });
        }
    }

    /// Reconciles every row against the group's columns
    pub fn reconcile_rows(&mut self) {
        let Self { columns, rows, .. } = self;
        for row in rows.iter_mut() {
            row.reconcile(columns);
        }
    }

    /// Whether every row holds exactly one cell per column
    pub fn is_consistent(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.is_consistent_with(&self.columns))
    }

    pub fn apply(&mut self, patch: GroupPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(is_collapsed) = patch.is_collapsed {
            self.is_collapsed = is_collapsed;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }
}

/// Partial update of a [`Group`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupPatch {
    pub title: Option<String>,
    pub is_collapsed: Option<bool>,
    pub order: Option<i64>,
}

impl GroupPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn collapsed(is_collapsed: bool) -> Self {
        Self {
            is_collapsed: Some(is_collapsed),
            ..Default::default()
        }
    }
}
