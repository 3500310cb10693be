pub mod board;
pub mod column;
pub mod group;
pub mod ids;
pub mod ordering;
pub mod row;

pub use board::{Board, BoardPatch};
pub use column::{parse_options, Column, ColumnPatch, ColumnType};
pub use group::{Group, GroupPatch};
pub use ids::{BoardId, ColumnId, GroupId, IdGenerator, RowId, SequentialIdGenerator, UuidGenerator};
pub use ordering::{drop_destination, move_group, sorted_by_order};
pub use row::{Cell, CellValue, Row, RowPatch};

use crate::error::{BoardError, Result};

/// Trims a user-entered title, rejecting blank input
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("  Sprint 1 ").unwrap(), "Sprint 1");
        assert!(matches!(validate_title("   "), Err(BoardError::EmptyTitle)));
        assert!(matches!(validate_title(""), Err(BoardError::EmptyTitle)));
    }
}
