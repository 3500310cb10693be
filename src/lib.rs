//! # Taskboard Core
//!
//! Board store and domain models for a local-first task board editor.
//!
//! Boards hold ordered groups; each group is a small table with typed
//! columns and rows of cells. [`BoardStore`] owns the whole collection,
//! tracks the active board and persists every change through a
//! [`Storage`] backend, independent of any UI.

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::StoreConfig;
pub use domain::{
    board::{Board, BoardPatch},
    column::{Column, ColumnPatch, ColumnType},
    group::{Group, GroupPatch},
    ids::{BoardId, ColumnId, GroupId, IdGenerator, RowId},
    row::{Cell, CellValue, Row, RowPatch},
};
pub use error::{BoardError, Result};
pub use storage::{FileStorage, MemoryStorage, SlotAdapter, Storage};
pub use store::{BoardStore, Outcome};
