//! The board store: canonical collection of boards, the active-board
//! selection and every mutation on the Board → Group → Column/Row → Cell tree.
//!
//! Mutations address their target by id and report an [`Outcome`]. Unknown
//! ids leave the state untouched. Every applied mutation bumps the owning
//! board's `updated_at` and writes the whole collection to storage.

use crate::{
    config::StoreConfig,
    domain::{
        ordering, Board, BoardId, BoardPatch, CellValue, Column, ColumnId, ColumnPatch, Group,
        GroupId, GroupPatch, IdGenerator, RowId, RowPatch, UuidGenerator,
    },
    error::Result,
    storage::{SlotAdapter, Storage},
};
use tracing::{debug, warn};

/// Result of a store mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation was applied and persisted
    Applied,
    /// A board, group, column or row id did not resolve; nothing changed
    NotFound,
    /// The supplied id is already taken in its scope; nothing changed
    Duplicate,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Owner of all boards and the mutation API over them
pub struct BoardStore {
    boards: Vec<Board>,
    active_board_id: Option<BoardId>,
    slots: SlotAdapter,
    config: StoreConfig,
    ids: Box<dyn IdGenerator>,
    persistent: bool,
}

impl BoardStore {
    /// Opens the store with random UUID ids
    pub async fn open(storage: impl Storage + 'static, config: StoreConfig) -> Result<Self> {
        Self::open_with_ids(storage, config, UuidGenerator).await
    }

    /// Opens the store, loading the persisted collection or synthesizing the
    /// default document on first run.
    ///
    /// Storage failures are not fatal: the store falls back to the default
    /// document and keeps working in memory only. Only an invalid `config`
    /// is reported as an error.
    pub async fn open_with_ids(
        storage: impl Storage + 'static,
        config: StoreConfig,
        ids: impl IdGenerator + 'static,
    ) -> Result<Self> {
        config.validate()?;

        let mut store = Self {
            boards: Vec::new(),
            active_board_id: None,
            slots: SlotAdapter::new(storage),
            config,
            ids: Box::new(ids),
            persistent: true,
        };

        let loaded = store.slots.load::<Vec<Board>>(&store.config.storage_key).await;
        match loaded {
            Ok(Some(boards)) => {
                debug!(count = boards.len(), "loaded boards");
                store.boards = boards;
            }
            Ok(None) => {
                debug!("no saved boards, creating default board");
                store.boards = vec![store.default_board()];
                store.persist().await;
            }
            Err(err) => {
                warn!(
                    error = %err,
                    key = %store.config.storage_key,
                    "failed to load boards, continuing in memory only"
                );
                store.persistent = false;
                store.boards = vec![store.default_board()];
            }
        }

        store.active_board_id = store.boards.first().map(|board| board.id.clone());
        Ok(store)
    }

    fn default_board(&self) -> Board {
        let mut board = Board::new(BoardId::new(self.ids.next_id()), &self.config.default_board_title);
        board.groups.push(Group::new(
            GroupId::new(self.ids.next_id()),
            &self.config.default_group_title,
            self.config.default_columns.clone(),
            0,
        ));
        board
    }

    /// Mints a fresh id, e.g. for a column passed to [`BoardStore::add_column`]
    pub fn new_id(&self) -> String {
        self.ids.next_id()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether mutations are still being written to storage
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, board_id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| &board.id == board_id)
    }

    pub fn active_board_id(&self) -> Option<&BoardId> {
        self.active_board_id.as_ref()
    }

    /// The board currently presented, resolved against the collection
    pub fn active_board(&self) -> Option<&Board> {
        self.active_board_id.as_ref().and_then(|id| self.board(id))
    }

    /// Groups of a board in display order
    pub fn sorted_groups(&self, board_id: &BoardId) -> Option<Vec<&Group>> {
        self.board(board_id).map(Board::sorted_groups)
    }

    pub fn set_active_board(&mut self, board_id: &BoardId) -> Outcome {
        if self.board(board_id).is_none() {
            debug!(board_id = %board_id, "set_active_board: unknown board");
            return Outcome::NotFound;
        }
        self.active_board_id = Some(board_id.clone());
        Outcome::Applied
    }

    /// Appends an empty board and makes it active
    pub async fn create_board(&mut self, title: impl Into<String>) -> BoardId {
        let board = Board::new(BoardId::new(self.ids.next_id()), title);
        let id = board.id.clone();
        debug!(board_id = %id, "create_board");

        self.boards.push(board);
        self.active_board_id = Some(id.clone());
        self.persist().await;
        id
    }

    pub async fn update_board(&mut self, board_id: &BoardId, patch: BoardPatch) -> Outcome {
        self.mutate_board(board_id, "update_board", |board| {
            board.apply(patch);
            true
        })
        .await
    }

    /// Removes a board. When it was active, the first remaining board
    /// becomes active, or none if the collection is now empty.
    pub async fn delete_board(&mut self, board_id: &BoardId) -> Outcome {
        let Some(pos) = self.boards.iter().position(|board| &board.id == board_id) else {
            debug!(board_id = %board_id, "delete_board: unknown board");
            return Outcome::NotFound;
        };

        self.boards.remove(pos);
        if self.active_board_id.as_ref() == Some(board_id) {
            self.active_board_id = self.boards.first().map(|board| board.id.clone());
        }
        debug!(board_id = %board_id, "delete_board");
        self.persist().await;
        Outcome::Applied
    }

    /// Appends a group with the default column set and no rows.
    /// Returns the new group's id, or `None` if the board is unknown.
    pub async fn create_group(
        &mut self,
        board_id: &BoardId,
        title: impl Into<String>,
    ) -> Option<GroupId> {
        self.board(board_id)?;

        let group_id = GroupId::new(self.ids.next_id());
        let columns = self.config.default_columns.clone();
        let title = title.into();
        let new_id = group_id.clone();

        self.mutate_board(board_id, "create_group", move |board| {
            let order = board.groups.len() as i64;
            board.groups.push(Group::new(group_id, title, columns, order));
            true
        })
        .await
        .is_applied()
        .then_some(new_id)
    }

    pub async fn update_group(
        &mut self,
        board_id: &BoardId,
        group_id: &GroupId,
        patch: GroupPatch,
    ) -> Outcome {
        self.mutate_group(board_id, group_id, "update_group", |group| {
            group.apply(patch);
            true
        })
        .await
    }

    /// Removes a group; the remaining groups keep their `order` values
    pub async fn delete_group(&mut self, board_id: &BoardId, group_id: &GroupId) -> Outcome {
        self.mutate_board(board_id, "delete_group", |board| {
            let Some(pos) = board.groups.iter().position(|group| &group.id == group_id) else {
                return false;
            };
            board.groups.remove(pos);
            true
        })
        .await
    }

    /// Moves the group at `source_index` of the display order to
    /// `destination_index` and renumbers all groups 0..n.
    pub async fn reorder_groups(
        &mut self,
        board_id: &BoardId,
        source_index: usize,
        destination_index: usize,
    ) -> Outcome {
        self.mutate_board(board_id, "reorder_groups", |board| {
            ordering::move_group(&mut board.groups, source_index, destination_index)
        })
        .await
    }

    /// Appends a caller-identified column and a default cell for it on every
    /// row of the group
    pub async fn add_column(
        &mut self,
        board_id: &BoardId,
        group_id: &GroupId,
        column: Column,
    ) -> Outcome {
        let taken = self
            .board(board_id)
            .and_then(|board| board.group(group_id))
            .is_some_and(|group| group.column(&column.id).is_some());
        if taken {
            debug!(column_id = %column.id, "add_column: column id already in use");
            return Outcome::Duplicate;
        }

        self.mutate_group(board_id, group_id, "add_column", |group| {
            group.push_column(column);
            true
        })
        .await
    }

    /// Merges a patch into a column. Changing the type keeps existing cell
    /// values as they are.
    pub async fn update_column(
        &mut self,
        board_id: &BoardId,
        group_id: &GroupId,
        column_id: &ColumnId,
        patch: ColumnPatch,
    ) -> Outcome {
        self.mutate_group(board_id, group_id, "update_column", |group| {
            let Some(column) = group.column_mut(column_id) else {
                return false;
            };
            if patch.kind.is_some_and(|kind| kind != column.kind) {
                debug!(
                    column_id = %column_id,
                    from = %column.kind,
                    "column type changed, cell values left unconverted"
                );
            }
            column.apply(patch);
            true
        })
        .await
    }

    /// Removes a column and its cell from every row of the group
    pub async fn delete_column(
        &mut self,
        board_id: &BoardId,
        group_id: &GroupId,
        column_id: &ColumnId,
    ) -> Outcome {
        self.mutate_group(board_id, group_id, "delete_column", |group| {
            group.remove_column(column_id).is_some()
        })
        .await
    }

    /// Appends a row with one default-valued cell per column.
    /// Returns the new row's id, or `None` if the board or group is unknown.
    pub async fn add_row(&mut self, board_id: &BoardId, group_id: &GroupId) -> Option<RowId> {
        self.board(board_id)?.group(group_id)?;

        let row_id = RowId::new(self.ids.next_id());
        let new_id = row_id.clone();

        self.mutate_group(board_id, group_id, "add_row", move |group| {
            group.push_row(row_id);
            true
        })
        .await
        .is_applied()
        .then_some(new_id)
    }

    /// Merges a patch into a row. A replacement cell list is reconciled
    /// against the group's columns.
    pub async fn update_row(
        &mut self,
        board_id: &BoardId,
        group_id: &GroupId,
        row_id: &RowId,
        patch: RowPatch,
    ) -> Outcome {
        self.mutate_group(board_id, group_id, "update_row", |group| {
            let Group { columns, rows, .. } = group;
            let Some(row) = rows.iter_mut().find(|row| &row.id == row_id) else {
                return false;
            };
            if let Some(cells) = patch.cells {
                row.cells = cells;
                row.reconcile(columns);
            }
            true
        })
        .await
    }

    pub async fn delete_row(
        &mut self,
        board_id: &BoardId,
        group_id: &GroupId,
        row_id: &RowId,
    ) -> Outcome {
        self.mutate_group(board_id, group_id, "delete_row", |group| {
            group.remove_row(row_id).is_some()
        })
        .await
    }

    /// Appends a cell for `column_id` holding `default_value` to every row of
    /// the group. The caller must not add a column id the rows already hold.
    pub async fn add_cell(
        &mut self,
        board_id: &BoardId,
        group_id: &GroupId,
        column_id: &ColumnId,
        default_value: impl Into<CellValue>,
    ) -> Outcome {
        let value = default_value.into();
        self.mutate_group(board_id, group_id, "add_cell", |group| {
            group.backfill_cells(column_id, &value);
            true
        })
        .await
    }

    /// Sets the value of one cell. No cell is created when the row has none
    /// for `column_id`.
    pub async fn update_cell(
        &mut self,
        board_id: &BoardId,
        group_id: &GroupId,
        row_id: &RowId,
        column_id: &ColumnId,
        value: impl Into<CellValue>,
    ) -> Outcome {
        let value = value.into();
        self.mutate_group(board_id, group_id, "update_cell", |group| {
            group
                .row_mut(row_id)
                .is_some_and(|row| row.set_value(column_id, value))
        })
        .await
    }

    /// Runs `apply` on the addressed board. `apply` returns false, without
    /// having changed anything, when a nested id does not resolve.
    async fn mutate_board<F>(&mut self, board_id: &BoardId, op: &'static str, apply: F) -> Outcome
    where
        F: FnOnce(&mut Board) -> bool,
    {
        let Some(board) = self.boards.iter_mut().find(|board| &board.id == board_id) else {
            debug!(board_id = %board_id, op, "unknown board");
            return Outcome::NotFound;
        };
        if !apply(board) {
            debug!(board_id = %board_id, op, "target not found");
            return Outcome::NotFound;
        }
        board.touch();

        debug!(board_id = %board_id, op, "applied");
        self.persist().await;
        Outcome::Applied
    }

    async fn mutate_group<F>(
        &mut self,
        board_id: &BoardId,
        group_id: &GroupId,
        op: &'static str,
        apply: F,
    ) -> Outcome
    where
        F: FnOnce(&mut Group) -> bool,
    {
        self.mutate_board(board_id, op, |board| {
            board.group_mut(group_id).is_some_and(apply)
        })
        .await
    }

    /// Writes the full collection. A failed write switches the store to
    /// in-memory-only operation for the rest of the session.
    async fn persist(&mut self) {
        if !self.persistent {
            return;
        }
        let saved = self.slots.save(&self.config.storage_key, &self.boards).await;
        if let Err(err) = saved {
            warn!(
                error = %err,
                key = %self.config.storage_key,
                "failed to save boards, continuing in memory only"
            );
            self.persistent = false;
        }
    }
}
