use crate::domain::{
    group::Group,
    ids::{BoardId, GroupId},
    ordering,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Top-level workspace holding an ordered list of groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub groups: Vec<Group>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Creates an empty board stamped with the current time
    pub fn new(id: BoardId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            groups: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn group(&self, group_id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| &group.id == group_id)
    }

    pub fn group_mut(&mut self, group_id: &GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| &group.id == group_id)
    }

    /// Groups in display order
    pub fn sorted_groups(&self) -> Vec<&Group> {
        ordering::sorted_by_order(&self.groups)
    }

    /// Moves `updated_at` strictly forward: to now, or one millisecond past
    /// the previous value when the clock is behind it
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::milliseconds(1)
        };
    }

    /// Merges a patch. Replacement groups have their rows reconciled against
    /// their columns. Does not touch `updated_at`.
    pub fn apply(&mut self, patch: BoardPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(mut groups) = patch.groups {
            for group in &mut groups {
                group.reconcile_rows();
            }
            self.groups = groups;
        }
    }
}

/// Partial update of a [`Board`]. The id and creation time are immutable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardPatch {
    pub title: Option<String>,
    pub groups: Option<Vec<Group>>,
}

impl BoardPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new(BoardId::from("b1"), "Roadmap");
        assert_eq!(board.title, "Roadmap");
        assert!(board.groups.is_empty());
        assert_eq!(board.created_at, board.updated_at);
    }

    #[test]
    fn test_touch_is_monotonic() {
        let mut board = Board::new(BoardId::from("b1"), "Roadmap");
        let future = Utc::now() + chrono::Duration::hours(1);
        board.updated_at = future;

        board.touch();
        assert!(board.updated_at > future);

        let previous = board.updated_at;
        board.touch();
        assert!(board.updated_at > previous);
    }

    #[test]
    fn test_patch_title_leaves_groups() {
        let mut board = Board::new(BoardId::from("b1"), "Roadmap");
        board
            .groups
            .push(Group::new(GroupId::from("g1"), "Now", Vec::new(), 0));

        board.apply(BoardPatch::title("Plan"));

        assert_eq!(board.title, "Plan");
        assert_eq!(board.groups.len(), 1);
    }

    #[test]
    fn test_dates_round_trip_as_dates() {
        let board = Board::new(BoardId::from("b1"), "Roadmap");
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains("createdAt"));
        assert!(json.contains("updatedAt"));

        let loaded: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.created_at, board.created_at);
        assert_eq!(loaded.updated_at, board.updated_at);
    }

    #[test]
    fn test_deserialize_iso_strings() {
        let json = r#"{
        "id": "b1",
        "title": "Old Board",
        "groups": [],
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-02T12:30:00.000Z"
    }"#;

        let board: Board = serde_json::from_str(json).unwrap();
        assert_eq!(board.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(board.updated_at > board.created_at);
    }
}
