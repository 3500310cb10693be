use crate::domain::group::Group;

/// Groups sorted by their `order` field
///
/// The sort is stable, so groups sharing an `order` value keep their
/// position in the underlying collection.
pub fn sorted_by_order(groups: &[Group]) -> Vec<&Group> {
    let mut sorted: Vec<&Group> = groups.iter().collect();
    sorted.sort_by_key(|group| group.order);
    sorted
}

/// Moves the group at `source` (an index into the order-sorted sequence) to
/// `destination` and renumbers every group's `order` to its new position.
///
/// `destination` is clamped to the length of the remaining sequence. The
/// groups vector is left in display order afterwards. Returns false, leaving
/// the groups untouched, when `source` is out of range.
///
/// # Examples
/// ```
/// use taskboard_core::domain::{group::Group, ids::GroupId, ordering::move_group};
///
/// let mut groups: Vec<Group> = ["a", "b", "c"]
///     .iter()
///     .enumerate()
///     .map(|(i, id)| Group::new(GroupId::from(*id), *id, Vec::new(), i as i64))
///     .collect();
///
/// assert!(move_group(&mut groups, 0, 2));
/// let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
/// assert_eq!(ids, ["b", "c", "a"]);
/// assert_eq!(groups[2].order, 2);
/// ```
pub fn move_group(groups: &mut Vec<Group>, source: usize, destination: usize) -> bool {
    if source >= groups.len() {
        return false;
    }

    groups.sort_by_key(|group| group.order);
    let moved = groups.remove(source);
    let destination = destination.min(groups.len());
    groups.insert(destination, moved);

    for (index, group) in groups.iter_mut().enumerate() {
        group.order = index as i64;
    }
    true
}

/// Converts a drop slot into a destination index for [`move_group`]
///
/// Drop slots sit between groups: slot `i` is just before the group at
/// index `i`, and slot `len` is after the last one. Dropping a group onto
/// its own slot is not a move and yields `None`.
pub fn drop_destination(dragged: usize, drop_slot: usize) -> Option<usize> {
    if dragged == drop_slot {
        return None;
    }
    if dragged < drop_slot {
        Some(drop_slot - 1)
    } else {
        Some(drop_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::GroupId;

    fn groups(orders: &[(&str, i64)]) -> Vec<Group> {
        orders
            .iter()
            .map(|(id, order)| Group::new(GroupId::from(*id), *id, Vec::new(), *order))
            .collect()
    }

    fn ids(groups: &[Group]) -> Vec<&str> {
        groups.iter().map(|g| g.id.as_str()).collect()
    }

    /// List-move then reindex, the reference behaviour for reordering
    fn reference_move(mut items: Vec<&str>, source: usize, destination: usize) -> Vec<&str> {
        let item = items.remove(source);
        items.insert(destination.min(items.len()), item);
        items
    }

    #[test]
    fn test_sorted_by_order_is_stable() {
        let groups = groups(&[("a", 3), ("b", 1), ("c", 1), ("d", 0)]);
        let sorted: Vec<&str> = sorted_by_order(&groups).iter().map(|g| g.id.as_str()).collect();
        assert_eq!(sorted, ["d", "b", "c", "a"]);
    }

    #[test]
    fn test_move_group_matches_reference() {
        let base = ["a", "b", "c", "d"];
        for source in 0..base.len() {
            for destination in 0..=base.len() {
                let mut g = groups(&[("a", 0), ("b", 1), ("c", 2), ("d", 3)]);
                assert!(move_group(&mut g, source, destination));

                assert_eq!(ids(&g), reference_move(base.to_vec(), source, destination));
                let orders: Vec<i64> = g.iter().map(|g| g.order).collect();
                assert_eq!(orders, [0, 1, 2, 3]);
            }
        }
    }

    #[test]
    fn test_move_group_uses_sorted_sequence() {
        let mut g = groups(&[("a", 10), ("b", 2), ("c", 5)]);

        assert!(move_group(&mut g, 0, 2));
        assert_eq!(ids(&g), ["c", "a", "b"]);
    }

    #[test]
    fn test_same_index_only_renumbers() {
        let mut g = groups(&[("a", 4), ("b", 9)]);

        assert!(move_group(&mut g, 1, 1));
        assert_eq!(ids(&g), ["a", "b"]);
        assert_eq!(g[0].order, 0);
        assert_eq!(g[1].order, 1);
    }

    #[test]
    fn test_source_out_of_range() {
        let mut g = groups(&[("a", 4), ("b", 9)]);
        assert!(!move_group(&mut g, 2, 0));
        assert_eq!(g[0].order, 4);
    }

    #[test]
    fn test_drop_destination() {
        assert_eq!(drop_destination(1, 1), None);
        assert_eq!(drop_destination(0, 3), Some(2));
        assert_eq!(drop_destination(2, 0), Some(0));
        assert_eq!(drop_destination(0, 1), Some(0));
    }
}
