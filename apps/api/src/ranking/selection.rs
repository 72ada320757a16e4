use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Most candidates that can be compared side by side.
pub const MAX_SELECTION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The set was full and the id was not in it. Nothing changed.
    Ignored,
}

/// Candidate ids picked for comparison, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: Vec<Uuid>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `id` if present, otherwise adds it while there is room.
    ///
    /// A full set never evicts: toggling a new id at capacity is ignored.
    pub fn toggle(&mut self, id: Uuid) -> ToggleOutcome {
        if let Some(pos) = self.ids.iter().position(|x| *x == id) {
            self.ids.remove(pos);
            ToggleOutcome::Removed
        } else if self.ids.len() < MAX_SELECTION {
            self.ids.push(id);
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Ignored
        }
    }

    /// Value-returning form of [`SelectionSet::toggle`].
    #[cfg(test)]
    pub fn toggled(&self, id: Uuid) -> Self {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.ids.contains(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_SELECTION
    }

    #[cfg(test)]
    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn test_cap_keeps_first_three_in_order() {
        let ids = ids(4);
        let mut set = SelectionSet::new();
        for id in &ids[..3] {
            assert_eq!(set.toggle(*id), ToggleOutcome::Added);
        }
        assert_eq!(set.toggle(ids[3]), ToggleOutcome::Ignored);
        assert_eq!(set.len(), 3);
        assert_eq!(set.ids(), &ids[..3]);
    }

    #[test]
    fn test_toggle_present_id_removes_it() {
        let ids = ids(2);
        let mut set = SelectionSet::new();
        set.toggle(ids[0]);
        set.toggle(ids[1]);
        assert_eq!(set.toggle(ids[0]), ToggleOutcome::Removed);
        assert_eq!(set.ids(), &[ids[1]]);
    }

    #[test]
    fn test_removal_works_when_full() {
        let ids = ids(3);
        let mut set = SelectionSet::new();
        ids.iter().for_each(|id| {
            set.toggle(*id);
        });
        assert!(set.is_full());
        assert_eq!(set.toggle(ids[1]), ToggleOutcome::Removed);
        assert!(!set.contains(&ids[1]));
        assert_eq!(set.len(), 2);
    }

    fn same_members(a: &SelectionSet, b: &SelectionSet) -> bool {
        a.len() == b.len() && a.ids().iter().all(|id| b.contains(id))
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let ids = ids(4);
        let mut below_cap = SelectionSet::new();
        below_cap.toggle(ids[0]);
        below_cap.toggle(ids[1]);
        // absent id with room, then present id
        for id in [ids[2], ids[0]] {
            assert!(same_members(&below_cap.toggled(id).toggled(id), &below_cap));
        }

        let mut full = below_cap.clone();
        full.toggle(ids[2]);
        assert!(same_members(&full.toggled(ids[1]).toggled(ids[1]), &full));
    }

    #[test]
    fn test_reselecting_moves_id_to_the_end() {
        let ids = ids(2);
        let mut set = SelectionSet::new();
        set.toggle(ids[0]);
        set.toggle(ids[1]);
        let again = set.toggled(ids[0]).toggled(ids[0]);
        assert_eq!(again.ids(), &[ids[1], ids[0]]);
    }

    #[test]
    fn test_ignored_toggle_leaves_set_unchanged() {
        let ids = ids(4);
        let mut set = SelectionSet::new();
        ids[..3].iter().for_each(|id| {
            set.toggle(*id);
        });
        let before = set.clone();
        assert_eq!(set.toggled(ids[3]), before);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let id = Uuid::new_v4();
        let mut set = SelectionSet::new();
        set.toggle(id);
        let v = serde_json::to_value(&set).unwrap();
        assert_eq!(v, serde_json::json!([id.to_string()]));
    }
}
