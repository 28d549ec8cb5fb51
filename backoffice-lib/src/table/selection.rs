//! Checked-row set for bulk actions.

use std::collections::HashSet;

use crate::model::RecordId;

/// Tracks checked rows by id.
///
/// Membership is unique and unordered; [`Selection::sorted`] gives the
/// deterministic order bulk operations run in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<RecordId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles membership of `id`. Returns `true` if it is now selected.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Makes the selection exactly `ids`.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        self.selected = ids.into_iter().collect();
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    /// Drops every id in `ids` that is selected.
    pub fn remove_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a RecordId>) {
        for id in ids {
            self.selected.remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn sorted(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }
}
