use std::collections::BTreeSet;

use crate::models::TableId;

/// The set of selected table ids. Iteration order is ascending id so anything
/// derived from a selection is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<TableId>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: TableId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = TableId> + '_ {
        self.ids.iter().copied()
    }

    pub fn ids(&self) -> Vec<TableId> {
        self.iter().collect()
    }

    /// The single selected id, if exactly one table is selected.
    pub fn single(&self) -> Option<TableId> {
        if self.ids.len() == 1 {
            self.ids.first().copied()
        } else {
            None
        }
    }

    pub fn select_only(&mut self, id: TableId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    pub fn replace(&mut self, ids: impl IntoIterator<Item = TableId>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn extend(&mut self, ids: impl IntoIterator<Item = TableId>) {
        self.ids.extend(ids);
    }

    pub fn insert(&mut self, id: TableId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: TableId) -> bool {
        self.ids.remove(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// How a per-table field reads across the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<T> {
    /// Nothing selected.
    Empty,
    /// Every selected table has this value.
    Uniform(T),
    /// The selected tables disagree; shown as "mixed" and only overwritten
    /// when the operator supplies a value explicitly.
    Mixed,
}

impl<T> FieldValue<T> {
    pub fn uniform(self) -> Option<T> {
        match self {
            FieldValue::Uniform(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, FieldValue::Mixed)
    }
}

/// Fold a sequence of values into [`FieldValue`].
pub fn common_value<T: PartialEq>(values: impl IntoIterator<Item = T>) -> FieldValue<T> {
    let mut iter = values.into_iter();
    let Some(first) = iter.next() else {
        return FieldValue::Empty;
    };
    if iter.all(|v| v == first) {
        FieldValue::Uniform(first)
    } else {
        FieldValue::Mixed
    }
}
