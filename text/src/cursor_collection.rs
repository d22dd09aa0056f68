//! Collection for managing multiple cursors

use crate::{
    cursor::{Cursor, CursorId},
    position::Position,
};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::time::Duration;

/// The cursors of one buffer, in creation order
///
/// The first cursor is the primary one; it survives [`Self::clear_secondary`]
/// and cannot be removed individually.
#[derive(Debug, Clone, Default)]
pub struct CursorCollection {
    cursors: IndexMap<CursorId, Cursor>,
    next_id: u64,
}

impl CursorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(
        &mut self,
        offset: usize,
        position: Position,
        blink_delay: Duration,
    ) -> CursorId {
        let id = CursorId::new(self.next_id);
        self.next_id += 1;
        self.cursors.insert(id, Cursor::new(id, offset, position, blink_delay));
        id
    }

    /// Get the primary cursor
    pub fn primary(&self) -> Option<&Cursor> {
        self.cursors.first().map(|(_, cursor)| cursor)
    }

    /// Get a cursor by ID
    pub fn get(&self, id: CursorId) -> Option<&Cursor> {
        self.cursors.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: CursorId) -> Option<&mut Cursor> {
        self.cursors.get_mut(&id)
    }

    /// Iterate over all cursors in order
    pub fn iter(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cursor> {
        self.cursors.values_mut()
    }

    /// Snapshot of the ids, in order
    pub fn ids(&self) -> Vec<CursorId> {
        self.cursors.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Remove a cursor by ID
    pub fn remove(&mut self, id: CursorId) -> bool {
        if self.cursors.first().is_some_and(|(primary, _)| *primary == id) {
            // Can't remove the primary cursor
            return false;
        }
        self.cursors.shift_remove(&id).is_some()
    }

    /// Drop every cursor but the primary
    pub fn clear_secondary(&mut self) {
        self.cursors.truncate(1);
    }

    pub(crate) fn clear(&mut self) {
        self.cursors.clear();
    }

    /// Remove cursors sharing a `(line, column)` with an earlier cursor.
    /// Returns how many were removed.
    pub fn remove_duplicates(&mut self) -> usize {
        let before = self.cursors.len();
        let mut seen = FxHashSet::default();
        self.cursors.retain(|_, cursor| seen.insert(cursor.position()));
        before - self.cursors.len()
    }
}
