use alloc::collections::BTreeMap;

use crate::Placement;

/// Remembers the span shape and starting column chosen the first time each
/// position was placed, so re-traversal after a scroll reversal reproduces
/// the exact same geometry.
///
/// Entries become stale as soon as the dataset mutates at or before their
/// position; [`PlacementCache::invalidate_from`] drops the affected suffix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementCache {
    entries: BTreeMap<usize, Placement>,
}

impl PlacementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: usize) -> Option<Placement> {
        self.entries.get(&position).copied()
    }

    pub fn insert(&mut self, position: usize, placement: Placement) {
        self.entries.insert(position, placement);
    }

    /// Drops every entry at or after `position`.
    pub fn invalidate_from(&mut self, position: usize) {
        self.entries.split_off(&position);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries strictly below `position`, in ascending order.
    pub fn iter_below(&self, position: usize) -> impl Iterator<Item = (usize, Placement)> + '_ {
        self.entries
            .range(..position)
            .map(|(&position, &placement)| (position, placement))
    }

    /// Entries at or after `position`, in ascending order.
    pub fn iter_from(&self, position: usize) -> impl Iterator<Item = (usize, Placement)> + '_ {
        self.entries
            .range(position..)
            .map(|(&position, &placement)| (position, placement))
    }
}
