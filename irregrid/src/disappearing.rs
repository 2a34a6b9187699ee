use alloc::collections::BTreeMap;

use crate::{PxRect, PxSize};

/// Last-known geometry of a tile on its way out of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisappearingTile {
    pub rect: PxRect,
    /// Exact measurement the tile was last laid out with.
    pub measure: PxSize,
}

/// Placements of tiles leaving the viewport across a dataset mutation, keyed
/// by their attached position at the time the mutation was recorded.
///
/// Entries are created during the pre-layout pass and consumed during the
/// real pass that follows: each tile is laid out once more at its last rect,
/// in descending position order, so the host can animate it out. The cache
/// is cleared at the end of every real pass.
#[derive(Clone, Debug, Default)]
pub struct DisappearingCache {
    entries: BTreeMap<usize, DisappearingTile>,
}

impl DisappearingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: usize, rect: PxRect) {
        self.entries.insert(
            position,
            DisappearingTile {
                rect,
                measure: rect.size(),
            },
        );
    }

    pub fn get(&self, position: usize) -> Option<DisappearingTile> {
        self.entries.get(&position).copied()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.entries.contains_key(&position)
    }

    pub fn remove(&mut self, position: usize) -> Option<DisappearingTile> {
        self.entries.remove(&position)
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

    /// Entries in descending position order.
    pub fn iter_descending(&self) -> impl Iterator<Item = (usize, DisappearingTile)> + '_ {
        self.entries
            .iter()
            .rev()
            .map(|(&position, &tile)| (position, tile))
    }
}
