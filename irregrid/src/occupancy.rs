use alloc::vec;
use alloc::vec::Vec;

/// Per-column top and bottom pixel frontiers plus derived aggregates.
///
/// `bottom` tracks how far content extends downward in each column and is the
/// frontier downward fills pack against; `top` tracks the upward extent used
/// when filling toward the top. The two evolve independently: the attached
/// window is exactly the band between them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanOccupancy {
    top: Vec<i32>,
    bottom: Vec<i32>,
    top_min: i32,
    top_max: i32,
    bottom_min: i32,
    bottom_max: i32,
    first_free_single: usize,
    first_free_double: Option<usize>,
}

impl SpanOccupancy {
    pub fn new(columns: usize, frontier: i32) -> Self {
        let mut occupancy = Self {
            top: vec![frontier; columns],
            bottom: vec![frontier; columns],
            top_min: frontier,
            top_max: frontier,
            bottom_min: frontier,
            bottom_max: frontier,
            first_free_single: 0,
            first_free_double: None,
        };
        occupancy.recompute_bottom_aggregates();
        occupancy.recompute_top_aggregates();
        occupancy
    }

    /// Resets every frontier to `frontier`.
    pub fn reset(&mut self, frontier: i32) {
        self.top.fill(frontier);
        self.bottom.fill(frontier);
        self.recompute_bottom_aggregates();
        self.recompute_top_aggregates();
    }

    pub fn columns(&self) -> usize {
        self.bottom.len()
    }

    pub fn top_min(&self) -> i32 {
        self.top_min
    }

    pub fn top_max(&self) -> i32 {
        self.top_max
    }

    pub fn bottom_min(&self) -> i32 {
        self.bottom_min
    }

    pub fn bottom_max(&self) -> i32 {
        self.bottom_max
    }

    /// Leftmost column whose bottom frontier sits at the minimum.
    pub fn first_free_single(&self) -> usize {
        self.first_free_single
    }

    /// Leftmost column where it and its right neighbor both sit at the
    /// minimum, or `None`. Callers must downgrade width-2 placements when
    /// this is `None` rather than stall.
    pub fn first_free_double(&self) -> Option<usize> {
        self.first_free_double
    }

    pub fn top_of(&self, column: usize) -> i32 {
        self.top[column]
    }

    pub fn bottom_of(&self, column: usize) -> i32 {
        self.bottom[column]
    }

    pub fn tops(&self) -> &[i32] {
        &self.top
    }

    pub fn bottoms(&self) -> &[i32] {
        &self.bottom
    }

    /// Extends the bottom frontier of `width` columns from `start` by
    /// `height_px` (a downward placement).
    pub fn occupy_bottom(&mut self, start: usize, width: usize, height_px: i32) {
        for frontier in &mut self.bottom[start..start + width] {
            *frontier += height_px;
        }
        self.recompute_bottom_aggregates();
    }

    /// Extends the top frontier upward by `height_px` (an upward placement).
    pub fn occupy_top(&mut self, start: usize, width: usize, height_px: i32) {
        for frontier in &mut self.top[start..start + width] {
            *frontier -= height_px;
        }
        self.recompute_top_aggregates();
    }

    /// Folds a recycled tile out of the top of the window.
    pub fn release_top(&mut self, start: usize, width: usize, height_px: i32) {
        for frontier in &mut self.top[start..start + width] {
            *frontier += height_px;
        }
        self.recompute_top_aggregates();
    }

    /// Folds a recycled tile out of the bottom of the window.
    pub fn release_bottom(&mut self, start: usize, width: usize, height_px: i32) {
        for frontier in &mut self.bottom[start..start + width] {
            *frontier -= height_px;
        }
        self.recompute_bottom_aggregates();
    }

    /// Shifts every frontier by `offset` pixels (applied scroll).
    ///
    /// A uniform shift cannot change which columns are free, so the free
    /// indices are kept as-is.
    pub fn shift(&mut self, offset: i32) {
        if offset == 0 {
            return;
        }
        for frontier in &mut self.top {
            *frontier += offset;
        }
        for frontier in &mut self.bottom {
            *frontier += offset;
        }
        self.top_min += offset;
        self.top_max += offset;
        self.bottom_min += offset;
        self.bottom_max += offset;
    }

    /// Restarts the bottom frontier at the current tops, ready to re-place
    /// the attached window downward.
    pub(crate) fn rebase_bottom_to_top(&mut self) {
        self.bottom.copy_from_slice(&self.top);
        self.recompute_bottom_aggregates();
    }

    /// Adopts the bottoms as the new top frontier (after replaying cached
    /// placements onto the bottoms).
    pub(crate) fn rebase_top_to_bottom(&mut self) {
        self.top.copy_from_slice(&self.bottom);
        self.recompute_top_aggregates();
    }

    pub(crate) fn set_top(&mut self, tops: &[i32]) {
        self.top.copy_from_slice(tops);
        self.recompute_top_aggregates();
    }

    /// O(N) rescan of the bottom aggregates; called after any bottom change.
    pub fn recompute_bottom_aggregates(&mut self) {
        let mut min = self.bottom[0];
        let mut max = self.bottom[0];
        for &frontier in &self.bottom[1..] {
            if frontier < min {
                min = frontier;
            }
            if frontier > max {
                max = frontier;
            }
        }
        self.bottom_min = min;
        self.bottom_max = max;
        self.first_free_single = self
            .bottom
            .iter()
            .position(|&frontier| frontier == min)
            .unwrap_or(0);
        self.first_free_double = None;
        for column in self.first_free_single..self.columns().saturating_sub(1) {
            if self.bottom[column] == min && self.bottom[column + 1] == min {
                self.first_free_double = Some(column);
                break;
            }
        }
    }

    /// O(N) rescan of the top aggregates; called after any top change.
    pub fn recompute_top_aggregates(&mut self) {
        let mut min = self.top[0];
        let mut max = self.top[0];
        for &frontier in &self.top[1..] {
            if frontier < min {
                min = frontier;
            }
            if frontier > max {
                max = frontier;
            }
        }
        self.top_min = min;
        self.top_max = max;
    }
}
