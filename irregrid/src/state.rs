use crate::occupancy::SpanOccupancy;
use crate::placement::PlacementCache;

/// The authoritative mutable layout state: frontier arrays, the placement
/// cache, and the bounds of the attached window.
///
/// The speculative pre-layout pass clones this value wholesale and works on
/// the copy, so the authoritative state is never threaded through shadow
/// fields.
#[derive(Clone, Debug)]
pub(crate) struct LayoutState {
    pub occupancy: SpanOccupancy,
    pub placements: PlacementCache,
    pub first_attached: Option<usize>,
    pub last_attached: Option<usize>,
}

impl LayoutState {
    pub(crate) fn new(columns: usize, frontier: i32) -> Self {
        Self {
            occupancy: SpanOccupancy::new(columns, frontier),
            placements: PlacementCache::new(),
            first_attached: Some(0),
            last_attached: Some(0),
        }
    }
}
