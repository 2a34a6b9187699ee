use irregrid::{GridEngine, ItemProvider};

/// An anchor that can be used to preserve visual position across relayouts.
///
/// Typical use case: capture before a dataset refresh or viewport resize,
/// re-apply after the real layout pass so the viewport stays pinned to the
/// same tile instead of jumping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridAnchor {
    pub position: usize,
    /// Signed distance from the viewport's top border to the tile's top.
    pub offset_in_viewport: i32,
}

/// Captures an anchor for the first tile that intersects the viewport.
///
/// Returns `None` when nothing is attached or everything attached sits above
/// the top border.
pub fn capture_first_visible_anchor<H>(engine: &GridEngine<H>) -> Option<GridAnchor> {
    let border = engine.top_border();
    let mut anchor = None;
    engine.for_each_attached(|position, rect| {
        if anchor.is_none() && rect.bottom > border {
            anchor = Some(GridAnchor {
                position,
                offset_in_viewport: rect.top - border,
            });
        }
    });
    anchor
}

/// Applies a previously captured anchor by issuing a corrective scroll delta.
///
/// The anchored position must still be attached; the applied correction may
/// be clamped at either end of the dataset. Returns `true` when the anchor
/// was applied.
pub fn apply_anchor<H, P>(
    engine: &mut GridEngine<H>,
    provider: &mut P,
    anchor: &GridAnchor,
) -> bool
where
    P: ItemProvider<Handle = H>,
{
    let Some(rect) = engine.attached_rect(anchor.position) else {
        return false;
    };
    let drift = (rect.top - engine.top_border()) - anchor.offset_in_viewport;
    if drift != 0 {
        engine.scroll_by(provider, drift);
    }
    true
}
