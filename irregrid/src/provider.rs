use crate::{PxRect, PxSize, SpanSize, Viewport};

/// The capability interface a host implements to back the engine with real
/// views: dataset size, viewport geometry, per-item sizing inputs, and the
/// view lifecycle (create, measure, position, recycle).
///
/// All engine operations run synchronously inside the host's layout and
/// animation callbacks; the engine never retains a borrow of the provider
/// across calls.
pub trait ItemProvider {
    /// Host-side handle for a created tile view. The engine stores one per
    /// attached tile and returns it on recycle.
    type Handle;

    fn item_count(&self) -> usize;

    fn viewport(&self) -> Viewport;

    /// Explicit per-item span hint; wins over every other sizing source.
    fn span_hint(&self, position: usize) -> Option<SpanSize> {
        let _ = position;
        None
    }

    /// Intrinsic pixel size, used by deterministic sizing when no hint is
    /// present.
    fn intrinsic_size(&self, position: usize) -> Option<PxSize> {
        let _ = position;
        None
    }

    fn get_or_create(&mut self, position: usize) -> Self::Handle;

    fn measure_exact(&mut self, handle: &mut Self::Handle, size: PxSize);

    fn position_item(&mut self, handle: &mut Self::Handle, rect: PxRect);

    fn recycle(&mut self, position: usize, handle: Self::Handle);

    /// Shifts every attached tile by `dy` pixels in one batch, after the
    /// engine has computed an applied scroll delta.
    fn offset_items(&mut self, dy: i32);

    /// A tile leaving the dataset, positioned at its final rect so the host
    /// can animate it out. The host owns the handle from here on; the
    /// default drops it.
    fn disappear_item(&mut self, position: usize, handle: Self::Handle, rect: PxRect) {
        let _ = (position, rect);
        drop(handle);
    }
}
