use irregrid::{GridEngine, GridError, GridOptions, ItemProvider, LayoutPhase};

use crate::{Easing, GridAnchor, ScrollTween, apply_anchor, capture_first_visible_anchor};

/// A framework-neutral controller that wraps a [`GridEngine`] and sequences
/// the host protocol for it: structural notifications, then the pre-layout
/// pass, then the real pass, then scroll deltas.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - [`GridController::layout`] when the host requests a layout
/// - [`GridController::remove_items`] / [`GridController::refresh`] on data changes
/// - [`GridController::scroll`] on user scrolling, or
///   [`GridController::tick`] each frame for tween-driven scrolling
#[derive(Clone, Debug)]
pub struct GridController<H = ()> {
    engine: GridEngine<H>,
    tween: Option<ScrollTween>,
}

impl<H> GridController<H> {
    pub fn new(options: GridOptions) -> Result<Self, GridError> {
        Ok(Self {
            engine: GridEngine::new(options)?,
            tween: None,
        })
    }

    pub fn from_engine(engine: GridEngine<H>) -> Self {
        Self {
            engine,
            tween: None,
        }
    }

    pub fn engine(&self) -> &GridEngine<H> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GridEngine<H> {
        &mut self.engine
    }

    pub fn into_engine(self) -> GridEngine<H> {
        self.engine
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Runs a real layout pass (initial mount, viewport resize, idempotent
    /// re-layout).
    pub fn layout<P>(&mut self, provider: &mut P)
    where
        P: ItemProvider<Handle = H>,
    {
        self.engine.run_layout(provider, LayoutPhase::Real);
    }

    /// Full dataset invalidation followed by a real layout pass.
    pub fn refresh<P>(&mut self, provider: &mut P)
    where
        P: ItemProvider<Handle = H>,
    {
        self.engine.notify_dataset_changed();
        self.engine.run_layout(provider, LayoutPhase::Real);
    }

    /// Records a removal and runs both layout passes in the contractual
    /// order, so disappearing tiles are handed to the provider for their
    /// exit animation.
    ///
    /// The provider's dataset must already reflect the removal.
    pub fn remove_items<P>(&mut self, provider: &mut P, start: usize, count: usize)
    where
        P: ItemProvider<Handle = H>,
    {
        self.engine.notify_items_removed(start, count);
        self.engine.run_layout(provider, LayoutPhase::Pre);
        self.engine.run_layout(provider, LayoutPhase::Real);
    }

    /// Applies a user scroll. Cancels any active tween. Returns the applied
    /// delta.
    pub fn scroll<P>(&mut self, provider: &mut P, dy: i32) -> i32
    where
        P: ItemProvider<Handle = H>,
    {
        self.cancel_animation();
        self.engine.scroll_by(provider, dy)
    }

    /// Starts a tween that scrolls by `dy` over `duration_ms`.
    pub fn start_scroll_animation(
        &mut self,
        dy: i32,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) {
        self.tween = Some(ScrollTween::new(dy, now_ms, duration_ms, easing));
    }

    /// Advances the controller.
    ///
    /// If a tween is active, applies the delta due at `now_ms` and returns
    /// the engine-applied amount; otherwise returns `None`. The tween ends
    /// early if the engine clamps at a dataset boundary.
    pub fn tick<P>(&mut self, provider: &mut P, now_ms: u64) -> Option<i32>
    where
        P: ItemProvider<Handle = H>,
    {
        let tween = self.tween.as_mut()?;
        let step = tween.step(now_ms);
        let done = tween.is_done(now_ms);
        let applied = if step != 0 {
            self.engine.scroll_by(provider, step)
        } else {
            0
        };
        if done || (step != 0 && applied != step) {
            self.tween = None;
        }
        Some(applied)
    }

    /// Captures an anchor for the first visible tile.
    pub fn capture_first_visible_anchor(&self) -> Option<GridAnchor> {
        capture_first_visible_anchor(&self.engine)
    }

    /// Re-applies a previously captured anchor with a corrective scroll.
    ///
    /// This cancels any active tween.
    pub fn apply_anchor<P>(&mut self, provider: &mut P, anchor: &GridAnchor) -> bool
    where
        P: ItemProvider<Handle = H>,
    {
        self.cancel_animation();
        apply_anchor(&mut self.engine, provider, anchor)
    }
}
