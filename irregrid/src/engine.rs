use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;

use crate::disappearing::DisappearingCache;
use crate::occupancy::SpanOccupancy;
use crate::partition::ColumnBands;
use crate::placement::PlacementCache;
use crate::sizing::SpanResolver;
use crate::state::LayoutState;
use crate::{
    FillDirection, GridError, GridOptions, ItemProvider, LayoutPhase, Placement, PxRect, SpanSize,
    Viewport,
};

/// Where the engine is in the removal reconciliation protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReconcilePhase {
    /// No structural change recorded.
    Stable,
    /// Removals recorded; waiting for the pre-layout pass.
    PreLayoutPending,
    /// Pre-layout ran; the next real pass consumes its outcome.
    Reconciling,
}

/// Bookkeeping for structural changes between two real layout passes.
#[derive(Clone, Debug, Default)]
struct MutationRecord {
    /// Earliest position affected by a removal, or `None`.
    first_changed: Option<usize>,
    /// Items removed whose index was below the first attached position.
    removed_above: usize,
    /// Removal ranges in notification order, each in the dataset coordinates
    /// current at notification time.
    removed_ranges: Vec<(usize, usize)>,
    full_invalidation: bool,
}

impl MutationRecord {
    fn reset(&mut self) {
        self.first_changed = None;
        self.removed_above = 0;
        self.removed_ranges.clear();
        self.full_invalidation = false;
    }

    /// Maps a pre-removal position through the recorded removals, or `None`
    /// if the position itself was removed.
    fn surviving_position(&self, position: usize) -> Option<usize> {
        let mut current = position;
        for &(start, count) in &self.removed_ranges {
            if current >= start + count {
                current -= count;
            } else if current >= start {
                return None;
            }
        }
        Some(current)
    }
}

/// A tile currently attached to the viewport window.
#[derive(Clone, Debug)]
struct AttachedTile<H> {
    position: usize,
    rect: PxRect,
    placement: Placement,
    handle: H,
}

/// What the speculative pre-layout pass learned about the post-removal grid.
#[derive(Clone, Debug)]
struct SpeculativeOutcome {
    /// Placements keyed by post-removal position.
    placements: PlacementCache,
    /// Speculative rects per placed position.
    rects: BTreeMap<usize, PxRect>,
    /// First post-removal position whose placement intersects the viewport.
    first_attached: Option<usize>,
    /// Per-column top frontier of the post-removal window.
    window_top: Vec<i32>,
}

/// The irregular-grid layout engine.
///
/// `H` is the host's tile handle type (see [`ItemProvider::Handle`]); the
/// engine keeps one handle per attached tile and returns it when the tile is
/// recycled or handed off for a removal animation.
///
/// The host must drive the entry points in its framework's order: structural
/// notifications first, then optionally one pre-layout pass, then exactly one
/// real layout pass, then any number of scroll deltas.
#[derive(Clone, Debug)]
pub struct GridEngine<H = ()> {
    options: GridOptions,
    bands: ColumnBands,
    viewport: Viewport,
    state: LayoutState,
    attached: VecDeque<AttachedTile<H>>,
    top_border: i32,
    bottom_border: i32,
    scroll_offset: i32,
    phase: ReconcilePhase,
    mutation: MutationRecord,
    speculative: Option<SpeculativeOutcome>,
    disappearing: DisappearingCache,
    initialized: bool,
}

impl<H> GridEngine<H> {
    /// Creates an engine from options.
    ///
    /// Fails without creating any state if the configuration cannot host
    /// double-span tiles.
    pub fn new(options: GridOptions) -> Result<Self, GridError> {
        options.validate()?;
        gdebug!(
            columns = options.column_count,
            sizing = ?options.sizing,
            "GridEngine::new"
        );
        Ok(Self {
            bands: ColumnBands::default(),
            viewport: Viewport::default(),
            state: LayoutState::new(options.column_count, 0),
            attached: VecDeque::new(),
            top_border: 0,
            bottom_border: 0,
            scroll_offset: 0,
            phase: ReconcilePhase::Stable,
            mutation: MutationRecord::default(),
            speculative: None,
            disappearing: DisappearingCache::new(),
            initialized: false,
            options,
        })
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn column_count(&self) -> usize {
        self.options.column_count
    }

    /// Pixel size of the smallest (1×1) span; zero before the first layout.
    pub fn span_unit(&self) -> i32 {
        self.bands.unit()
    }

    /// Cumulative signed pixel offset applied since initialization.
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn occupancy(&self) -> &SpanOccupancy {
        &self.state.occupancy
    }

    pub fn top_border(&self) -> i32 {
        self.top_border
    }

    pub fn bottom_border(&self) -> i32 {
        self.bottom_border
    }

    pub fn attached_len(&self) -> usize {
        self.attached.len()
    }

    pub fn first_attached_position(&self) -> Option<usize> {
        self.attached.front().map(|tile| tile.position)
    }

    pub fn last_attached_position(&self) -> Option<usize> {
        self.attached.back().map(|tile| tile.position)
    }

    pub fn attached_rect(&self, position: usize) -> Option<PxRect> {
        self.attached
            .iter()
            .find(|tile| tile.position == position)
            .map(|tile| tile.rect)
    }

    /// Visits every attached tile in ascending position order.
    pub fn for_each_attached(&self, mut f: impl FnMut(usize, PxRect)) {
        for tile in &self.attached {
            f(tile.position, tile.rect);
        }
    }

    /// Cached placement for a position, if it has ever been placed.
    pub fn placement(&self, position: usize) -> Option<Placement> {
        self.state.placements.get(position)
    }

    pub fn disappearing_len(&self) -> usize {
        self.disappearing.len()
    }

    /// Items recorded as removed above the attached window since the last
    /// real layout pass.
    pub fn removed_above_viewport(&self) -> usize {
        self.mutation.removed_above
    }

    /// The entire dataset changed; the next real pass detaches everything and
    /// relayouts from position 0, skipping removal reconciliation.
    pub fn notify_dataset_changed(&mut self) {
        gdebug!("notify_dataset_changed");
        self.mutation.full_invalidation = true;
    }

    /// Records the removal of `count` items starting at `start`.
    ///
    /// `start` is in the dataset coordinates current at call time (hosts
    /// remove from their data first, then notify). Notifications arriving
    /// after the pre-layout pass of the current cycle are ignored, matching
    /// the host framework's ordering contract.
    pub fn notify_items_removed(&mut self, start: usize, count: usize) {
        if count == 0 || self.phase == ReconcilePhase::Reconciling {
            return;
        }
        gdebug!(start, count, "notify_items_removed");
        let first_changed = match self.mutation.first_changed {
            Some(existing) => existing.min(start),
            None => start,
        };
        self.mutation.first_changed = Some(first_changed);
        if let Some(first_attached) = self.state.first_attached {
            if first_changed < first_attached {
                self.mutation.removed_above += count;
            }
        }
        self.mutation.removed_ranges.push((start, count));
        self.phase = ReconcilePhase::PreLayoutPending;
    }

    /// Runs one layout pass.
    ///
    /// The pre pass is purely speculative: it estimates appear/disappear
    /// outcomes on a cloned state and records exiting tiles, without calling
    /// any of the provider's view operations. The real pass is authoritative.
    pub fn run_layout<P>(&mut self, provider: &mut P, phase: LayoutPhase)
    where
        P: ItemProvider<Handle = H>,
    {
        match phase {
            LayoutPhase::Pre => self.run_pre_layout(provider),
            LayoutPhase::Real => self.run_real_layout(provider),
        }
    }

    /// Applies a scroll delta: extends coverage in the scrolled direction,
    /// shifts the window, and recycles tiles that left the viewport.
    ///
    /// Returns the applied delta, which is smaller in magnitude than `dy` at
    /// either end of the dataset.
    pub fn scroll_by<P>(&mut self, provider: &mut P, dy: i32) -> i32
    where
        P: ItemProvider<Handle = H>,
    {
        if self.attached.is_empty() || dy == 0 {
            return 0;
        }
        self.scroll_core(provider, dy)
    }

    fn run_pre_layout<P>(&mut self, provider: &mut P)
    where
        P: ItemProvider<Handle = H>,
    {
        // A full invalidation skips reconciliation entirely.
        if self.mutation.full_invalidation {
            return;
        }
        if self.attached.is_empty() {
            return;
        }
        let Some(first_changed) = self.mutation.first_changed else {
            self.phase = ReconcilePhase::Reconciling;
            return;
        };
        gdebug!(first_changed, "pre-layout pass");
        if first_changed <= self.state.last_attached.unwrap_or(0) {
            let outcome = self.speculative_pass(provider, first_changed);
            self.record_disappearing(&outcome);
            self.speculative = Some(outcome);
        }
        self.phase = ReconcilePhase::Reconciling;
    }

    /// Re-places the window on a duplicate of the authoritative state to
    /// learn where each surviving item lands after the recorded removals.
    fn speculative_pass<P>(&self, provider: &P, first_changed: usize) -> SpeculativeOutcome
    where
        P: ItemProvider<Handle = H>,
    {
        let count = provider.item_count();
        let unit = self.bands.unit();
        let resolver = SpanResolver::new(self.options.sizing);
        let first_attached = self.state.first_attached.unwrap_or(0);

        let mut occupancy = self.state.occupancy.clone();
        let mut placements = self.state.placements.clone();
        placements.invalidate_from(first_changed);

        let (start, mut first_visible) = if first_changed < first_attached {
            // The removal reaches above the window: rebuild the frontier from
            // the absolute origin by replaying the cached placements below
            // the change.
            let origin = self.viewport.insets.top - self.scroll_offset;
            occupancy.reset(origin);
            for (_, placement) in placements.iter_below(first_changed) {
                occupancy.occupy_bottom(
                    placement.start_column,
                    placement.span.width as usize,
                    placement.span.height as i32 * unit,
                );
            }
            occupancy.rebase_top_to_bottom();
            (first_changed, None)
        } else {
            occupancy.rebase_bottom_to_top();
            (first_attached, Some(first_attached))
        };

        let mut window_top = occupancy.tops().to_vec();
        let mut rects = BTreeMap::new();
        let mut position = start;
        while occupancy.bottom_min() <= self.bottom_border && position < count {
            let frontier_before = if first_visible.is_none() {
                occupancy.bottoms().to_vec()
            } else {
                Vec::new()
            };
            let placement = match placements.get(position) {
                Some(placement) => placement,
                None => {
                    let base = resolver.resolve(
                        position,
                        provider.span_hint(position),
                        provider.intrinsic_size(position),
                        unit,
                    );
                    let placement = place_downward(base, &occupancy);
                    placements.insert(position, placement);
                    placement
                }
            };
            let rect = self.rect_down(&placement, occupancy.bottom_min(), unit);
            occupancy.occupy_bottom(
                placement.start_column,
                placement.span.width as usize,
                placement.span.height as i32 * unit,
            );
            rects.insert(position, rect);
            if first_visible.is_none() && rect.bottom > self.top_border {
                first_visible = Some(position);
                window_top = frontier_before;
            }
            position += 1;
        }

        SpeculativeOutcome {
            placements,
            rects,
            first_attached: first_visible,
            window_top,
        }
    }

    /// Diffs the attached tiles against the speculative outcome: removed
    /// tiles and survivors whose new placement lies outside the viewport are
    /// recorded with their last authoritative rect.
    fn record_disappearing(&mut self, outcome: &SpeculativeOutcome) {
        let viewport_bottom = self.viewport.bottom_border();
        for tile in &self.attached {
            let exiting = match self.mutation.surviving_position(tile.position) {
                None => true,
                Some(survivor) => match outcome.rects.get(&survivor) {
                    Some(rect) => rect.bottom <= self.top_border || rect.top >= viewport_bottom,
                    None => false,
                },
            };
            if exiting {
                gtrace!(position = tile.position, "tile will disappear");
                self.disappearing.insert(tile.position, tile.rect);
            }
        }
    }

    fn run_real_layout<P>(&mut self, provider: &mut P)
    where
        P: ItemProvider<Handle = H>,
    {
        let count = provider.item_count();
        if count == 0 {
            // Empty dataset: detach everything and do nothing.
            self.detach_all(provider);
            self.finish_real_pass();
            return;
        }

        let viewport = provider.viewport();
        if viewport.is_degenerate() {
            self.detach_all(provider);
            self.finish_real_pass();
            return;
        }
        let geometry_changed = self
            .bands
            .update(viewport.content_width(), self.options.column_count);
        self.viewport = viewport;

        if !self.initialized
            || geometry_changed
            || self.mutation.full_invalidation
            || self.attached.is_empty()
        {
            gdebug!(
                count,
                geometry_changed,
                full = self.mutation.full_invalidation,
                "real layout: fresh fill"
            );
            self.detach_all(provider);
            self.initialize_state();
            self.fill(provider, FillDirection::Down, Some(0), count);
            self.finish_real_pass();
            return;
        }

        if self.mutation.first_changed.is_none() {
            // No structural change: re-place the current window in place.
            let first = self.state.first_attached.unwrap_or(0).min(count - 1);
            self.detach_all(provider);
            self.begin_window_refill(first);
            self.fill(provider, FillDirection::Down, Some(first), count);
            self.finish_real_pass();
            return;
        }

        self.reconcile_removals(provider, count);
        self.finish_real_pass();
    }

    fn reconcile_removals<P>(&mut self, provider: &mut P, count: usize)
    where
        P: ItemProvider<Handle = H>,
    {
        let first_changed = self.mutation.first_changed.unwrap_or(0);
        let outcome = self.speculative.take();
        gdebug!(
            first_changed,
            speculated = outcome.is_some(),
            disappearing = self.disappearing.len(),
            "real layout: reconcile removals"
        );

        // Invalidate stale placements, then merge the speculative ones in.
        self.state.placements.invalidate_from(first_changed);
        if let Some(outcome) = &outcome {
            for (position, placement) in outcome.placements.iter_from(first_changed) {
                self.state.placements.insert(position, placement);
            }
        }

        // Detach everything, keeping handles for tiles that animate out.
        let kept = self.detach_keeping_disappearing(provider);

        // Adopt the post-removal window.
        let (first, window_top) = match &outcome {
            Some(outcome) => (
                outcome
                    .first_attached
                    .or(self.state.first_attached)
                    .unwrap_or(0),
                Some(outcome.window_top.clone()),
            ),
            None => {
                if first_changed < self.state.first_attached.unwrap_or(0) {
                    gwarn!(
                        first_changed,
                        "removal above the window reached the real pass without \
                         a pre-layout pass; refilling the window in place"
                    );
                }
                (self.state.first_attached.unwrap_or(0), None)
            }
        };
        let first = first.min(count - 1);
        if let Some(tops) = window_top {
            self.state.occupancy.set_top(&tops);
        }
        self.begin_window_refill(first);
        self.fill(provider, FillDirection::Down, Some(first), count);

        // The dataset ran out before the viewport was covered: pull content
        // back down from above.
        let shortfall = self.state.occupancy.bottom_max() - self.bottom_border;
        if shortfall < 0 {
            self.scroll_core(provider, shortfall);
        }

        self.layout_disappearing(provider, kept);
    }

    /// Lays out disappearing tiles at their last rect, in descending position
    /// order, and hands their handles to the host for the exit animation.
    fn layout_disappearing<P>(&mut self, provider: &mut P, kept: Vec<(usize, H)>)
    where
        P: ItemProvider<Handle = H>,
    {
        if kept.is_empty() {
            return;
        }
        let mut kept: BTreeMap<usize, H> = kept.into_iter().collect();
        let entries: Vec<_> = self.disappearing.iter_descending().collect();
        for (position, tile) in entries {
            let Some(mut handle) = kept.remove(&position) else {
                continue;
            };
            // A tile the backfill re-attached is visible again; it no longer
            // disappears.
            if let Some(survivor) = self.mutation.surviving_position(position) {
                if self.attached.iter().any(|tile| tile.position == survivor) {
                    provider.recycle(position, handle);
                    continue;
                }
            }
            provider.measure_exact(&mut handle, tile.measure);
            provider.position_item(&mut handle, tile.rect);
            provider.disappear_item(position, handle, tile.rect);
        }
        for (position, handle) in kept {
            provider.recycle(position, handle);
        }
    }

    fn initialize_state(&mut self) {
        self.top_border = self.viewport.top_border();
        self.bottom_border = self.viewport.bottom_border();
        self.state = LayoutState::new(self.options.column_count, self.viewport.top_border());
        self.scroll_offset = 0;
    }

    /// Resets the borders and restarts the bottom frontier at the current
    /// tops, ready to re-place the window downward from `first`.
    fn begin_window_refill(&mut self, first: usize) {
        self.top_border = self.viewport.top_border();
        self.bottom_border = self.viewport.bottom_border();
        self.state.occupancy.rebase_bottom_to_top();
        self.state.first_attached = Some(first);
        self.state.last_attached = Some(first);
    }

    fn finish_real_pass(&mut self) {
        self.initialized = true;
        self.phase = ReconcilePhase::Stable;
        self.mutation.reset();
        self.speculative = None;
        self.disappearing.clear();
    }

    fn detach_all<P>(&mut self, provider: &mut P)
    where
        P: ItemProvider<Handle = H>,
    {
        while let Some(tile) = self.attached.pop_front() {
            provider.recycle(tile.position, tile.handle);
        }
    }

    fn detach_keeping_disappearing<P>(&mut self, provider: &mut P) -> Vec<(usize, H)>
    where
        P: ItemProvider<Handle = H>,
    {
        let mut kept = Vec::new();
        while let Some(tile) = self.attached.pop_front() {
            if self.disappearing.contains(tile.position) {
                kept.push((tile.position, tile.handle));
            } else {
                provider.recycle(tile.position, tile.handle);
            }
        }
        kept
    }

    /// Places items one at a time until the frontier passes the border in the
    /// fill direction or positions run out.
    fn fill<P>(
        &mut self,
        provider: &mut P,
        direction: FillDirection,
        mut cursor: Option<usize>,
        count: usize,
    ) where
        P: ItemProvider<Handle = H>,
    {
        loop {
            let wants_more = match direction {
                FillDirection::Down => self.state.occupancy.bottom_min() <= self.bottom_border,
                FillDirection::Up => self.state.occupancy.top_max() >= self.top_border,
            };
            if !wants_more {
                break;
            }
            let Some(position) = cursor else { break };
            if position >= count {
                break;
            }
            self.layout_chunk(provider, position, direction);
            cursor = match direction {
                FillDirection::Down => position.checked_add(1),
                FillDirection::Up => position.checked_sub(1),
            };
        }
    }

    /// Places a single item: resolve its placement (cache first), compute the
    /// rect from the column borders and the relevant frontier, drive the
    /// host's view pipeline, and advance the occupancy.
    fn layout_chunk<P>(&mut self, provider: &mut P, position: usize, direction: FillDirection)
    where
        P: ItemProvider<Handle = H>,
    {
        let unit = self.bands.unit();
        let placement = match self.state.placements.get(position) {
            Some(placement) => placement,
            None => {
                let resolver = SpanResolver::new(self.options.sizing);
                let base = resolver.resolve(
                    position,
                    provider.span_hint(position),
                    provider.intrinsic_size(position),
                    unit,
                );
                let placement = match direction {
                    FillDirection::Down => place_downward(base, &self.state.occupancy),
                    // Upward cache misses only happen after heavy deletion
                    // reset the window; start at the leftmost column.
                    FillDirection::Up => Placement {
                        span: base,
                        start_column: 0,
                    },
                };
                self.state.placements.insert(position, placement);
                placement
            }
        };

        let height_px = placement.span.height as i32 * unit;
        let rect = match direction {
            FillDirection::Down => {
                self.rect_down(&placement, self.state.occupancy.bottom_min(), unit)
            }
            FillDirection::Up => self.rect_up(
                &placement,
                self.state.occupancy.top_of(placement.start_column),
                unit,
            ),
        };

        let mut handle = provider.get_or_create(position);
        provider.measure_exact(&mut handle, rect.size());
        provider.position_item(&mut handle, rect);

        let tile = AttachedTile {
            position,
            rect,
            placement,
            handle,
        };
        match direction {
            FillDirection::Down => {
                self.state.occupancy.occupy_bottom(
                    placement.start_column,
                    placement.span.width as usize,
                    height_px,
                );
                self.attached.push_back(tile);
                self.state.last_attached = Some(position);
            }
            FillDirection::Up => {
                self.state.occupancy.occupy_top(
                    placement.start_column,
                    placement.span.width as usize,
                    height_px,
                );
                self.attached.push_front(tile);
                self.state.first_attached = Some(position);
            }
        }
    }

    fn rect_down(&self, placement: &Placement, frontier: i32, unit: i32) -> PxRect {
        let left = self.viewport.insets.left + self.bands.left_of(placement.start_column);
        let right = self.viewport.insets.left + self.bands.left_of(placement.end_column());
        PxRect {
            left,
            top: frontier,
            right,
            bottom: frontier + placement.span.height as i32 * unit,
        }
    }

    fn rect_up(&self, placement: &Placement, frontier: i32, unit: i32) -> PxRect {
        let left = self.viewport.insets.left + self.bands.left_of(placement.start_column);
        let right = self.viewport.insets.left + self.bands.left_of(placement.end_column());
        PxRect {
            left,
            top: frontier - placement.span.height as i32 * unit,
            right,
            bottom: frontier,
        }
    }

    fn scroll_core<P>(&mut self, provider: &mut P, dy: i32) -> i32
    where
        P: ItemProvider<Handle = H>,
    {
        let count = provider.item_count();
        let delta;
        if dy > 0 {
            // Reveal content below: extend the bottom border and fill, then
            // clamp the delta to what the filled region can cover.
            self.top_border = self.viewport.top_border();
            self.bottom_border += dy;
            let cursor = self.state.last_attached.map(|last| last + 1);
            self.fill(provider, FillDirection::Down, cursor, count);
            if self.state.occupancy.bottom_min() >= self.bottom_border {
                delta = dy;
                self.bottom_border -= dy;
            } else {
                // No more items below; never leave a gap under the viewport.
                self.bottom_border = self.viewport.bottom_border();
                let slack = self.state.occupancy.bottom_max() - self.bottom_border;
                delta = if slack >= dy { dy } else { slack.max(0) };
            }
            provider.offset_items(-delta);
            self.apply_offset(-delta);
            self.recycle_top_invisible(provider);
        } else {
            // Reveal content above.
            self.top_border += dy;
            self.bottom_border = self.viewport.bottom_border();
            let cursor = match self.state.first_attached {
                Some(first) if first < count => first.checked_sub(1),
                _ => {
                    // Heavy deletion left the window past the dataset end.
                    let last = count.saturating_sub(1);
                    self.state.first_attached = Some(last);
                    self.state.last_attached = Some(last);
                    Some(last)
                }
            };
            self.fill(provider, FillDirection::Up, cursor, count);
            if self.state.occupancy.top_max() <= self.top_border {
                delta = dy;
                self.top_border -= dy;
            } else {
                // No more items above.
                self.top_border = self.viewport.top_border();
                let slack = self.state.occupancy.top_min() - self.top_border;
                delta = if slack <= dy {
                    dy
                } else {
                    -((self.top_border - self.state.occupancy.top_min()).max(0))
                };
            }
            provider.offset_items(-delta);
            self.apply_offset(-delta);
            self.recycle_bottom_invisible(provider);
        }
        self.scroll_offset += delta;
        gtrace!(dy, delta, "scroll applied");
        delta
    }

    /// Shifts the frontier arrays and the engine's copies of attached rects.
    fn apply_offset(&mut self, offset: i32) {
        if offset == 0 {
            return;
        }
        self.state.occupancy.shift(offset);
        for tile in &mut self.attached {
            tile.rect.top += offset;
            tile.rect.bottom += offset;
        }
    }

    /// Recycles attached tiles fully above the top border, folding their span
    /// back out of the occupancy, stopping at the first visible tile.
    fn recycle_top_invisible<P>(&mut self, provider: &mut P)
    where
        P: ItemProvider<Handle = H>,
    {
        let unit = self.bands.unit();
        let mut recycled = 0;
        loop {
            let Some(tile) = self.attached.front() else {
                break;
            };
            if tile.rect.bottom > self.top_border {
                break;
            }
            let Some(tile) = self.attached.pop_front() else {
                break;
            };
            self.state.occupancy.release_top(
                tile.placement.start_column,
                tile.placement.span.width as usize,
                tile.placement.span.height as i32 * unit,
            );
            provider.recycle(tile.position, tile.handle);
            recycled += 1;
        }
        if recycled > 0 {
            self.state.first_attached = self
                .attached
                .front()
                .map(|tile| tile.position)
                .or_else(|| self.state.first_attached.map(|first| first + recycled));
        }
    }

    /// Recycles attached tiles fully below the bottom border.
    fn recycle_bottom_invisible<P>(&mut self, provider: &mut P)
    where
        P: ItemProvider<Handle = H>,
    {
        let unit = self.bands.unit();
        let mut recycled = 0;
        loop {
            let Some(tile) = self.attached.back() else {
                break;
            };
            if tile.rect.top < self.bottom_border {
                break;
            }
            let Some(tile) = self.attached.pop_back() else {
                break;
            };
            self.state.occupancy.release_bottom(
                tile.placement.start_column,
                tile.placement.span.width as usize,
                tile.placement.span.height as i32 * unit,
            );
            provider.recycle(tile.position, tile.handle);
            recycled += 1;
        }
        if recycled > 0 {
            self.state.last_attached = self
                .attached
                .back()
                .map(|tile| tile.position)
                .or_else(|| {
                    self.state
                        .last_attached
                        .map(|last| last.saturating_sub(recycled))
                });
        }
    }
}

/// Downward placement rule: a width-2 tile needs two adjacent columns at the
/// minimum frontier; when none exist it is downgraded to width 1 rather than
/// stalling the fill.
fn place_downward(base: SpanSize, occupancy: &SpanOccupancy) -> Placement {
    let mut width = base.width;
    if occupancy.first_free_double().is_none() {
        width = 1;
    }
    let start_column = if width == 1 {
        occupancy.first_free_single()
    } else {
        occupancy.first_free_double().unwrap_or(0)
    };
    Placement {
        span: SpanSize {
            width,
            height: base.height,
        },
        start_column,
    }
}
