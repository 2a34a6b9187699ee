use crate::*;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use irregrid::{GridOptions, ItemProvider, PxRect, PxSize, Viewport};

struct Host {
    count: usize,
    viewport: Viewport,
    next_handle: u32,
    live: BTreeMap<u32, (usize, PxRect)>,
    disappeared: Vec<(usize, PxRect)>,
}

impl Host {
    fn new(count: usize, width: i32, height: i32) -> Self {
        Self {
            count,
            viewport: Viewport::new(width, height),
            next_handle: 0,
            live: BTreeMap::new(),
            disappeared: Vec::new(),
        }
    }
}

impl ItemProvider for Host {
    type Handle = u32;

    fn item_count(&self) -> usize {
        self.count
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn get_or_create(&mut self, position: usize) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.live.insert(handle, (position, PxRect::default()));
        handle
    }

    fn measure_exact(&mut self, _handle: &mut u32, _size: PxSize) {}

    fn position_item(&mut self, handle: &mut u32, rect: PxRect) {
        if let Some(entry) = self.live.get_mut(handle) {
            entry.1 = rect;
        }
    }

    fn recycle(&mut self, _position: usize, handle: u32) {
        self.live.remove(&handle);
    }

    fn offset_items(&mut self, dy: i32) {
        for entry in self.live.values_mut() {
            entry.1.top += dy;
            entry.1.bottom += dy;
        }
    }

    fn disappear_item(&mut self, position: usize, handle: u32, rect: PxRect) {
        self.live.remove(&handle);
        self.disappeared.push((position, rect));
    }
}

#[test]
fn controller_sequences_the_removal_protocol() {
    let mut host = Host::new(30, 400, 350);
    let mut controller: GridController<u32> = GridController::new(GridOptions::new()).unwrap();
    controller.layout(&mut host);
    let removed_rect = controller.engine().attached_rect(5).unwrap();

    host.count = 29;
    controller.remove_items(&mut host, 5, 1);

    assert_eq!(host.disappeared, alloc::vec![(5, removed_rect)]);
    assert_eq!(controller.engine().disappearing_len(), 0);
    assert_eq!(controller.engine().attached_rect(5), Some(removed_rect));
}

#[test]
fn controller_refresh_restarts_from_the_top() {
    let mut host = Host::new(100, 400, 450);
    let mut controller: GridController<u32> = GridController::new(GridOptions::new()).unwrap();
    controller.layout(&mut host);
    controller.scroll(&mut host, 300);
    assert_ne!(controller.engine().scroll_offset(), 0);

    host.count = 40;
    controller.refresh(&mut host);
    assert_eq!(controller.engine().scroll_offset(), 0);
    assert_eq!(controller.engine().first_attached_position(), Some(0));
}

#[test]
fn anchor_pins_the_first_visible_tile_across_scrolls() {
    let mut host = Host::new(100, 400, 450);
    let mut controller: GridController<u32> = GridController::new(GridOptions::new()).unwrap();
    controller.layout(&mut host);
    controller.scroll(&mut host, 250);

    let anchor = controller.capture_first_visible_anchor().unwrap();
    assert_eq!(anchor.position, 8);
    assert_eq!(anchor.offset_in_viewport, -50);

    controller.scroll(&mut host, 30);
    assert!(controller.apply_anchor(&mut host, &anchor));
    assert_eq!(
        controller.engine().attached_rect(8).map(|rect| rect.top),
        Some(-50)
    );
}

#[test]
fn anchor_application_fails_once_the_tile_is_recycled() {
    let mut host = Host::new(100, 400, 450);
    let mut controller: GridController<u32> = GridController::new(GridOptions::new()).unwrap();
    controller.layout(&mut host);
    let anchor = controller.capture_first_visible_anchor().unwrap();
    assert_eq!(anchor.position, 0);

    controller.scroll(&mut host, 800);
    assert!(!controller.apply_anchor(&mut host, &anchor));
}

#[test]
fn tween_drives_the_engine_to_the_full_delta() {
    let mut host = Host::new(1000, 400, 450);
    let mut controller: GridController<u32> = GridController::new(GridOptions::new()).unwrap();
    controller.layout(&mut host);

    controller.start_scroll_animation(300, 0, 100, Easing::Linear);
    assert!(controller.is_animating());

    let mut applied = 0;
    for now_ms in [0u64, 25, 50, 75, 100, 125] {
        if let Some(step) = controller.tick(&mut host, now_ms) {
            assert!(step >= 0);
            applied += step;
        }
    }
    assert!(!controller.is_animating());
    assert_eq!(applied, 300);
    assert_eq!(controller.engine().scroll_offset(), 300);
}

#[test]
fn tween_cancels_when_the_dataset_ends() {
    let mut host = Host::new(20, 400, 450);
    let mut controller: GridController<u32> = GridController::new(GridOptions::new()).unwrap();
    controller.layout(&mut host);

    // Only 50 px of slack exist below the viewport.
    controller.start_scroll_animation(400, 0, 100, Easing::Linear);
    controller.tick(&mut host, 50);
    assert!(!controller.is_animating());
    assert_eq!(controller.engine().scroll_offset(), 50);
}

#[test]
fn easing_curves_start_and_end_at_the_extremes() {
    for easing in [Easing::Linear, Easing::SmoothStep, Easing::EaseInOutCubic] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
    }
}
