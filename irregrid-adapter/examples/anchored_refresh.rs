// Example: keep the viewport pinned to the same tile across a relayout.
use irregrid::{GridOptions, ItemProvider, PxRect, PxSize, Viewport};
use irregrid_adapter::GridController;

struct DemoHost {
    count: usize,
}

impl ItemProvider for DemoHost {
    type Handle = usize;

    fn item_count(&self) -> usize {
        self.count
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(400, 500)
    }

    fn get_or_create(&mut self, position: usize) -> usize {
        position
    }

    fn measure_exact(&mut self, _handle: &mut usize, _size: PxSize) {}

    fn position_item(&mut self, _handle: &mut usize, _rect: PxRect) {}

    fn recycle(&mut self, _position: usize, _handle: usize) {}

    fn offset_items(&mut self, _dy: i32) {}
}

fn main() {
    let mut host = DemoHost { count: 500 };
    let mut controller: GridController<usize> =
        GridController::new(GridOptions::new()).unwrap();

    controller.layout(&mut host);
    controller.scroll(&mut host, 730);

    let anchor = controller.capture_first_visible_anchor().unwrap();
    println!("anchored to #{} at {:+}px", anchor.position, anchor.offset_in_viewport);

    // A relayout (e.g. after returning to this screen) keeps the window, and
    // the anchor corrects any drift.
    controller.layout(&mut host);
    let applied = controller.apply_anchor(&mut host, &anchor);
    println!("anchor applied: {applied}");
}
