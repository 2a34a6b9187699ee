// Example: fill a simulated host, scroll, and walk the attached window.
use irregrid::{
    GridEngine, GridOptions, ItemProvider, LayoutPhase, PxRect, PxSize, Viewport,
};

struct DemoHost {
    count: usize,
}

impl ItemProvider for DemoHost {
    type Handle = usize;

    fn item_count(&self) -> usize {
        self.count
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(400, 600)
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
    let mut host = DemoHost { count: 10_000 };
    let mut engine: GridEngine<usize> =
        GridEngine::new(GridOptions::new().with_randomized_sizing(42)).unwrap();

    engine.run_layout(&mut host, LayoutPhase::Real);
    println!("unit={}px, attached={}", engine.span_unit(), engine.attached_len());
    engine.for_each_attached(|position, rect| {
        println!("  #{position}: {rect:?}");
    });

    let applied = engine.scroll_by(&mut host, 1_000);
    println!(
        "scrolled {applied}px, window now {:?}..={:?}",
        engine.first_attached_position(),
        engine.last_attached_position()
    );
}
