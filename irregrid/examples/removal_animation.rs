// Example: the two-phase protocol around a removal, with disappearing tiles
// handed back for an exit animation.
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
        Viewport::new(400, 400)
    }

    fn get_or_create(&mut self, position: usize) -> usize {
        position
    }

    fn measure_exact(&mut self, _handle: &mut usize, _size: PxSize) {}

    fn position_item(&mut self, _handle: &mut usize, _rect: PxRect) {}

    fn recycle(&mut self, _position: usize, _handle: usize) {}

    fn offset_items(&mut self, _dy: i32) {}

    fn disappear_item(&mut self, position: usize, _handle: usize, rect: PxRect) {
        println!("animate out #{position} from {rect:?}");
    }
}

fn main() {
    let mut host = DemoHost { count: 100 };
    let mut engine: GridEngine<usize> = GridEngine::new(GridOptions::new()).unwrap();
    engine.run_layout(&mut host, LayoutPhase::Real);
    println!("before: {} tiles attached", engine.attached_len());

    // The host removes two visible items, then drives both passes.
    host.count -= 2;
    engine.notify_items_removed(3, 2);
    engine.run_layout(&mut host, LayoutPhase::Pre);
    println!("speculated: {} tiles will disappear", engine.disappearing_len());
    engine.run_layout(&mut host, LayoutPhase::Real);

    println!("after: {} tiles attached", engine.attached_len());
}
