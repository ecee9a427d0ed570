#![no_main]

use arbitrary::Arbitrary;
use egrid_core::geometry::{Point, Size};
use egrid_core::observable::Observable;
use egrid_widgets::item::FilePathItem;
use egrid_widgets::layout::{Gap, GridLayout};
use egrid_widgets::{ExplorerItem, ItemCollection, MarqueeController, SelectionModel, Viewport, VirtualGrid};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Step {
    Tick { x: u16, y: u16 },
    Scroll { top: u16 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    columns: u8,
    count: u16,
    viewport: u16,
    overscan: u8,
    shift: bool,
    cancel: bool,
    preselect: Vec<u16>,
    start: (u16, u16),
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    let columns = usize::from(input.columns % 8) + 1;
    let count = usize::from(input.count % 600);
    let layout = GridLayout::fixed(columns, Size::new(100.0, 100.0), Gap::uniform(10.0));
    let mut grid = VirtualGrid::new(layout, count)
        .with_overscan(usize::from(input.overscan % 4))
        .with_viewport(Viewport::new(0.0, f32::from(input.viewport % 2000) + 1.0));
    let items = ItemCollection::from_items((0..count as i32).map(|id| {
        ExplorerItem::path(FilePathItem {
            id,
            name: format!("f{id}"),
            ..FilePathItem::default()
        })
    }));

    let mut selection = SelectionModel::new(true);
    for i in input.preselect.iter().take(32) {
        if let Some(item) = items.get(usize::from(*i)) {
            selection.add(item);
        }
    }

    let flag = Observable::new(false);
    let mut marquee = MarqueeController::new(flag.clone());
    let start = Point::new(f32::from(input.start.0 % 1000), f32::from(input.start.1));
    marquee.begin(start, input.shift, &grid, &items, &mut selection);

    let mut pointer = start;
    for step in input.steps.iter().take(64) {
        match *step {
            Step::Tick { x, y } => pointer = Point::new(f32::from(x % 1000), f32::from(y)),
            Step::Scroll { top } => grid.set_scroll_top(f32::from(top)),
        }
        marquee.tick(pointer, &grid, &items, &mut selection);

        // Every member is a loaded item.
        for id in selection.ids() {
            assert!(items.contains(id), "selected id {id:?} not in collection");
        }
        if let Some(anchor) = selection.anchor() {
            assert!(selection.has(anchor), "anchor is not a member");
        }
    }

    if input.cancel {
        marquee.cancel(&items, &mut selection);
    } else {
        marquee.end(&items, &mut selection);
    }
    assert!(!flag.get(), "drag flag left raised");
    assert!(!marquee.is_selecting());
    // At rest a non-empty selection is anchored on one of its members.
    if selection.size() > 0 {
        let anchor = selection.anchor().expect("non-empty selection without anchor");
        assert!(selection.has(anchor), "anchor is not a member");
    }
});
