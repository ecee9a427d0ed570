//! Marquee selection across rows the grid never mounted.
//!
//! Grid: 4 columns of 100x100 cells with a 10px gap, no overscan, and a
//! 200px viewport, so only two rows are mounted at a time.

use egrid_core::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use egrid_widgets::layout::ColumnCount;
use egrid_widgets::open::{ExplorerHost, NavigationTarget};
use egrid_widgets::{
    ExplorerContext, ExplorerGrid, ExplorerItem, GridBuilder, GridConfig, GridOutcome, ItemState, PlatformError,
};
use egrid_widgets::item::FilePathItem;
use web_time::Instant;

struct NoHost;

impl ExplorerHost for NoHost {
    fn navigate(&mut self, _target: NavigationTarget) {}
    fn open_file_paths(&mut self, _ids: &[i32]) -> Result<(), PlatformError> {
        Ok(())
    }
    fn open_ephemeral_files(&mut self, _paths: &[String]) -> Result<(), PlatformError> {
        Ok(())
    }
}

fn file(id: i32) -> ExplorerItem {
    ExplorerItem::path(FilePathItem {
        id,
        name: format!("photo-{id}.jpg"),
        ..FilePathItem::default()
    })
}

fn grid(viewport_height: f32) -> ExplorerGrid {
    let mut config = GridConfig::default();
    config.layout.columns = ColumnCount::Fixed(4);
    config.layout.item_width = 100.0;
    config.layout.item_height = 100.0;
    config.layout.gap_x = 10.0;
    config.layout.gap_y = 10.0;
    config.layout.padding = 0.0;
    config.virtualization.overscan_rows = 0;
    let mut grid = GridBuilder::new()
        .config(config)
        .context(ExplorerContext::new())
        .viewport(450.0, viewport_height)
        .build()
        .expect("valid grid");
    grid.replace_items(Some("location:1:/".into()), (0..20).map(file).collect(), false);
    grid
}

fn mouse(kind: MouseEventKind, x: f32, y: f32) -> Event {
    Event::Mouse(MouseEvent::new(kind, x, y))
}

fn selected(grid: &ExplorerGrid) -> Vec<usize> {
    let mut out: Vec<usize> = grid
        .selection()
        .ids()
        .filter_map(|id| grid.items().index_of(id))
        .collect();
    out.sort_unstable();
    out
}

#[test]
fn scrolling_mid_drag_selects_rows_that_were_never_mounted() {
    let mut g = grid(200.0);
    let mut host = NoHost;
    let now = Instant::now();

    // Press in the gap above row 1, column 1; move just past the threshold.
    g.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 150.0, 105.0), &mut host, now);
    g.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 155.0, 106.0), &mut host, now);
    assert!(g.context().is_drag_selecting.get());
    assert!(g.selection().is_empty());

    // Jump to rows 3-4. Rows 1-2 are never mounted.
    let out = g.handle_event(&Event::Scroll { top: 330.0 }, &mut host, now);
    assert_eq!(out, vec![GridOutcome::SelectionChanged]);
    assert_eq!(g.virtual_grid().mounted_range(), 12..20);
    assert_eq!(selected(&g), vec![5, 9, 13]);

    // Content y = 160 + 330 = 490 reaches row 4.
    g.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 170.0, 160.0), &mut host, now);
    assert_eq!(selected(&g), vec![5, 9, 13, 17]);

    g.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 170.0, 160.0), &mut host, now);
    assert!(!g.context().is_drag_selecting.get());
    assert_eq!(selected(&g), vec![5, 9, 13, 17]);
    assert!(g.item_state(13).contains(ItemState::ANCHOR));
}

#[test]
fn fully_mounted_drag_gives_the_same_column() {
    let mut g = grid(1000.0);
    let mut host = NoHost;
    let now = Instant::now();

    g.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 150.0, 105.0), &mut host, now);
    g.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 170.0, 490.0), &mut host, now);
    g.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 170.0, 490.0), &mut host, now);

    assert_eq!(selected(&g), vec![5, 9, 13, 17]);
    assert!(g.item_state(5).contains(ItemState::ANCHOR));
}

#[test]
fn unmounted_selection_survives_scrolling_back() {
    let mut g = grid(200.0);
    let mut host = NoHost;
    let now = Instant::now();

    g.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 150.0, 105.0), &mut host, now);
    g.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 155.0, 106.0), &mut host, now);
    g.handle_event(&Event::Scroll { top: 330.0 }, &mut host, now);
    g.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 155.0, 106.0), &mut host, now);
    let before = selected(&g);

    g.handle_event(&Event::Scroll { top: 0.0 }, &mut host, now);
    assert_eq!(selected(&g), before);
    assert!(g.item_state(5).contains(ItemState::SELECTED));
}
