//! Keyboard navigation through the full grid event path.

use egrid_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use egrid_widgets::context::QuickPreview;
use egrid_widgets::item::{ExplorerItem, FilePathItem};
use egrid_widgets::layout::ColumnCount;
use egrid_widgets::open::{ExplorerHost, NavigationTarget};
use egrid_widgets::{ExplorerContext, ExplorerGrid, GridBuilder, GridConfig, PlatformError};
use proptest::prelude::*;
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

fn file(id: usize) -> ExplorerItem {
    ExplorerItem::path(FilePathItem {
        id: id as i32,
        name: format!("item-{id}"),
        ..FilePathItem::default()
    })
}

fn grid(count: usize, columns: usize) -> ExplorerGrid {
    let mut config = GridConfig::default();
    config.layout.columns = ColumnCount::Fixed(columns);
    config.layout.padding = 0.0;
    let mut grid = GridBuilder::new()
        .config(config)
        .context(ExplorerContext::new())
        .viewport(800.0, 2000.0)
        .build()
        .expect("valid grid");
    grid.replace_items(Some("loc".into()), (0..count).map(file).collect(), false);
    grid
}

fn select(grid: &mut ExplorerGrid, indices: &[usize], anchor: usize) {
    let items: Vec<_> = indices.iter().map(|&i| file(i)).collect();
    let sel = grid.selection_mut();
    sel.reset(&items);
    sel.set_anchor(Some(file(anchor).id()));
}

fn press(grid: &mut ExplorerGrid, code: KeyCode, modifiers: Modifiers) {
    let event = Event::Key(KeyEvent::new(code).with_modifiers(modifiers));
    grid.handle_event(&event, &mut NoHost, Instant::now());
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

fn anchor(grid: &ExplorerGrid) -> Option<usize> {
    grid.selection().anchor().and_then(|id| grid.items().index_of(id))
}

#[test]
fn arrow_down_moves_one_row() {
    let mut g = grid(20, 5);
    select(&mut g, &[7], 7);
    press(&mut g, KeyCode::Down, Modifiers::NONE);
    assert_eq!(selected(&g), vec![12]);
    assert_eq!(anchor(&g), Some(12));
}

#[test]
fn shift_right_extends_with_preview_closed() {
    let mut g = grid(20, 5);
    select(&mut g, &[3], 3);
    press(&mut g, KeyCode::Right, Modifiers::SHIFT);
    assert_eq!(selected(&g), vec![3, 4]);
    assert_eq!(anchor(&g), Some(4));
}

#[test]
fn shift_right_is_suppressed_with_preview_open() {
    let mut g = grid(20, 5);
    select(&mut g, &[3], 3);
    g.context().quick_preview.set(QuickPreview {
        open: true,
        index: Some(3),
    });
    press(&mut g, KeyCode::Right, Modifiers::SHIFT);
    assert_eq!(selected(&g), vec![3]);
    assert_eq!(anchor(&g), Some(3));
}

#[test]
fn plain_right_with_preview_open_still_moves() {
    let mut g = grid(20, 5);
    select(&mut g, &[3], 3);
    g.context().quick_preview.set(QuickPreview {
        open: true,
        index: Some(3),
    });
    press(&mut g, KeyCode::Right, Modifiers::NONE);
    assert_eq!(selected(&g), vec![4]);
}

#[test]
fn up_from_first_row_does_nothing() {
    let mut g = grid(20, 5);
    select(&mut g, &[2], 2);
    press(&mut g, KeyCode::Up, Modifiers::NONE);
    assert_eq!(selected(&g), vec![2]);
}

#[test]
fn down_with_empty_selection_selects_first() {
    let mut g = grid(20, 5);
    press(&mut g, KeyCode::Down, Modifiers::NONE);
    assert_eq!(selected(&g), vec![0]);
    assert_eq!(anchor(&g), Some(0));
}

#[test]
fn unselectable_grid_ignores_arrows() {
    let mut g = grid(20, 5);
    g.context().selectable.set(false);
    press(&mut g, KeyCode::Down, Modifiers::NONE);
    assert!(g.selection().is_empty());
}

proptest! {
    #[test]
    fn left_at_column_zero_never_moves(row in 0usize..4, extra in proptest::collection::vec(0usize..20, 0..4), shift in any::<bool>()) {
        let mut g = grid(20, 5);
        let start = row * 5;
        let mut members = extra.clone();
        members.push(start);
        select(&mut g, &members, start);
        let before = selected(&g);

        let mods = if shift { Modifiers::SHIFT } else { Modifiers::NONE };
        press(&mut g, KeyCode::Left, mods);
        prop_assert_eq!(selected(&g), before);
        prop_assert_eq!(anchor(&g), Some(start));
    }

    #[test]
    fn escape_clears_any_selection(members in proptest::collection::vec(0usize..20, 1..10), pick in 0usize..10) {
        let mut g = grid(20, 5);
        let anchor_index = members[pick % members.len()];
        select(&mut g, &members, anchor_index);
        prop_assert!(g.selection().size() > 0);

        press(&mut g, KeyCode::Escape, Modifiers::NONE);
        prop_assert_eq!(g.selection().size(), 0);
        prop_assert!(g.selection().anchor().is_none());
    }
}
