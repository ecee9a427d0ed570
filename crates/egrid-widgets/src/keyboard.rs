#![forbid(unsafe_code)]

//! Arrow-key navigation relative to the active anchor.
//!
//! Navigation never wraps: moving left from the first column, right from the
//! last column, or up/down past the loaded rows is a no-op. An arrow with an
//! empty selection only does something for `Down`, which selects the first
//! item.

use egrid_core::keybinding::Direction;

use crate::collection::ItemCollection;
use crate::item::ItemId;
use crate::marquee::MarqueeController;
use crate::scroll::{ScrollInsets, scroll_into_view};
use crate::selection::SelectionModel;
use crate::virtualized::VirtualGrid;

/// Result of a successful navigation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Navigation {
    /// Grid index of the new anchor.
    pub target: usize,
    /// New scroll offset if the target was not fully visible.
    pub scroll_to: Option<f32>,
}

/// Index the arrow keys move from: the anchor, else the selected item with
/// the smallest index.
#[must_use]
pub fn anchor_index(items: &ItemCollection, selection: &SelectionModel) -> Option<usize> {
    selection
        .anchor()
        .and_then(|id| items.index_of(id))
        .or_else(|| selection.ids().filter_map(|id| items.index_of(id)).min())
}

/// Move the anchor one step in `direction`.
///
/// With `extend` (shift held) and multi-select enabled the target is added
/// to the selection; otherwise it replaces it. Extending while the quick
/// preview is open does nothing. Returns `None` when nothing moved.
pub fn navigate(
    direction: Direction,
    extend: bool,
    preview_open: bool,
    grid: &VirtualGrid,
    insets: ScrollInsets,
    items: &ItemCollection,
    selection: &mut SelectionModel,
) -> Option<Navigation> {
    if extend && preview_open {
        return None;
    }

    let target = match anchor_index(items, selection) {
        None if direction == Direction::Down => 0,
        None => return None,
        Some(from) => {
            let cell = grid.item(from)?;
            let columns = grid.column_count();
            match direction {
                Direction::Left if cell.column > 0 => from - 1,
                Direction::Right if !cell.is_last_in_row => from + 1,
                Direction::Up => from.checked_sub(columns)?,
                Direction::Down => from + columns,
                _ => return None,
            }
        }
    };
    let item = items.get(target)?.clone();
    let cell = grid.item(target)?;

    if extend && selection.multi_select() {
        selection.add(&item);
    } else {
        selection.reset(std::slice::from_ref(&item));
    }
    let id: ItemId = item.id();
    selection.set_anchor(Some(id));

    let scroll_to = scroll_into_view(&cell, grid.viewport(), insets, grid.layout(), grid.max_scroll_top());
    tracing::debug!(
        message = "keyboard.navigate",
        direction = ?direction,
        extend,
        target,
        scroll = scroll_to.is_some(),
    );
    Some(Navigation { target, scroll_to })
}

/// Escape: drop the selection, the anchor and every drag target.
pub fn clear_selection(selection: &mut SelectionModel, marquee: &mut MarqueeController) -> bool {
    let had = !selection.is_empty();
    selection.clear();
    selection.set_anchor(None);
    marquee.clear_targets();
    tracing::debug!(message = "keyboard.navigate", direction = "escape", cleared = had);
    had
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ExplorerItem, FilePathItem};
    use crate::layout::{Gap, GridLayout};
    use crate::virtualized::Viewport;
    use egrid_core::geometry::Size;
    use egrid_core::observable::Observable;

    fn file(id: i32) -> ExplorerItem {
        ExplorerItem::path(FilePathItem {
            id,
            name: format!("f{id}"),
            ..FilePathItem::default()
        })
    }

    fn setup(count: usize) -> (VirtualGrid, ItemCollection, SelectionModel) {
        let items = ItemCollection::from_items((0..count as i32).map(file));
        let grid = VirtualGrid::new(GridLayout::fixed(5, Size::new(100.0, 100.0), Gap::uniform(10.0)), count)
            .with_viewport(Viewport::new(0.0, 1000.0));
        (grid, items, SelectionModel::new(true))
    }

    fn select(selection: &mut SelectionModel, index: i32) {
        selection.reset(&[file(index)]);
        selection.set_anchor(Some(file(index).id()));
    }

    fn step(
        d: Direction,
        extend: bool,
        grid: &VirtualGrid,
        items: &ItemCollection,
        sel: &mut SelectionModel,
    ) -> Option<Navigation> {
        navigate(d, extend, false, grid, ScrollInsets::default(), items, sel)
    }

    #[test]
    fn down_from_empty_selects_first() {
        let (grid, items, mut sel) = setup(20);
        let nav = step(Direction::Down, false, &grid, &items, &mut sel).unwrap();
        assert_eq!(nav.target, 0);
        assert!(sel.has(&file(0).id()));
        assert_eq!(sel.anchor(), Some(&file(0).id()));
    }

    #[test]
    fn other_arrows_from_empty_do_nothing() {
        let (grid, items, mut sel) = setup(20);
        for d in [Direction::Up, Direction::Left, Direction::Right] {
            assert!(step(d, false, &grid, &items, &mut sel).is_none());
        }
        assert!(sel.is_empty());
    }

    #[test]
    fn left_and_right_stop_at_row_edges() {
        let (grid, items, mut sel) = setup(20);
        select(&mut sel, 5);
        assert!(step(Direction::Left, false, &grid, &items, &mut sel).is_none());
        select(&mut sel, 9);
        assert!(step(Direction::Right, false, &grid, &items, &mut sel).is_none());
        assert_eq!(step(Direction::Left, false, &grid, &items, &mut sel).map(|n| n.target), Some(8));
    }

    #[test]
    fn right_stops_at_missing_item() {
        let (grid, items, mut sel) = setup(18);
        select(&mut sel, 17);
        assert!(step(Direction::Right, false, &grid, &items, &mut sel).is_none());
        assert!(step(Direction::Down, false, &grid, &items, &mut sel).is_none());
        assert!(sel.has(&file(17).id()));
    }

    #[test]
    fn shift_extends_only_with_multi_select() {
        let (grid, items, mut sel) = setup(20);
        select(&mut sel, 7);
        step(Direction::Right, true, &grid, &items, &mut sel);
        assert_eq!(sel.size(), 2);
        assert_eq!(sel.anchor(), Some(&file(8).id()));

        sel.set_multi_select(false);
        step(Direction::Right, true, &grid, &items, &mut sel);
        assert_eq!(sel.size(), 1);
        assert!(sel.has(&file(9).id()));
    }

    #[test]
    fn shift_with_preview_open_is_noop() {
        let (grid, items, mut sel) = setup(20);
        select(&mut sel, 7);
        let nav = navigate(Direction::Down, true, true, &grid, ScrollInsets::default(), &items, &mut sel);
        assert!(nav.is_none());
        assert_eq!(sel.size(), 1);
    }

    #[test]
    fn navigation_scrolls_target_into_view() {
        let (mut grid, items, mut sel) = setup(40);
        grid.set_viewport(Viewport::new(0.0, 250.0));
        select(&mut sel, 7);
        let nav = step(Direction::Down, false, &grid, &items, &mut sel).unwrap();
        // Row 2 spans 220..320; half gap below.
        assert_eq!(nav.scroll_to, Some(325.0 - 250.0));
    }

    #[test]
    fn escape_clears_everything() {
        let (_, _, mut sel) = setup(20);
        let mut marquee = MarqueeController::new(Observable::new(false));
        select(&mut sel, 3);
        assert!(clear_selection(&mut sel, &mut marquee));
        assert!(sel.is_empty());
        assert_eq!(sel.anchor(), None);
        assert!(!clear_selection(&mut sel, &mut marquee));
    }
}
