#![forbid(unsafe_code)]

//! Virtualization engine: which rows of the grid are mounted.
//!
//! Only the rows intersecting the viewport, plus `overscan_rows` on each side,
//! are mounted. Everything outside that window exists only as index
//! arithmetic: it has no geometry the host can hit-test, which is why the
//! marquee controller reasons about unmounted rows by index.
//!
//! # Load more
//!
//! When the visible window reaches within `load_more_rows` of the last loaded
//! row and the backend reports more pages, [`VirtualGrid::check_load_more`]
//! fires once. It fires again only after the item count changes, so a stalled
//! fetch is not re-requested on every scroll tick.

use std::ops::Range;

use crate::layout::{GridItem, GridLayout};

/// Scroll position and size of the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Content-space y of the viewport's top edge.
    pub scroll_top: f32,
    /// Visible height in pixels.
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub const fn new(scroll_top: f32, height: f32) -> Self {
        Self { scroll_top, height }
    }

    /// Content-space y of the viewport's bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.scroll_top + self.height
    }
}

/// Mounted-window bookkeeping for a grid of `count` items.
#[derive(Debug, Clone)]
pub struct VirtualGrid {
    layout: GridLayout,
    count: usize,
    viewport: Viewport,
    overscan_rows: usize,
    load_more_rows: usize,
    load_more_fired_at: Option<usize>,
}

impl VirtualGrid {
    /// Create a grid window with default overscan (2 rows) and load-more
    /// distance (5 rows).
    #[must_use]
    pub fn new(layout: GridLayout, count: usize) -> Self {
        Self {
            layout,
            count,
            viewport: Viewport::default(),
            overscan_rows: 2,
            load_more_rows: 5,
            load_more_fired_at: None,
        }
    }

    /// Set overscan rows.
    #[must_use]
    pub fn with_overscan(mut self, rows: usize) -> Self {
        self.overscan_rows = rows;
        self
    }

    /// Set how close to the end (in rows) the window must get before more
    /// items are requested.
    #[must_use]
    pub fn with_load_more_rows(mut self, rows: usize) -> Self {
        self.load_more_rows = rows;
        self
    }

    /// Set the viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
    }

    /// Update the viewport width, for auto column layouts.
    pub fn set_width(&mut self, width: f32) {
        self.layout.width = width;
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Update the number of loaded items.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Move the viewport, clamped to the scrollable range.
    pub fn set_scroll_top(&mut self, top: f32) {
        self.viewport.scroll_top = top.clamp(0.0, self.max_scroll_top());
    }

    #[must_use]
    pub const fn overscan_rows(&self) -> usize {
        self.overscan_rows
    }

    /// Effective column count.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.layout.column_count()
    }

    /// Largest valid scroll offset.
    #[must_use]
    pub fn max_scroll_top(&self) -> f32 {
        (self.layout.content_height(self.count) - self.viewport.height).max(0.0)
    }

    /// Geometry of any loaded item, mounted or not.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<GridItem> {
        self.layout.item(index, self.count)
    }

    /// Rows intersecting the viewport.
    #[must_use]
    pub fn visible_rows(&self) -> Range<usize> {
        let rows = self.layout.row_count(self.count);
        if rows == 0 || self.viewport.height <= 0.0 {
            return 0..0;
        }
        let first = self.layout.row_at(self.viewport.scroll_top).min(rows);
        let last = self.layout.row_at(self.viewport.bottom()).min(rows.saturating_sub(1));
        first..(last + 1).max(first)
    }

    /// Rows that are mounted: visible rows widened by the overscan.
    #[must_use]
    pub fn mounted_rows(&self) -> Range<usize> {
        let visible = self.visible_rows();
        if visible.is_empty() {
            return visible;
        }
        let rows = self.layout.row_count(self.count);
        let start = visible.start.saturating_sub(self.overscan_rows);
        let end = (visible.end + self.overscan_rows).min(rows);
        start..end
    }

    /// Item indices that are mounted.
    #[must_use]
    pub fn mounted_range(&self) -> Range<usize> {
        let rows = self.mounted_rows();
        let columns = self.column_count();
        (rows.start * columns).min(self.count)..(rows.end * columns).min(self.count)
    }

    /// Whether `index` currently has a mounted cell.
    #[must_use]
    pub fn is_mounted(&self, index: usize) -> bool {
        self.mounted_range().contains(&index)
    }

    /// Geometry of every mounted item, in index order.
    pub fn mounted_items(&self) -> impl Iterator<Item = GridItem> + '_ {
        self.mounted_range().filter_map(|index| self.item(index))
    }

    /// Returns `true` once per item count when the window is near the end of
    /// the loaded data and `has_more` is set.
    pub fn check_load_more(&mut self, has_more: bool) -> bool {
        if !has_more || self.count == 0 || self.load_more_fired_at == Some(self.count) {
            return false;
        }
        let rows = self.layout.row_count(self.count);
        let visible = self.visible_rows();
        if visible.is_empty() || visible.end + self.load_more_rows < rows {
            return false;
        }
        self.load_more_fired_at = Some(self.count);
        tracing::debug!(
            message = "grid.load_more",
            count = self.count,
            last_visible_row = visible.end - 1,
            rows
        );
        true
    }

    /// Forget that load-more fired, e.g. after replacing the collection.
    pub fn reset_load_more(&mut self) {
        self.load_more_fired_at = None;
    }
}
