#![forbid(unsafe_code)]

//! Hit-testing against mounted cells.
//!
//! The marquee controller never asks the layout directly which items a
//! rectangle covers: it asks a [`SpatialIndex`], which only knows about cells
//! that are currently mounted. Unmounted rows are invisible to hit-testing,
//! exactly as they would be to a renderer's element tree.
//!
//! [`VirtualGrid`] is the production index. Tests and hosts with their own
//! element tree can implement the trait directly.

use std::ops::Range;

use egrid_core::geometry::{Point, Rect};

use crate::layout::GridItem;
use crate::virtualized::VirtualGrid;

/// Query interface over mounted item cells.
pub trait SpatialIndex {
    /// Mounted cells whose bounds intersect `rect`, in index order.
    fn intersecting(&self, rect: Rect) -> Vec<GridItem>;

    /// Indices of the mounted cells.
    fn mounted(&self) -> Range<usize>;

    /// Whether the cell for `index` is mounted.
    fn is_mounted(&self, index: usize) -> bool {
        self.mounted().contains(&index)
    }

    /// Geometry of any loaded item by index arithmetic, mounted or not.
    fn geometry(&self, index: usize) -> Option<GridItem>;

    /// Number of columns.
    fn columns(&self) -> usize;

    /// Cell height.
    fn item_height(&self) -> f32;

    /// Vertical gap between rows.
    fn row_gap(&self) -> f32;

    /// Mounted cell under `point`, if any.
    fn hit(&self, point: Point) -> Option<GridItem> {
        self.intersecting(Rect::new(point.x, point.y, 0.0, 0.0))
            .into_iter()
            .find(|item| item.rect.contains(point))
    }
}

impl SpatialIndex for VirtualGrid {
    fn intersecting(&self, rect: Rect) -> Vec<GridItem> {
        let mounted = self.mounted_rows();
        if mounted.is_empty() {
            return Vec::new();
        }
        let layout = self.layout();
        // Narrow to the rows the rect can touch before testing cells.
        let first = layout.row_at(rect.top()).max(mounted.start);
        let last = layout.row_at(rect.bottom()).min(mounted.end.saturating_sub(1));
        if first > last {
            return Vec::new();
        }
        let columns = self.column_count();
        let range = self.mounted_range();
        let start = (first * columns).max(range.start);
        let end = ((last + 1) * columns).min(range.end);
        (start..end)
            .filter_map(|index| self.item(index))
            .filter(|item| rect.intersects(&item.rect))
            .collect()
    }

    fn mounted(&self) -> Range<usize> {
        self.mounted_range()
    }

    fn geometry(&self, index: usize) -> Option<GridItem> {
        self.item(index)
    }

    fn columns(&self) -> usize {
        self.column_count()
    }

    fn item_height(&self) -> f32 {
        self.layout().item_size.height
    }

    fn row_gap(&self) -> f32 {
        self.layout().gap.y
    }
}
