#![forbid(unsafe_code)]

//! Grid geometry: index ↔ (row, column, rect) mapping.
//!
//! Items are laid out row-major in equally sized cells separated by a gap,
//! inside outer padding:
//!
//! ```text
//!  padding.top
//!  ┌────┐ gap.x ┌────┐ gap.x ┌────┐
//!  │ 0  │       │ 1  │       │ 2  │
//!  └────┘       └────┘       └────┘
//!   gap.y
//!  ┌────┐       ┌────┐
//!  │ 3  │       │ 4  │
//!  └────┘       └────┘
//!  padding.bottom
//! ```
//!
//! All mapping functions are pure. An index at or beyond the item count maps
//! to `None`.

use egrid_core::geometry::{Point, Rect, Sides, Size};

use crate::error::GridError;

/// How many columns the grid has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum ColumnCount {
    /// Exactly `n` columns regardless of width.
    Fixed(usize),
    /// As many columns as fit in the viewport width.
    Auto,
}

/// Horizontal and vertical spacing between cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Gap {
    pub x: f32,
    pub y: f32,
}

impl Gap {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn uniform(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

/// Geometry of one item cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridItem {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    /// Cell bounds in content space.
    pub rect: Rect,
    /// The cell is in the right-most column.
    pub is_last_in_row: bool,
    /// The cell is in the bottom row of the loaded items.
    pub is_last_row: bool,
}

/// Layout parameters for the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub columns: ColumnCount,
    pub item_size: Size,
    pub gap: Gap,
    pub padding: Sides,
    /// Viewport width, used by [`ColumnCount::Auto`].
    pub width: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: ColumnCount::Auto,
            item_size: Size::new(100.0, 100.0),
            gap: Gap::uniform(8.0),
            padding: Sides::all(12.0),
            width: 0.0,
        }
    }
}

impl GridLayout {
    /// Fixed-column layout with no padding, handy for tests and fixtures.
    #[must_use]
    pub fn fixed(columns: usize, item_size: Size, gap: Gap) -> Self {
        Self {
            columns: ColumnCount::Fixed(columns),
            item_size,
            gap,
            padding: Sides::default(),
            width: 0.0,
        }
    }

    /// Set the viewport width.
    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Set the outer padding.
    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Check that the parameters describe a usable grid.
    pub fn validate(&self) -> Result<(), GridError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;
        if !positive(self.item_size.width) || !positive(self.item_size.height) {
            return Err(GridError::InvalidLayout(format!(
                "item size must be positive, got {}x{}",
                self.item_size.width, self.item_size.height
            )));
        }
        if !non_negative(self.gap.x) || !non_negative(self.gap.y) {
            return Err(GridError::InvalidLayout(format!(
                "gap must be non-negative, got ({}, {})",
                self.gap.x, self.gap.y
            )));
        }
        if self.columns == ColumnCount::Fixed(0) {
            return Err(GridError::InvalidLayout("fixed column count must be > 0".into()));
        }
        Ok(())
    }

    /// Effective number of columns, at least 1.
    #[must_use]
    pub fn column_count(&self) -> usize {
        match self.columns {
            ColumnCount::Fixed(n) => n.max(1),
            ColumnCount::Auto => {
                let usable = self.width - self.padding.horizontal_sum() + self.gap.x;
                let cell = self.item_size.width + self.gap.x;
                if cell <= 0.0 || usable <= 0.0 {
                    return 1;
                }
                ((usable / cell).floor() as usize).max(1)
            }
        }
    }

    /// Distance between the tops of consecutive rows.
    #[inline]
    #[must_use]
    pub fn row_stride(&self) -> f32 {
        self.item_size.height + self.gap.y
    }

    /// Number of rows needed for `count` items.
    #[must_use]
    pub fn row_count(&self, count: usize) -> usize {
        count.div_ceil(self.column_count())
    }

    /// Total content height for `count` items, padding included.
    #[must_use]
    pub fn content_height(&self, count: usize) -> f32 {
        let rows = self.row_count(count);
        if rows == 0 {
            return self.padding.vertical_sum();
        }
        self.padding.vertical_sum() + rows as f32 * self.item_size.height + (rows - 1) as f32 * self.gap.y
    }

    /// Top edge of a row.
    #[inline]
    #[must_use]
    pub fn row_top(&self, row: usize) -> f32 {
        self.padding.top + row as f32 * self.row_stride()
    }

    /// Row whose band (cell plus the gap below it) contains `y`, clamped at 0.
    #[must_use]
    pub fn row_at(&self, y: f32) -> usize {
        let rel = y - self.padding.top;
        if rel <= 0.0 {
            return 0;
        }
        (rel / self.row_stride()).floor() as usize
    }

    /// Geometry of the item at `index`, or `None` if `index >= count`.
    #[must_use]
    pub fn item(&self, index: usize, count: usize) -> Option<GridItem> {
        if index >= count {
            return None;
        }
        let columns = self.column_count();
        let row = index / columns;
        let column = index % columns;
        let x = self.padding.left + column as f32 * (self.item_size.width + self.gap.x);
        let y = self.row_top(row);
        Some(GridItem {
            index,
            row,
            column,
            rect: Rect::new(x, y, self.item_size.width, self.item_size.height),
            is_last_in_row: column + 1 == columns,
            is_last_row: row + 1 == self.row_count(count),
        })
    }

    /// Index of the item whose cell contains `point`. Gaps and padding hit
    /// nothing.
    #[must_use]
    pub fn index_at(&self, point: Point, count: usize) -> Option<usize> {
        let columns = self.column_count();
        let rel_x = point.x - self.padding.left;
        let rel_y = point.y - self.padding.top;
        if rel_x < 0.0 || rel_y < 0.0 {
            return None;
        }
        let column = (rel_x / (self.item_size.width + self.gap.x)).floor() as usize;
        let row = (rel_y / self.row_stride()).floor() as usize;
        if column >= columns {
            return None;
        }
        let index = row * columns + column;
        self.item(index, count)
            .filter(|item| item.rect.contains(point))
            .map(|item| item.index)
    }
}
