#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are logical pixels in *content space*: the origin is the
//! top-left corner of the scrollable grid content, so a point keeps its value
//! while the viewport scrolls over it.

/// A point in content space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point.
    #[inline]
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> f32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Translate the point vertically.
    #[inline]
    #[must_use]
    pub fn offset_y(self, dy: f32) -> Self {
        Self::new(self.x, self.y + dy)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero or negative.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle for item bounds, marquee regions, and hit testing.
///
/// Edges are half-open: `left`/`top` inclusive, `right`/`bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The smallest rectangle spanning two corner points, in any order.
    ///
    /// This is the marquee rectangle swept between a drag origin and the
    /// current pointer position.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Left edge (alias for x).
    #[inline]
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Whether two rectangles overlap.
    ///
    /// Unlike [`Rect::intersection_opt`], a degenerate (zero-width or
    /// zero-height) marquee still intersects the items it lies across, so a
    /// perfectly vertical drag selects the column it runs through.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        span_overlaps(self.x, self.right(), other.x, other.right())
            && span_overlaps(self.y, self.bottom(), other.y, other.bottom())
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[must_use]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Create a new rectangle that is the union of this rectangle and another.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Create a new rectangle inside the current one with the given margin.
    #[must_use]
    pub fn inner(&self, margin: Sides) -> Rect {
        Rect {
            x: self.x + margin.left,
            y: self.y + margin.top,
            width: (self.width - margin.horizontal_sum()).max(0.0),
            height: (self.height - margin.vertical_sum()).max(0.0),
        }
    }
}

/// Half-open interval overlap where a zero-length span counts as a point.
fn span_overlaps(a0: f32, a1: f32, b0: f32, b1: f32) -> bool {
    if a0 == a1 {
        b0 <= a0 && a0 < b1
    } else if b0 == b1 {
        a0 <= b0 && b0 < a1
    } else {
        a0 < b1 && b0 < a1
    }
}

/// Sides for padding/insets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Sides {
    /// Create new sides with equal values.
    #[must_use]
    pub const fn all(val: f32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with vertical and horizontal values.
    #[must_use]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create new sides with specific values.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    #[must_use]
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    #[must_use]
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for Sides {
    fn from(val: f32) -> Self {
        Self::all(val)
    }
}

impl From<(f32, f32)> for Sides {
    fn from((vertical, horizontal): (f32, f32)) -> Self {
        Self::symmetric(vertical, horizontal)
    }
}
