#![forbid(unsafe_code)]

//! Minimal scrolling to bring a cell fully into view.

use crate::layout::{GridItem, GridLayout};
use crate::virtualized::Viewport;

/// Space at the top and bottom of the viewport covered by chrome (a sticky
/// header, a status bar). Cells under an inset do not count as visible.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ScrollInsets {
    pub top: f32,
    pub bottom: f32,
}

impl ScrollInsets {
    #[must_use]
    pub const fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }
}

/// New scroll offset that makes `item` fully visible, or `None` if it already
/// is.
///
/// The cell is padded before the check: first and last rows keep the grid's
/// outer padding in view, inner rows keep half the row gap.
#[must_use]
pub fn scroll_into_view(
    item: &GridItem,
    viewport: Viewport,
    insets: ScrollInsets,
    layout: &GridLayout,
    max_scroll_top: f32,
) -> Option<f32> {
    let margin_top = if item.row == 0 {
        layout.padding.top
    } else {
        layout.gap.y / 2.0
    };
    let margin_bottom = if item.is_last_row {
        layout.padding.bottom
    } else {
        layout.gap.y / 2.0
    };

    let want_top = item.rect.top() - margin_top;
    let want_bottom = item.rect.bottom() + margin_bottom;
    let visible_top = viewport.scroll_top + insets.top;
    let visible_bottom = viewport.bottom() - insets.bottom;

    let target = if want_top < visible_top {
        want_top - insets.top
    } else if want_bottom > visible_bottom {
        want_bottom - viewport.height + insets.bottom
    } else {
        return None;
    };
    let target = target.clamp(0.0, max_scroll_top.max(0.0));
    (target != viewport.scroll_top).then_some(target)
}
