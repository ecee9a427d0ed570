#![forbid(unsafe_code)]

//! What a pointer interaction meant.
//!
//! Produced by [`GestureRecognizer`](crate::gesture::GestureRecognizer) and
//! consumed by the grid, which maps clicks to selection and drags to the
//! marquee or to an item drag.

use crate::event::{Modifiers, MouseButton};
use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum SemanticEvent {
    /// Press and release without crossing the drag threshold. `modifiers`
    /// are the ones held at release.
    Click {
        pos: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// A click that paired with the one before it.
    DoubleClick {
        pos: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// `pos` is the press position. `modifiers` stay fixed for the rest of
    /// the drag.
    DragStart {
        pos: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    DragMove {
        start: Point,
        current: Point,
        modifiers: Modifiers,
    },
    DragEnd {
        start: Point,
        end: Point,
    },
    /// Escape, focus loss or a second press ended the drag.
    DragCancel,
}

impl SemanticEvent {
    #[must_use]
    pub fn is_click(&self) -> bool {
        matches!(self, Self::Click { .. } | Self::DoubleClick { .. })
    }

    /// Modifiers relevant to the event. End and cancel carry none.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        match *self {
            Self::Click { modifiers, .. }
            | Self::DoubleClick { modifiers, .. }
            | Self::DragStart { modifiers, .. }
            | Self::DragMove { modifiers, .. } => modifiers,
            Self::DragEnd { .. } | Self::DragCancel => Modifiers::NONE,
        }
    }
}
