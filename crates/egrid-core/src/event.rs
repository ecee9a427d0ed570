#![forbid(unsafe_code)]

//! Input the grid understands.
//!
//! Hosts translate whatever they receive (DOM pointer events, winit, a test
//! script) into [`Event`]s. Pointer positions are in logical pixels relative
//! to the top-left corner of the scroll viewport; [`MouseEvent::offset_y`]
//! moves them into content space once the scroll offset is known.
//!
//! Only the keys the grid binds have their own [`KeyCode`]. Anything else is
//! forwarded as `Char` or dropped by the host.

use bitflags::bitflags;

use crate::geometry::Point;

/// One input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
    /// The scroll container moved to `top` (content-space y of the viewport
    /// top edge).
    Scroll { top: f32 },
    /// `false` when the grid lost focus. Losing focus cancels a drag.
    Focus(bool),
}

/// A key press, repeat or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press of `code` with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Ctrl, Alt or Super is held. Such chords belong to the host's shortcuts.
    #[must_use]
    pub const fn is_chord(&self) -> bool {
        self.modifiers.intersects(Modifiers::COMMAND)
    }

    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(self.kind, KeyEventKind::Release)
    }
}

/// Keys with a meaning in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Tab,
    /// Any printable key.
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Hosts that cannot tell presses from repeats send `Press`.
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifier keys held during a key or pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        /// Meta / Command / Windows key.
        const SUPER = 1 << 3;
        const COMMAND = Self::ALT.bits() | Self::CTRL.bits() | Self::SUPER.bits();
    }
}

/// A pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The same event shifted down by `dy`, e.g. from viewport to content
    /// space.
    #[must_use]
    pub fn offset_y(self, dy: f32) -> Self {
        Self { y: self.y + dy, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    /// Movement with `MouseButton` held.
    Drag(MouseButton),
    /// Hover movement. The grid ignores it.
    Moved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
