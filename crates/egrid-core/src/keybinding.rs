#![forbid(unsafe_code)]

//! Key → grid action mapping.
//!
//! [`KeyMapper`] resolves a [`KeyEvent`] into a [`GridAction`] given the
//! current [`GridKeyState`]. The grid bindings are scoped: they only apply
//! while the grid is selectable and no blocking modal is open. Outside that
//! scope every key resolves to `None` and the host keeps it.
//!
//! # Bindings
//!
//! | Key | Action |
//! |-----|--------|
//! | `Up` / `Down` / `Left` / `Right` | `Move { direction, extend: shift }` |
//! | `Escape` | `ClearSelection` |
//! | `Enter` | `Open` (when enabled) |
//!
//! Key repeats navigate like presses; releases are ignored.

use crate::event::{KeyCode, KeyEvent};

/// Cardinal direction for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// High-level grid commands produced from keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAction {
    /// Move the active anchor one step. `extend` asks to add the target to
    /// the selection instead of replacing it.
    Move { direction: Direction, extend: bool },

    /// Clear the selection and the anchor.
    ClearSelection,

    /// Open the current selection.
    Open,
}

/// Runtime flags that decide whether grid bindings apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridKeyState {
    /// The grid accepts selection input.
    pub selectable: bool,

    /// A modal dialog is covering the grid.
    pub modal_open: bool,
}

impl GridKeyState {
    /// State where grid bindings are active.
    #[must_use]
    pub const fn active() -> Self {
        Self {
            selectable: true,
            modal_open: false,
        }
    }

    /// Set the modal flag.
    #[must_use]
    pub const fn with_modal(mut self, open: bool) -> Self {
        self.modal_open = open;
        self
    }

    /// Whether grid bindings apply in this state.
    #[must_use]
    pub const fn in_scope(&self) -> bool {
        self.selectable && !self.modal_open
    }
}

/// Options for [`KeyMapper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapConfig {
    /// Map `Enter` to [`GridAction::Open`] (default: true).
    pub enter_opens: bool,
}

impl Default for KeyMapConfig {
    fn default() -> Self {
        Self { enter_opens: true }
    }
}

/// Maps key events to grid actions.
#[derive(Debug, Clone, Default)]
pub struct KeyMapper {
    config: KeyMapConfig,
}

impl KeyMapper {
    /// Create a mapper with the given configuration.
    #[must_use]
    pub fn new(config: KeyMapConfig) -> Self {
        Self { config }
    }

    /// Resolve a key event.
    ///
    /// Returns `None` when the key is not a grid binding or the grid is out
    /// of scope. Ctrl/Alt/Super chords are never grid bindings.
    #[must_use]
    pub fn map(&self, event: &KeyEvent, state: &GridKeyState) -> Option<GridAction> {
        if event.is_release() || event.is_chord() || !state.in_scope() {
            return None;
        }

        let extend = event.shift();
        let direction = match event.code {
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            KeyCode::Escape => return Some(GridAction::ClearSelection),
            KeyCode::Enter if self.config.enter_opens => return Some(GridAction::Open),
            _ => return None,
        };
        Some(GridAction::Move { direction, extend })
    }
}
