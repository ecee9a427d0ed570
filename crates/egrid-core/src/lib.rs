#![forbid(unsafe_code)]

//! Core: events, geometry, gestures, keybindings and reactive plumbing.
//!
//! # Role in egrid
//! `egrid-core` is the input layer. It owns the normalized event types the
//! host feeds in, the pixel geometry everything is measured in, and the
//! recognizers that turn raw input into intentions (clicks, drags, grid
//! actions). `egrid-widgets` consumes these to drive the grid.
//!
//! # Primary responsibilities
//! - **Event**: canonical input events (keys, pointer, resize, scroll, focus).
//! - **Geometry**: `Point`, `Size`, `Rect`, `Sides` in logical pixels.
//! - **GestureRecognizer**: click, double-click and drag detection.
//! - **KeyMapper**: scoped key → `GridAction` resolution.
//! - **Observable / Signal**: single-threaded change notification.
//! - **Debouncer**: trailing-edge debounce for search input.

pub mod debounce;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod keybinding;
pub mod logging;
pub mod observable;
pub mod semantic_event;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span};

pub use debounce::Debouncer;
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use geometry::{Point, Rect, Sides, Size};
pub use gesture::{GestureConfig, GestureRecognizer};
pub use keybinding::{Direction, GridAction, GridKeyState, KeyMapConfig, KeyMapper};
pub use observable::{Observable, Signal, Subscription};
pub use semantic_event::SemanticEvent;
