#![forbid(unsafe_code)]

//! Pointer gesture recognition.
//!
//! [`GestureRecognizer`] folds raw pointer, Escape and focus events into
//! [`SemanticEvent`]s. The pointer is always in one of four phases:
//!
//! ```text
//!            down                    moved >= threshold
//!   Idle ───────────▶ Pressed ─────────────────────────▶ Dragging
//!    ▲                  │ up: Click / DoubleClick           │ up: DragEnd
//!    │◀─────────────────┘                                   │
//!    │◀─────────────────────────────────────────────────────┘
//!    │          up (swallowed)
//!    └──────────────────────── Cancelled ◀── Escape / blur / second press
//! ```
//!
//! # Invariants
//!
//! 1. One press/release interaction yields either a click or a drag, never
//!    both.
//! 2. `DragStart` carries the press position, not the position where the
//!    threshold was crossed.
//! 3. Every `DragStart` is closed by exactly one `DragEnd` or `DragCancel`.
//! 4. A release that follows a cancel produces nothing.

use std::time::Duration;

use web_time::Instant;

use crate::event::{Event, KeyCode, KeyEventKind, Modifiers, MouseButton, MouseEventKind};
use crate::geometry::Point;
use crate::semantic_event::SemanticEvent;

/// Timing and distance thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Longest gap between two releases that still pair into a double-click.
    pub multi_click_timeout: Duration,
    /// Manhattan distance the pointer must travel before a press becomes a drag.
    pub drag_threshold: f32,
    /// Manhattan distance two releases may be apart and still pair.
    pub click_tolerance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            multi_click_timeout: Duration::from_millis(300),
            drag_threshold: 3.0,
            click_tolerance: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Point,
    button: MouseButton,
    modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Pressed(Press),
    Dragging(Press),
    /// The press was cancelled while held. Its release is swallowed.
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
struct LastRelease {
    at: Point,
    button: MouseButton,
    when: Instant,
    /// The release already completed a double-click and cannot pair again.
    paired: bool,
}

/// Stateful click / double-click / drag detector.
///
/// Positions pass through untouched. The grid feeds content-space
/// coordinates so a drag survives scrolling.
#[derive(Debug)]
pub struct GestureRecognizer {
    config: GestureConfig,
    phase: Phase,
    last_release: Option<LastRelease>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            last_release: None,
        }
    }

    /// Feed one raw event.
    ///
    /// Crossing the drag threshold yields `DragStart` and the first
    /// `DragMove` together. A press during a drag yields `DragCancel`.
    /// Everything else yields at most one event.
    pub fn process(&mut self, event: &Event, now: Instant) -> Vec<SemanticEvent> {
        let mut out = Vec::new();
        match event {
            Event::Mouse(mouse) => {
                let pos = mouse.position();
                match mouse.kind {
                    MouseEventKind::Down(button) => self.press(pos, button, mouse.modifiers, &mut out),
                    MouseEventKind::Drag(button) => self.motion(pos, button, mouse.modifiers, &mut out),
                    MouseEventKind::Up(button) => self.release(pos, button, mouse.modifiers, now, &mut out),
                    MouseEventKind::Moved => {}
                }
            }
            Event::Key(key) if key.code == KeyCode::Escape && key.kind == KeyEventKind::Press => {
                self.cancel(&mut out);
            }
            Event::Focus(false) => self.cancel(&mut out),
            _ => {}
        }
        out
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// Forget the current press and any pending double-click silently.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.last_release = None;
    }

    fn press(&mut self, origin: Point, button: MouseButton, modifiers: Modifiers, out: &mut Vec<SemanticEvent>) {
        // Pointer capture was lost and the release never arrived.
        if self.is_dragging() {
            out.push(SemanticEvent::DragCancel);
        }
        self.phase = Phase::Pressed(Press {
            origin,
            button,
            modifiers,
        });
    }

    fn motion(&mut self, pos: Point, button: MouseButton, modifiers: Modifiers, out: &mut Vec<SemanticEvent>) {
        let press = match self.phase {
            Phase::Cancelled => return,
            Phase::Idle => {
                // Movement with a button held but no press seen: track from here.
                self.phase = Phase::Pressed(Press {
                    origin: pos,
                    button,
                    modifiers,
                });
                return;
            }
            Phase::Pressed(press) => {
                if press.origin.manhattan_distance(pos) < self.config.drag_threshold {
                    return;
                }
                self.phase = Phase::Dragging(press);
                self.last_release = None;
                out.push(SemanticEvent::DragStart {
                    pos: press.origin,
                    button: press.button,
                    modifiers: press.modifiers,
                });
                press
            }
            Phase::Dragging(press) => press,
        };
        out.push(SemanticEvent::DragMove {
            start: press.origin,
            current: pos,
            modifiers: press.modifiers,
        });
    }

    fn release(
        &mut self,
        pos: Point,
        button: MouseButton,
        modifiers: Modifiers,
        now: Instant,
        out: &mut Vec<SemanticEvent>,
    ) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Cancelled => return,
            Phase::Dragging(press) => {
                out.push(SemanticEvent::DragEnd {
                    start: press.origin,
                    end: pos,
                });
                return;
            }
            Phase::Idle | Phase::Pressed(_) => {}
        }

        let pairs = self.last_release.is_some_and(|last| {
            !last.paired
                && last.button == button
                && last.at.manhattan_distance(pos) <= self.config.click_tolerance
                && now.duration_since(last.when) <= self.config.multi_click_timeout
        });
        self.last_release = Some(LastRelease {
            at: pos,
            button,
            when: now,
            paired: pairs,
        });

        out.push(if pairs {
            SemanticEvent::DoubleClick { pos, button, modifiers }
        } else {
            SemanticEvent::Click { pos, button, modifiers }
        });
    }

    fn cancel(&mut self, out: &mut Vec<SemanticEvent>) {
        match self.phase {
            Phase::Idle | Phase::Cancelled => {}
            Phase::Pressed(_) => self.phase = Phase::Cancelled,
            Phase::Dragging(_) => {
                self.phase = Phase::Cancelled;
                out.push(SemanticEvent::DragCancel);
            }
        }
    }
}
