#![forbid(unsafe_code)]

//! State shared between the grid and the rest of the explorer view.
//!
//! The context is cheap to clone: every field is a handle onto shared state,
//! so the grid, a toolbar and a preview pane can each hold one and observe
//! the same flags.

use std::cell::RefCell;
use std::rc::Rc;

use egrid_core::observable::Observable;
use web_time::Instant;

use crate::notification_queue::{Toast, ToastId, ToastQueue};

/// Quick-preview pane state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuickPreview {
    pub open: bool,
    /// Grid index of the previewed item.
    pub index: Option<usize>,
}

/// Shared explorer state.
#[derive(Debug, Clone)]
pub struct ExplorerContext {
    /// `true` while a marquee drag is in progress.
    pub is_drag_selecting: Observable<bool>,
    pub quick_preview: Observable<QuickPreview>,
    /// A blocking modal is open; grid key bindings are suspended.
    pub modal_open: Observable<bool>,
    /// The grid accepts selection input.
    pub selectable: Observable<bool>,
    toasts: Rc<RefCell<ToastQueue>>,
}

impl Default for ExplorerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerContext {
    #[must_use]
    pub fn new() -> Self {
        Self::with_toasts(ToastQueue::default())
    }

    /// Context with a custom toast queue.
    #[must_use]
    pub fn with_toasts(toasts: ToastQueue) -> Self {
        Self {
            is_drag_selecting: Observable::new(false),
            quick_preview: Observable::new(QuickPreview::default()),
            modal_open: Observable::new(false),
            selectable: Observable::new(true),
            toasts: Rc::new(RefCell::new(toasts)),
        }
    }

    /// Whether the quick preview pane is open.
    #[must_use]
    pub fn preview_open(&self) -> bool {
        self.quick_preview.with(|p| p.open)
    }

    /// Queue a toast.
    pub fn toast(&self, toast: Toast, now: Instant) -> Option<ToastId> {
        self.toasts.borrow_mut().push(toast, now)
    }

    /// Run `f` with the toast queue.
    pub fn with_toasts_mut<R>(&self, f: impl FnOnce(&mut ToastQueue) -> R) -> R {
        f(&mut self.toasts.borrow_mut())
    }
}
