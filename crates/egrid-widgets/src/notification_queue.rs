#![forbid(unsafe_code)]

//! Toast queue for user-facing notices (failed opens, platform errors).
//!
//! - FIFO with errors jumping ahead of informational notices
//! - at most `max_visible` toasts shown at once, the rest wait
//! - identical content pushed again within `dedup_window` is dropped, so a
//!   double-click storm on a broken file yields one toast
//!
//! Time is passed in explicitly; the queue never reads a clock.
//!
//! ```ignore
//! let mut toasts = ToastQueue::default();
//! toasts.push(Toast::error("Failed to open file", "permission denied"), now);
//! for action in toasts.tick(now) {
//!     match action {
//!         QueueAction::Show(id) => { /* render */ }
//!         QueueAction::Hide(id) => { /* remove */ }
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use ahash::AHashMap;
use web_time::Instant;

/// Identifier assigned to a toast when it is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Error,
}

/// A user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub body: Option<String>,
    /// Auto-dismiss after this long once shown; `None` stays until dismissed.
    pub duration: Option<Duration>,
}

impl Toast {
    /// Informational toast.
    #[must_use]
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            title: title.into(),
            body: None,
            duration: None,
        }
    }

    /// Error toast with a detail line.
    #[must_use]
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            title: title.into(),
            body: Some(body.into()),
            duration: None,
        }
    }

    /// Auto-dismiss after `duration`.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    fn content_hash(&self) -> u64 {
        let mut hasher = ahash::AHasher::default();
        self.title.hash(&mut hasher);
        self.body.hash(&mut hasher);
        hasher.finish()
    }
}

/// Queue tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueConfig {
    pub max_visible: usize,
    pub max_queued: usize,
    /// Applied to toasts pushed without a duration.
    pub default_duration: Duration,
    pub dedup_window: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_visible: 3,
            max_queued: 10,
            default_duration: Duration::from_secs(5),
            dedup_window: Duration::from_secs(1),
        }
    }
}

/// Actions returned by [`ToastQueue::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueAction {
    Show(ToastId),
    Hide(ToastId),
}

#[derive(Debug, Clone)]
struct Shown {
    id: ToastId,
    toast: Toast,
    expires_at: Option<Instant>,
}

/// Pending and visible toasts.
#[derive(Debug)]
pub struct ToastQueue {
    pending: VecDeque<(ToastId, Toast)>,
    visible: Vec<Shown>,
    recent: AHashMap<u64, Instant>,
    config: QueueConfig,
    next_id: u64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}

impl ToastQueue {
    #[must_use]
    pub fn new(config: QueueConfig) -> Self {
        Self {
            pending: VecDeque::new(),
            visible: Vec::new(),
            recent: AHashMap::new(),
            config,
            next_id: 0,
        }
    }

    /// Queue a toast. Returns its id, or `None` if it was a duplicate or the
    /// queue is full of toasts at least as severe.
    pub fn push(&mut self, mut toast: Toast, now: Instant) -> Option<ToastId> {
        let window = self.config.dedup_window;
        self.recent
            .retain(|_, at| now.saturating_duration_since(*at) < window);
        let hash = toast.content_hash();
        if self.recent.contains_key(&hash) {
            tracing::debug!(message = "toast.dedup", title = %toast.title);
            return None;
        }

        if self.pending.len() >= self.config.max_queued {
            let weakest = self
                .pending
                .iter()
                .enumerate()
                .min_by_key(|(_, (_, t))| t.level)
                .map(|(i, (_, t))| (i, t.level));
            match weakest {
                Some((i, level)) if level < toast.level => {
                    self.pending.remove(i);
                }
                _ => return None,
            }
        }

        self.recent.insert(hash, now);
        toast.duration.get_or_insert(self.config.default_duration);
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let at = self
            .pending
            .iter()
            .position(|(_, t)| t.level < toast.level)
            .unwrap_or(self.pending.len());
        self.pending.insert(at, (id, toast));
        Some(id)
    }

    /// Expire shown toasts and promote pending ones.
    pub fn tick(&mut self, now: Instant) -> Vec<QueueAction> {
        let mut actions = Vec::new();
        self.visible.retain(|shown| {
            let live = shown.expires_at.is_none_or(|at| now < at);
            if !live {
                actions.push(QueueAction::Hide(shown.id));
            }
            live
        });

        while self.visible.len() < self.config.max_visible {
            let Some((id, toast)) = self.pending.pop_front() else {
                break;
            };
            let expires_at = toast.duration.map(|d| now + d);
            self.visible.push(Shown { id, toast, expires_at });
            actions.push(QueueAction::Show(id));
        }
        actions
    }

    /// Remove a toast wherever it is.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.total_count();
        self.visible.retain(|s| s.id != id);
        self.pending.retain(|(pid, _)| *pid != id);
        self.total_count() != before
    }

    /// Visible toasts, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = (ToastId, &Toast)> {
        self.visible.iter().map(|s| (s.id, &s.toast))
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.pending.len() + self.visible.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    #[must_use]
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }
}
