#![forbid(unsafe_code)]

//! Trailing-edge debouncer for high-frequency input such as a search box.
//!
//! The debouncer is polled rather than timer-driven: the host pushes values
//! as they arrive and calls [`Debouncer::poll`] from its tick or frame loop.
//! A value is released once `delay` has elapsed with no newer push.

use std::time::Duration;

use web_time::Instant;

/// Holds the latest pushed value until the input goes quiet.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Record a new value, replacing any pending one and restarting the delay.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value if the delay has elapsed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let (_, pushed_at) = self.pending.as_ref()?;
        if now.saturating_duration_since(*pushed_at) < self.delay {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    /// Release the pending value immediately (e.g. on Enter).
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will be released, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }

    /// The configured quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}
