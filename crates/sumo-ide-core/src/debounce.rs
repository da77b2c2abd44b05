//! Coalescing of rapid value changes into a single rewrite.
//!
//! A [`Debouncer`] holds at most one pending deadline. Every [`Debouncer::schedule`]
//! replaces it with `now + window`, so a burst of changes fires once, `window` after
//! the last change. The caller supplies `now`; nothing here sleeps or spawns.

use std::time::{Duration, Instant};

/// Default quiescence window between the last value change and the rewrite.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// A single pending task, superseded on new input.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// (Re)schedule the task to fire `window` after `now`.
    pub fn schedule(&mut self, now: Instant) {
        if self.deadline.is_some() {
            tracing::trace!("pending rewrite superseded");
        }
        self.deadline = Some(now + self.window);
    }

    /// Drop the pending task, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending task will fire.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending task if its deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
