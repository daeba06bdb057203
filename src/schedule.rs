//! Timers driven by the runner's tick instead of a background thread.
//!
//! A task only remembers when it is next due; the owner polls it with the
//! current time on every tick. Cancelling clears the due time, so a task that
//! belonged to a discarded attempt can never fire into the next one.

use std::time::{Duration, SystemTime};

/// Fires every `interval` while armed
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    interval: Duration,
    next_due: Option<SystemTime>,
}

impl RepeatingTask {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// First run is one interval from `now`
    pub fn arm(&mut self, now: SystemTime) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// True when the task is due; the next run is scheduled from `now` so
    /// missed ticks collapse into one.
    pub fn poll(&mut self, now: SystemTime) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

/// Fires once, `delay` after it was scheduled
#[derive(Debug, Clone)]
pub struct DelayedTask {
    delay: Duration,
    due: Option<SystemTime>,
}

impl DelayedTask {
    pub fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    /// Replaces any run that is still pending
    pub fn schedule(&mut self, now: SystemTime) {
        self.due = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn poll(&mut self, now: SystemTime) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
