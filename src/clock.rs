use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, SystemTime};

/// Source of "now" for everything that measures an attempt
pub trait Clock {
    fn now(&self) -> SystemTime;
}

/// Wall clock used by the application
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Hand-driven clock for headless runs and tests.
/// Clones share the same instant, so a test can keep one handle and advance
/// the time seen by a session that owns another.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<SystemTime>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000))
    }

    pub fn starting_at(at: SystemTime) -> Self {
        Self {
            now: Rc::new(Cell::new(at)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        self.now.get()
    }
}
