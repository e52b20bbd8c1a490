//! Time source used by the store for watering and streak timestamps.

use chrono::{DateTime, Duration, Local};
use parking_lot::Mutex;
use std::sync::Arc;

/// Wall-clock abstraction so calendar-day logic is testable.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Local>;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<DateTime<Local>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Local>) {
        *self.current.lock() = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock();
        *current = *current + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock()
    }
}
