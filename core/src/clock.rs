//! Injectable UTC time source
//!
//! Contracts never call `Utc::now()` directly. They hold a `SharedClock`
//! and evaluate timelocks and rolling windows against it lazily, at call
//! time. Tests swap in a `ManualClock` to move days forward instantly.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// Source of the current UTC time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock handle shared between contracts and their host
pub type SharedClock = Arc<dyn Clock>;

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn shared() -> SharedClock {
        Arc::new(SystemClock)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: RwLock::new(start),
        }
    }

    /// Jump to an absolute instant (may move backwards)
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.write() = instant;
    }

    /// Move forward by `by` and return the new instant
    pub fn advance(&self, by: Duration) -> DateTime<Utc> {
        let mut current = self.current.write();
        *current += by;
        *current
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.read()
    }
}
