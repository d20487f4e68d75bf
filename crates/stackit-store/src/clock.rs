//! Clock implementations for creation timestamps

use stackit_domain::traits::Clock;
use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Deterministic clock that advances one millisecond per reading
///
/// Every reading is strictly later than the previous one, which makes
/// creation order observable in tests and demos.
#[derive(Debug, Clone)]
pub struct TickingClock {
    next: Cell<u64>,
}

impl TickingClock {
    /// Start ticking from the given timestamp
    pub fn starting_at(millis: u64) -> Self {
        Self { next: Cell::new(millis) }
    }
}

impl Clock for TickingClock {
    fn now_millis(&self) -> u64 {
        let now = self.next.get();
        self.next.set(now + 1);
        now
    }
}
