// Time sources for the corner-hit freeze.
//
// The board never reads the system clock itself; the host passes a `Clock` in,
// so tests can step time by hand.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic milliseconds since an arbitrary epoch.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by `Instant`, started when the host loop starts.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for deterministic tests.
#[derive(Default)]
pub struct ManualClock {
    current_ms: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: u64) {
        self.current_ms.set(ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.current_ms.set(self.current_ms.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ms(), 0);
        clock.advance(16);
        clock.advance(17);
        assert_eq!(clock.now_ms(), 33);
        clock.set(2500);
        assert_eq!(clock.now_ms(), 2500);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let t1 = clock.now_ms();
        let t2 = clock.now_ms();
        assert!(t2 >= t1);
    }
}
