//! Time sources.  State machines never read a clock themselves; callers pass
//! `now` in seconds, taken from one of these.

use std::time::Instant;

use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    /// Seconds since an arbitrary fixed origin; never decreases.
    fn now(&self) -> f64;
}

/// Monotonic wall clock, zeroed at construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self { SystemClock::new() }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        ManualClock { now: Mutex::new(start) }
    }

    pub fn set(&self, t: f64) {
        *self.now.lock() = t;
    }

    pub fn advance(&self, dt: f64) -> f64 {
        let mut now = self.now.lock();
        *now += dt;
        *now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 { *self.now.lock() }
}
