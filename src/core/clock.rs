//! Timestamp source for `createdAt` and log entries.

/// Millisecond timestamps. Must never go backwards between calls.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_millis(&self) -> i64;
}

/// Wall clock in UTC milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Frozen clock for deterministic tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
