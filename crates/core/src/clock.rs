// SPDX-License-Identifier: MIT

//! Time abstraction.
//!
//! The waiting-timeout check in the runner (`now - waiting_since > timeout`)
//! needs to be exercised deterministically in tests, so every call site takes
//! a `Clock` instead of reaching for `Instant::now()`/`SystemTime::now()`
//! directly.

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Abstraction over wall-clock and monotonic time.
pub trait Clock: Send + Sync + 'static {
    /// Monotonic instant, used for timeout arithmetic.
    fn now(&self) -> Instant;

    /// Wall-clock time, used to stamp RFC3339 timestamps.
    fn now_utc_rfc3339(&self) -> String;

    /// Milliseconds since the Unix epoch, used only for `run_id` uniqueness.
    fn now_epoch_ms(&self) -> i64;
}

/// Production clock backed by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn now_utc_rfc3339(&self) -> String {
        rfc3339_now()
    }

    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis() as i64
    }
}

/// Format the current wall-clock time as RFC3339, millisecond precision.
fn rfc3339_now() -> String {
    epoch_ms_to_rfc3339(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis() as i64,
    )
}

fn epoch_ms_to_rfc3339(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Deterministic clock for tests: starts at a fixed instant and only moves
/// when `advance` is called.
pub struct FakeClock {
    start: Instant,
    offset_ms: AtomicI64,
    base_epoch_ms: i64,
}

impl FakeClock {
    /// `base_epoch_ms` seeds the wall-clock half so RFC3339 output is stable
    /// across test runs instead of tracking the real date.
    pub fn new(base_epoch_ms: i64) -> Self {
        Self {
            start: Instant::now(),
            offset_ms: AtomicI64::new(0),
            base_epoch_ms,
        }
    }

    pub fn advance(&self, delta: Duration) {
        self.offset_ms
            .fetch_add(delta.as_millis() as i64, Ordering::SeqCst);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(1_700_000_000_000)
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.start + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst) as u64)
    }

    fn now_utc_rfc3339(&self) -> String {
        epoch_ms_to_rfc3339(self.now_epoch_ms())
    }

    fn now_epoch_ms(&self) -> i64 {
        self.base_epoch_ms + self.offset_ms.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
