//! Time sources.
//!
//! All timing in the engine is derived by subtraction from timestamps taken
//! off a `TimeSource`, never by counting ticks. Production code uses
//! `WallClock`; tests use `ManualClock` to step time forward explicitly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of the current instant.
///
/// The engine samples this at every public operation. Swapping in a manual
/// source makes every delay and elapsed-time computation deterministic.
pub trait TimeSource {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Production time source backed by the monotonic wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced time source for tests.
///
/// Clones share the same underlying offset, so a test can hand one clone to
/// the session and keep another to advance time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    offset_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock frozen at its origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Advance the clock by a duration (millisecond granularity).
    pub fn advance(&self, by: Duration) {
        self.offset_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}
