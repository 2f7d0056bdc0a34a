//! Session clock.
//!
//! Reports elapsed whole seconds since the first accepted card activation.
//! The value is always recomputed as `floor(now - anchor)` from the anchor
//! timestamp, never accumulated by counting ticks, so a late, paused, or
//! skipped refresh callback can only delay the display, not skew it.
//!
//! Stopping the clock (win or reset) freezes the last committed value;
//! querying a stopped clock never yields an advancing number.

use std::time::Instant;

/// Wall-clock-anchored elapsed-time tracker.
#[derive(Clone, Debug, Default)]
pub struct SessionClock {
    anchor: Option<Instant>,
    frozen_secs: Option<u64>,
    last_reported: Option<u64>,
}

impl SessionClock {
    /// Create a clock that has not started.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor the clock at `now`. No-op if already running or stopped.
    pub fn start(&mut self, now: Instant) {
        if self.anchor.is_none() && self.frozen_secs.is_none() {
            self.anchor = Some(now);
        }
    }

    /// Check whether the clock is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Elapsed whole seconds.
    ///
    /// Zero before the first activation; frozen at the committed value once
    /// stopped.
    #[must_use]
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        if let Some(frozen) = self.frozen_secs {
            return frozen;
        }
        match self.anchor {
            Some(anchor) => now.saturating_duration_since(anchor).as_secs(),
            None => 0,
        }
    }

    /// Stop the clock, committing the elapsed value at `now`.
    pub fn stop(&mut self, now: Instant) {
        if self.frozen_secs.is_none() {
            self.frozen_secs = Some(self.elapsed_secs(now));
        }
        self.anchor = None;
    }

    /// Re-derive the displayed value for a periodic refresh.
    ///
    /// Returns `Some(elapsed)` when the whole-second value changed since the
    /// last poll, `None` otherwise or when the clock is not running. The
    /// refresh cadence only affects how promptly the change is observed.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        if !self.is_running() {
            return None;
        }
        let elapsed = self.elapsed_secs(now);
        if self.last_reported != Some(elapsed) {
            self.last_reported = Some(elapsed);
            Some(elapsed)
        } else {
            None
        }
    }
}
