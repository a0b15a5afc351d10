//! Wall-clock pacing of presentation and clock-speed measurement.
//!
//! Simulation steps run as fast as the host allows; only input polling and
//! presentation are throttled. Both types take `now` as a parameter so they
//! can be driven from a fake clock.

use std::time::{Duration, Instant};

/// Gates presentation passes to a maximum rate.
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    last: Instant,
    presented: u64,
}

impl FramePacer {
    /// `start` is treated as the previous gated pass.
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last: start,
            presented: 0,
        }
    }

    /// True when at least one interval has elapsed since the previous gated
    /// pass, which then becomes `now`.
    pub fn gate(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            self.presented += 1;
            true
        } else {
            false
        }
    }

    /// Gated passes so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

/// Samples wall-clock time at fixed simulation-time intervals.
#[derive(Debug)]
pub struct ClockMeter {
    interval: u64,
    last: Instant,
    delta: Option<Duration>,
}

impl ClockMeter {
    pub fn new(interval: u64, start: Instant) -> Self {
        Self {
            interval,
            last: start,
            delta: None,
        }
    }

    /// Record a sample if `time` sits on an interval boundary.
    pub fn observe(&mut self, time: u64, now: Instant) {
        if self.interval != 0 && time % self.interval == 0 {
            self.delta = Some(now.saturating_duration_since(self.last));
            self.last = now;
        }
    }

    /// Wall-clock time taken by the last full interval.
    pub fn last_delta(&self) -> Option<Duration> {
        self.delta
    }

    /// Bus clock rate over the last interval, in MHz. Two ticks make one bus
    /// cycle. `None` until a full interval has been measured.
    pub fn mhz(&self) -> Option<f64> {
        let secs = self.delta?.as_secs_f64();
        if secs <= 0.0 {
            return None;
        }
        Some(self.interval as f64 / 2.0 / secs / 1_000_000.0)
    }
}
