//! Time- and output-driven progress estimate.
//!
//! Installers do not report real progress, so the percentage is synthetic:
//! one point per tick while running, a jump to the ceiling on a completion
//! line, and a ramp to 100 after a successful exit.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub(crate) struct ProgressEstimator {
    percent: u8,
    ceiling: u8,
    tick_interval: Duration,
    last_tick: Instant,
}

impl ProgressEstimator {
    pub(crate) fn new(ceiling: u8, tick_interval: Duration, started: Instant) -> Self {
        Self {
            percent: 0,
            ceiling: ceiling.min(100),
            tick_interval,
            last_tick: started,
        }
    }

    pub(crate) fn percent(&self) -> u8 {
        self.percent
    }

    /// Advance by one point if a full tick has elapsed since the last one.
    ///
    /// Returns the new percentage when it changed.
    pub(crate) fn on_tick(&mut self, now: Instant) -> Option<u8> {
        if self.percent >= self.ceiling {
            return None;
        }
        if now.saturating_duration_since(self.last_tick) < self.tick_interval {
            return None;
        }
        self.percent += 1;
        self.last_tick = now;
        Some(self.percent)
    }

    /// Jump to the ceiling after the installer reported completion.
    ///
    /// Returns the new percentage when it changed.
    pub(crate) fn on_completion_reported(&mut self) -> Option<u8> {
        if self.percent >= self.ceiling {
            return None;
        }
        self.percent = self.ceiling;
        Some(self.percent)
    }

    /// Percentages still to report after a successful exit, ending at 100.
    pub(crate) fn finish_ramp(&mut self) -> impl Iterator<Item = u8> {
        let from = self.percent;
        self.percent = 100;
        (from..=100).skip(1)
    }
}
