//! Monitor options configuration.
//!
//! This module provides the [`MonitorOptions`] struct for tuning how an
//! installer process is polled and how its progress estimate advances.

use std::time::Duration;

/// Configuration options for installation monitoring.
///
/// The reported percentage is an estimate: it creeps up by one every
/// `tick_interval` until it reaches `ramp_ceiling`, jumps straight to the
/// ceiling when the installer prints a completion line, and is ramped to 100
/// once the process exits successfully.
///
/// # Example
///
/// ```rust
/// use folder_installer::MonitorOptions;
/// use std::time::Duration;
///
/// // Defaults: poll every 100ms, +1% per second, ceiling 90%
/// let opts = MonitorOptions::default();
/// assert_eq!(opts.ramp_ceiling, 90);
///
/// // Pure time-based estimation
/// let opts = MonitorOptions {
///     watch_output: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// How often the process is checked for exit and its output drained.
    ///
    /// Values below one millisecond, including zero, poll every millisecond.
    ///
    /// Default: 100 milliseconds
    pub poll_interval: Duration,

    /// Elapsed time between one-percent increments while running.
    ///
    /// Default: 1 second
    pub tick_interval: Duration,

    /// Highest percentage reported while the process is still running.
    ///
    /// Values above 100 are clamped to 100.
    ///
    /// Default: 90
    pub ramp_ceiling: u8,

    /// Delay between steps of the final ramp to 100 after a successful exit.
    ///
    /// Default: 50 milliseconds
    pub finish_step: Duration,

    /// Jump to the ceiling when installer output mentions "completed".
    ///
    /// Default: `true`
    pub watch_output: bool,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            tick_interval: Duration::from_secs(1),
            ramp_ceiling: 90,
            finish_step: Duration::from_millis(50),
            watch_output: true,
        }
    }
}
