//! Invalid-state errors for the timekeeping engines.
//!
//! Every engine operation that is only meaningful in some states returns
//! one of these when called in the wrong one. None of them are fatal: the
//! engine state is left untouched and callers are free to ignore them.

use thiserror::Error;

/// An operation was called in a state where it has no effect.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOperation {
    /// `start` while the stopwatch is already running.
    #[error("stopwatch is already running")]
    StopwatchAlreadyRunning,

    /// `stop` while the stopwatch is stopped.
    #[error("stopwatch is not running")]
    StopwatchNotRunning,

    /// `record_lap` while the stopwatch is stopped.
    #[error("laps can only be recorded while the stopwatch is running")]
    LapWhileStopped,

    /// `start` while the countdown is already running.
    #[error("timer is already running")]
    CountdownAlreadyRunning,

    /// `start` with nothing left to count down.
    #[error("timer has no time left; set a duration first")]
    CountdownEmpty,

    /// `pause` or `tick` while the countdown is not running.
    #[error("timer is not running")]
    CountdownNotRunning,

    /// `configure` while the countdown is running.
    #[error("timer cannot be changed while it is running")]
    ConfigureWhileRunning,
}

impl InvalidOperation {
    /// Returns true if the error concerns the stopwatch.
    #[must_use]
    pub fn is_stopwatch(&self) -> bool {
        matches!(
            self,
            Self::StopwatchAlreadyRunning | Self::StopwatchNotRunning | Self::LapWhileStopped
        )
    }

    /// Returns true if the error concerns the countdown timer.
    #[must_use]
    pub fn is_countdown(&self) -> bool {
        !self.is_stopwatch()
    }
}
