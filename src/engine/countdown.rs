//! Countdown engine.
//!
//! Counts whole seconds down from a configured total. The engine does not
//! schedule anything; the owner calls [`CountdownEngine::tick`] once per
//! second while the phase is [`CountdownPhase::Running`].

use crate::types::{CountdownPhase, CountdownSnapshot};

use super::error::InvalidOperation;

// ============================================================================
// TickOutcome
// ============================================================================

/// Result of a successful tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting down.
    Running {
        /// Seconds left after this tick
        remaining_seconds: u32,
    },
    /// This tick reached zero. Reported once per run.
    Completed,
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Pomodoro-style countdown timer.
#[derive(Debug, Clone, Default)]
pub struct CountdownEngine {
    total_seconds: u32,
    remaining_seconds: u32,
    phase: CountdownPhase,
}

impl CountdownEngine {
    /// Creates an idle countdown with no duration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new duration and returns to `Idle`.
    ///
    /// Allowed from `Idle`, `Paused` and `Completed`. A paused run is
    /// discarded without warning.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::ConfigureWhileRunning`] while running.
    pub fn configure(&mut self, total_seconds: u32) -> Result<(), InvalidOperation> {
        if self.phase == CountdownPhase::Running {
            return Err(InvalidOperation::ConfigureWhileRunning);
        }
        self.total_seconds = total_seconds;
        self.remaining_seconds = total_seconds;
        self.phase = CountdownPhase::Idle;
        Ok(())
    }

    /// Configures `minutes * 60` seconds.
    ///
    /// # Errors
    ///
    /// Same as [`CountdownEngine::configure`].
    pub fn preset_minutes(&mut self, minutes: u32) -> Result<(), InvalidOperation> {
        self.configure(minutes.saturating_mul(60))
    }

    /// Starts an idle countdown or resumes a paused one.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::CountdownAlreadyRunning`] while running and
    /// [`InvalidOperation::CountdownEmpty`] when there is nothing to count.
    pub fn start(&mut self) -> Result<(), InvalidOperation> {
        match self.phase {
            CountdownPhase::Running => Err(InvalidOperation::CountdownAlreadyRunning),
            CountdownPhase::Paused => {
                self.phase = CountdownPhase::Running;
                Ok(())
            }
            CountdownPhase::Idle if self.remaining_seconds > 0 => {
                self.phase = CountdownPhase::Running;
                Ok(())
            }
            CountdownPhase::Idle | CountdownPhase::Completed => Err(InvalidOperation::CountdownEmpty),
        }
    }

    /// Pauses a running countdown, keeping the remaining time.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::CountdownNotRunning`] unless running.
    pub fn pause(&mut self) -> Result<(), InvalidOperation> {
        if self.phase != CountdownPhase::Running {
            return Err(InvalidOperation::CountdownNotRunning);
        }
        self.phase = CountdownPhase::Paused;
        Ok(())
    }

    /// Clears the duration from any phase.
    pub fn reset(&mut self) {
        self.total_seconds = 0;
        self.remaining_seconds = 0;
        self.phase = CountdownPhase::Idle;
    }

    /// Advances the countdown by one second.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::CountdownNotRunning`] unless running.
    pub fn tick(&mut self) -> Result<TickOutcome, InvalidOperation> {
        if self.phase != CountdownPhase::Running {
            return Err(InvalidOperation::CountdownNotRunning);
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = CountdownPhase::Completed;
            return Ok(TickOutcome::Completed);
        }
        Ok(TickOutcome::Running {
            remaining_seconds: self.remaining_seconds,
        })
    }

    /// Fraction of the configured duration already counted, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        f64::from(self.total_seconds - self.remaining_seconds) / f64::from(self.total_seconds)
    }

    /// Current phase.
    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    /// Duration set by the last `configure`.
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    /// Seconds still to count.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Read-only view of the countdown.
    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            phase: self.phase,
            total_seconds: self.total_seconds,
            remaining_seconds: self.remaining_seconds,
            progress: self.progress(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
