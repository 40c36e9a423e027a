//! Stopwatch engine.
//!
//! Elapsed time is accounted in running segments: each `start` opens a
//! segment at the supplied instant and each `stop` folds it into the
//! accumulated total. The engine never reads a clock itself; every
//! operation takes `now_ms` from the caller.

use crate::types::{LapRecord, StopwatchSnapshot};

use super::error::InvalidOperation;

// ============================================================================
// LapOrReset
// ============================================================================

/// What a call to [`StopwatchEngine::reset_or_record`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LapOrReset {
    /// The stopwatch was running and a lap was recorded.
    Lapped(LapRecord),
    /// The stopwatch was stopped and has been cleared.
    Reset,
}

// ============================================================================
// StopwatchEngine
// ============================================================================

/// Lap-recording stopwatch.
#[derive(Debug, Clone)]
pub struct StopwatchEngine {
    running: bool,
    accumulated_ms: u64,
    segment_start_ms: Option<u64>,
    laps: Vec<LapRecord>,
    next_lap_number: u32,
}

impl Default for StopwatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchEngine {
    /// Creates a stopped stopwatch at zero with no laps.
    pub fn new() -> Self {
        Self {
            running: false,
            accumulated_ms: 0,
            segment_start_ms: None,
            laps: Vec::new(),
            next_lap_number: 1,
        }
    }

    /// Opens a running segment at `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::StopwatchAlreadyRunning`] if already running.
    pub fn start(&mut self, now_ms: u64) -> Result<(), InvalidOperation> {
        if self.running {
            return Err(InvalidOperation::StopwatchAlreadyRunning);
        }
        self.segment_start_ms = Some(now_ms);
        self.running = true;
        Ok(())
    }

    /// Closes the running segment at `now_ms` and folds it into the total.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::StopwatchNotRunning`] if not running.
    pub fn stop(&mut self, now_ms: u64) -> Result<(), InvalidOperation> {
        if !self.running {
            return Err(InvalidOperation::StopwatchNotRunning);
        }
        self.accumulated_ms += self.segment_ms(now_ms);
        self.segment_start_ms = None;
        self.running = false;
        Ok(())
    }

    /// Starts when stopped, stops when running. Returns the new running state.
    pub fn toggle(&mut self, now_ms: u64) -> bool {
        // Exactly one branch is valid for the current state.
        let _ = if self.running {
            self.stop(now_ms)
        } else {
            self.start(now_ms)
        };
        self.running
    }

    /// Total elapsed time at `now_ms`.
    pub fn current_elapsed_ms(&self, now_ms: u64) -> u64 {
        self.accumulated_ms + self.segment_ms(now_ms)
    }

    /// Records a lap at `now_ms` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::LapWhileStopped`] if not running.
    pub fn record_lap(&mut self, now_ms: u64) -> Result<LapRecord, InvalidOperation> {
        if !self.running {
            return Err(InvalidOperation::LapWhileStopped);
        }
        let lap = LapRecord {
            number: self.next_lap_number,
            elapsed_ms: self.current_elapsed_ms(now_ms),
        };
        self.laps.push(lap);
        self.next_lap_number += 1;
        Ok(lap)
    }

    /// Records a lap while running; fully resets while stopped.
    pub fn reset_or_record(&mut self, now_ms: u64) -> LapOrReset {
        match self.record_lap(now_ms) {
            Ok(lap) => LapOrReset::Lapped(lap),
            Err(_) => {
                self.accumulated_ms = 0;
                self.laps.clear();
                self.next_lap_number = 1;
                LapOrReset::Reset
            }
        }
    }

    /// Drops every recorded lap. Elapsed time and lap numbering are kept.
    pub fn clear_laps(&mut self) {
        self.laps.clear();
    }

    /// Returns true while a segment is open.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed time frozen by previous segments.
    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// Recorded laps in lap order.
    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    /// Read-only view of the stopwatch at `now_ms`.
    pub fn snapshot(&self, now_ms: u64) -> StopwatchSnapshot {
        StopwatchSnapshot {
            running: self.running,
            elapsed_ms: self.current_elapsed_ms(now_ms),
            laps: self.laps.clone(),
        }
    }

    fn segment_ms(&self, now_ms: u64) -> u64 {
        match (self.running, self.segment_start_ms) {
            (true, Some(start)) => now_ms.saturating_sub(start),
            _ => 0,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
