//! Timekeeping engines.
//!
//! This module holds the pure state machines of the application:
//! - `stopwatch`: elapsed-time accounting with lap marks
//! - `countdown`: second-by-second countdown with phases
//! - `format`: display strings derived from engine state
//!
//! The engines never read a clock and never schedule work. Time comes in
//! as `now_ms` arguments (stopwatch) or as `tick()` calls (countdown).

pub mod countdown;
pub mod error;
pub mod format;
pub mod stopwatch;

pub use countdown::{CountdownEngine, TickOutcome};
pub use error::InvalidOperation;
pub use stopwatch::{LapOrReset, StopwatchEngine};
