//! Daemon side of clockdeck.
//!
//! - `app`: engines plus theme, tab and notifications
//! - `ipc`: Unix socket server and request handler
//! - `run`: the main loop
//! - `scheduler`: countdown tick delivery
//! - `time_source`: millisecond clocks for the stopwatch
//! - `toast`: transient notifications

pub mod app;
pub mod ipc;
pub mod run;
pub mod scheduler;
pub mod time_source;
pub mod toast;

pub use app::{App, AppEvent};
pub use ipc::{IpcServer, RequestHandler};
pub use run::{run, run_until};
pub use scheduler::{Tick, TickScheduler};
pub use time_source::{ManualTimeSource, MonotonicTimeSource, TimeSource};
