//! clockdeck library
//!
//! A clock, a lap stopwatch and a countdown timer:
//! - `engine`: the stopwatch and countdown state machines plus formatting
//! - `daemon`: application state, tick scheduling and the IPC server
//! - `cli`: command parsing, IPC client and display
//! - `config`: JSON configuration
//! - `types`: shared data and IPC types

pub mod cli;
pub mod config;
pub mod daemon;
pub mod engine;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{AppConfig, ConfigError};
pub use engine::{CountdownEngine, InvalidOperation, LapOrReset, StopwatchEngine, TickOutcome};
pub use types::{
    CountdownPhase, CountdownSnapshot, IpcRequest, IpcResponse, LapRecord, Notification,
    ResponseData, ShortcutKey, StopwatchSnapshot, Tab, Theme,
};
