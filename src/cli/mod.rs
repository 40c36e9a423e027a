//! CLI module for clockdeck.
//!
//! - `commands`: Command definitions using clap derive
//! - `client`: IPC client for daemon communication
//! - `display`: Output formatting
//! - `watch`: Live refreshing display

pub mod client;
pub mod commands;
pub mod display;
pub mod watch;

pub use client::IpcClient;
pub use commands::{Cli, Commands, DurationArgs, StopwatchCommand, TimerCommand};
pub use display::Display;
