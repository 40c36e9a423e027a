//! Command definitions for the clockdeck CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::engine::format::{parse_duration_field, total_seconds};
use crate::types::{IpcRequest, ShortcutKey, Tab, Theme};

// ============================================================================
// CLI Structure
// ============================================================================

/// clockdeck - clock, lap stopwatch and countdown timer
#[derive(Parser, Debug)]
#[command(
    name = "clockdeck",
    version,
    about = "Clock, lap stopwatch and countdown timer for the terminal",
    long_about = "A clock, a lap stopwatch and a countdown timer.\n\
                  Stopwatch and timer state lives in a small daemon ('clockdeck daemon');\n\
                  every other command talks to it over a Unix socket.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the daemon socket
    #[arg(long, global = true, value_name = "PATH")]
    pub socket: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the local time and date
    Clock,

    /// Show the full daemon state
    Status,

    /// Live display that refreshes until Ctrl-C
    Watch {
        /// Redraw interval in milliseconds (defaults to refresh_ms from the config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=1000))]
        interval_ms: Option<u64>,
    },

    /// Control the stopwatch
    #[command(subcommand)]
    Stopwatch(StopwatchCommand),

    /// Control the countdown timer
    #[command(subcommand)]
    Timer(TimerCommand),

    /// Change the color theme
    Theme {
        /// Theme name
        #[arg(value_enum)]
        theme: Theme,
    },

    /// Switch the active tab
    Tab {
        /// Tab name
        #[arg(value_enum)]
        tab: Tab,
    },

    /// Send a keyboard shortcut (space, 1, 2, 3)
    Key {
        /// Key name
        #[arg(value_enum)]
        key: ShortcutKey,
    },

    /// List notifications still on screen
    Notifications,

    /// Run as daemon (background service)
    #[command(hide = true)]
    Daemon,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Stopwatch actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchCommand {
    /// Start the stopwatch
    Start,
    /// Stop the stopwatch
    Stop,
    /// Start if stopped, stop if running
    Toggle,
    /// Record a lap
    Lap,
    /// Record a lap while running, reset while stopped
    LapOrReset,
    /// Drop all recorded laps
    ClearLaps,
}

/// Countdown timer actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start or resume the timer
    Start(DurationArgs),
    /// Pause the timer
    Pause,
    /// Reset the timer to zero
    Reset,
    /// Set the timer to a number of minutes
    Preset {
        /// Minutes
        minutes: u32,
    },
    /// Set the timer duration without starting it
    Set(DurationArgs),
}

// ============================================================================
// Duration Arguments
// ============================================================================

/// Minutes and seconds for the countdown.
///
/// Values are read leniently: leading digits count, anything else is zero.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationArgs {
    /// Minutes
    #[arg(short, long, value_parser = lenient_duration, allow_hyphen_values = true)]
    pub minutes: Option<u32>,

    /// Seconds
    #[arg(short, long, value_parser = lenient_duration, allow_hyphen_values = true)]
    pub seconds: Option<u32>,
}

impl DurationArgs {
    /// Total seconds, or `None` if neither field was given.
    pub fn total_seconds(&self) -> Option<u32> {
        if self.minutes.is_none() && self.seconds.is_none() {
            return None;
        }
        Some(total_seconds(
            self.minutes.unwrap_or(0),
            self.seconds.unwrap_or(0),
        ))
    }
}

fn lenient_duration(s: &str) -> Result<u32, String> {
    Ok(parse_duration_field(s))
}

// ============================================================================
// Request Mapping
// ============================================================================

impl Commands {
    /// The daemon request for this command, or `None` for local commands.
    pub fn to_request(&self) -> Option<IpcRequest> {
        let request = match self {
            Commands::Status | Commands::Watch { .. } => IpcRequest::Status,
            Commands::Notifications => IpcRequest::Notifications,
            Commands::Stopwatch(action) => action.to_request(),
            Commands::Timer(action) => action.to_request(),
            Commands::Theme { theme } => IpcRequest::Theme { theme: *theme },
            Commands::Tab { tab } => IpcRequest::Tab { tab: *tab },
            Commands::Key { key } => IpcRequest::Shortcut { key: *key },
            Commands::Clock | Commands::Daemon | Commands::Completions { .. } => return None,
        };
        Some(request)
    }
}

impl StopwatchCommand {
    /// The daemon request for this action.
    pub fn to_request(self) -> IpcRequest {
        match self {
            StopwatchCommand::Start => IpcRequest::StopwatchStart,
            StopwatchCommand::Stop => IpcRequest::StopwatchStop,
            StopwatchCommand::Toggle => IpcRequest::StopwatchToggle,
            StopwatchCommand::Lap => IpcRequest::StopwatchLap,
            StopwatchCommand::LapOrReset => IpcRequest::StopwatchLapOrReset,
            StopwatchCommand::ClearLaps => IpcRequest::StopwatchClearLaps,
        }
    }
}

impl TimerCommand {
    /// The daemon request for this action.
    pub fn to_request(&self) -> IpcRequest {
        match self {
            TimerCommand::Start(duration) => IpcRequest::TimerStart {
                total_seconds: duration.total_seconds(),
            },
            TimerCommand::Pause => IpcRequest::TimerPause,
            TimerCommand::Reset => IpcRequest::TimerReset,
            TimerCommand::Preset { minutes } => IpcRequest::TimerPreset { minutes: *minutes },
            TimerCommand::Set(duration) => IpcRequest::TimerConfigure {
                total_seconds: duration.total_seconds().unwrap_or(0),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["clockdeck"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv).command.unwrap()
    }

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["clockdeck"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert!(cli.config.is_none());
            assert!(cli.socket.is_none());
        }

        #[test]
        fn test_parse_global_flags() {
            let cli = Cli::parse_from([
                "clockdeck",
                "status",
                "-v",
                "--socket",
                "/tmp/cd.sock",
                "--config",
                "/tmp/cd.json",
            ]);
            assert!(cli.verbose);
            assert_eq!(cli.socket, Some(PathBuf::from("/tmp/cd.sock")));
            assert_eq!(cli.config, Some(PathBuf::from("/tmp/cd.json")));
        }

        #[test]
        fn test_parse_local_commands() {
            assert!(matches!(parse(&["clock"]), Commands::Clock));
            assert!(matches!(parse(&["daemon"]), Commands::Daemon));
            assert!(parse(&["clock"]).to_request().is_none());
            assert!(parse(&["daemon"]).to_request().is_none());
        }

        #[test]
        fn test_parse_completions() {
            match parse(&["completions", "zsh"]) {
                Commands::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Zsh),
                other => panic!("Expected Completions, got {:?}", other),
            }
        }

        #[test]
        fn test_parse_watch_interval() {
            match parse(&["watch", "--interval-ms", "50"]) {
                Commands::Watch { interval_ms } => assert_eq!(interval_ms, Some(50)),
                other => panic!("Expected Watch, got {:?}", other),
            }
            assert!(Cli::try_parse_from(["clockdeck", "watch", "--interval-ms", "0"]).is_err());
        }

        #[test]
        fn test_parse_invalid_theme() {
            assert!(Cli::try_parse_from(["clockdeck", "theme", "neon"]).is_err());
        }
    }

    mod request_mapping_tests {
        use super::*;

        #[test]
        fn test_stopwatch_requests() {
            assert_eq!(
                parse(&["stopwatch", "lap-or-reset"]).to_request(),
                Some(IpcRequest::StopwatchLapOrReset)
            );
            assert_eq!(
                parse(&["stopwatch", "clear-laps"]).to_request(),
                Some(IpcRequest::StopwatchClearLaps)
            );
        }

        #[test]
        fn test_timer_start_without_duration() {
            assert_eq!(
                parse(&["timer", "start"]).to_request(),
                Some(IpcRequest::TimerStart {
                    total_seconds: None
                })
            );
        }

        #[test]
        fn test_timer_start_with_duration() {
            assert_eq!(
                parse(&["timer", "start", "-m", "1", "-s", "30"]).to_request(),
                Some(IpcRequest::TimerStart {
                    total_seconds: Some(90)
                })
            );
        }

        #[test]
        fn test_timer_set_is_lenient() {
            assert_eq!(
                parse(&["timer", "set", "--minutes", "abc", "--seconds", "45s"]).to_request(),
                Some(IpcRequest::TimerConfigure { total_seconds: 45 })
            );
            assert_eq!(
                parse(&["timer", "set", "-m", "-5"]).to_request(),
                Some(IpcRequest::TimerConfigure { total_seconds: 0 })
            );
        }

        #[test]
        fn test_timer_set_without_fields_is_zero() {
            assert_eq!(
                parse(&["timer", "set"]).to_request(),
                Some(IpcRequest::TimerConfigure { total_seconds: 0 })
            );
        }

        #[test]
        fn test_timer_preset() {
            assert_eq!(
                parse(&["timer", "preset", "25"]).to_request(),
                Some(IpcRequest::TimerPreset { minutes: 25 })
            );
        }

        #[test]
        fn test_presentation_requests() {
            assert_eq!(
                parse(&["theme", "dark"]).to_request(),
                Some(IpcRequest::Theme { theme: Theme::Dark })
            );
            assert_eq!(
                parse(&["tab", "stopwatch"]).to_request(),
                Some(IpcRequest::Tab {
                    tab: Tab::Stopwatch
                })
            );
            assert_eq!(
                parse(&["key", "space"]).to_request(),
                Some(IpcRequest::Shortcut {
                    key: ShortcutKey::Space
                })
            );
            assert_eq!(
                parse(&["key", "3"]).to_request(),
                Some(IpcRequest::Shortcut {
                    key: ShortcutKey::Digit3
                })
            );
        }
    }
}
