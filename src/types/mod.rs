//! Core data types for clockdeck.
//!
//! This module defines the data structures used for:
//! - Engine state views (phases, laps, snapshots)
//! - Presentation state (themes, tabs, shortcut keys, notifications)
//! - IPC request/response serialization

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// CountdownPhase
// ============================================================================

/// Discrete state of the countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownPhase {
    /// Not counting; may hold a configured duration
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Counting suspended, remaining time kept
    Paused,
    /// Reached zero
    Completed,
}

impl CountdownPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownPhase::Idle => "idle",
            CountdownPhase::Running => "running",
            CountdownPhase::Paused => "paused",
            CountdownPhase::Completed => "completed",
        }
    }
}

impl fmt::Display for CountdownPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Laps and snapshots
// ============================================================================

/// One recorded stopwatch lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapRecord {
    /// 1-based lap number
    pub number: u32,
    /// Total stopwatch time when the lap was taken
    #[serde(rename = "elapsedMs")]
    pub elapsed_ms: u64,
}

/// Read-only view of the stopwatch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StopwatchSnapshot {
    /// Whether time is accruing
    pub running: bool,
    /// Total elapsed time at the moment of the snapshot
    #[serde(rename = "elapsedMs")]
    pub elapsed_ms: u64,
    /// Recorded laps in lap order
    pub laps: Vec<LapRecord>,
}

/// Read-only view of the countdown timer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    /// Current phase
    pub phase: CountdownPhase,
    /// Configured duration
    #[serde(rename = "totalSeconds")]
    pub total_seconds: u32,
    /// Seconds left
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    /// Fraction already counted (0.0 - 1.0)
    pub progress: f64,
}

// ============================================================================
// Theme / Tab / ShortcutKey
// ============================================================================

/// Color theme of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background (default)
    #[default]
    Light,
    /// Dark background
    Dark,
    /// Blue tones
    Ocean,
    /// Green tones
    Forest,
}

impl Theme {
    /// Returns the string representation of the theme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Ocean => "ocean",
            Theme::Forest => "forest",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which view is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Clock of day (default)
    #[default]
    Clock,
    /// Stopwatch with laps
    Stopwatch,
    /// Countdown timer
    Timer,
}

impl Tab {
    /// Returns the string representation of the tab.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Clock => "clock",
            Tab::Stopwatch => "stopwatch",
            Tab::Timer => "timer",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyboard shortcuts understood by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ShortcutKey {
    /// Start/stop on the active tab
    #[serde(rename = "space")]
    #[value(name = "space")]
    Space,
    /// Switch to the clock tab
    #[serde(rename = "1")]
    #[value(name = "1")]
    Digit1,
    /// Switch to the stopwatch tab
    #[serde(rename = "2")]
    #[value(name = "2")]
    Digit2,
    /// Switch to the timer tab
    #[serde(rename = "3")]
    #[value(name = "3")]
    Digit3,
}

impl ShortcutKey {
    /// Returns the tab a digit key switches to.
    pub fn target_tab(&self) -> Option<Tab> {
        match self {
            ShortcutKey::Space => None,
            ShortcutKey::Digit1 => Some(Tab::Clock),
            ShortcutKey::Digit2 => Some(Tab::Stopwatch),
            ShortcutKey::Digit3 => Some(Tab::Timer),
        }
    }
}

// ============================================================================
// Notification
// ============================================================================

/// A transient message shown for a short time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique id
    pub id: Uuid,
    /// Message text
    pub message: String,
}

// ============================================================================
// IPC Types
// ============================================================================

/// IPC request from client to daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum IpcRequest {
    /// Query the full state
    Status,
    /// Start the stopwatch
    StopwatchStart,
    /// Stop the stopwatch
    StopwatchStop,
    /// Start or stop the stopwatch depending on its state
    StopwatchToggle,
    /// Record a lap
    StopwatchLap,
    /// Lap while running, reset while stopped
    StopwatchLapOrReset,
    /// Drop all laps
    StopwatchClearLaps,
    /// Set the countdown duration
    TimerConfigure {
        /// Duration in seconds
        #[serde(rename = "totalSeconds")]
        total_seconds: u32,
    },
    /// Start or resume the countdown
    TimerStart {
        /// Duration to configure first (ignored when resuming)
        #[serde(rename = "totalSeconds", default, skip_serializing_if = "Option::is_none")]
        total_seconds: Option<u32>,
    },
    /// Pause the countdown
    TimerPause,
    /// Clear the countdown
    TimerReset,
    /// Configure a whole number of minutes
    TimerPreset {
        /// Minutes
        minutes: u32,
    },
    /// Change the theme
    Theme {
        /// New theme
        theme: Theme,
    },
    /// Switch tabs
    Tab {
        /// New tab
        tab: Tab,
    },
    /// Dispatch a keyboard shortcut
    Shortcut {
        /// Pressed key
        key: ShortcutKey,
    },
    /// List active notifications
    Notifications,
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseData {
    /// Stopwatch state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwatch: Option<StopwatchSnapshot>,
    /// Countdown state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<CountdownSnapshot>,
    /// Lap recorded by this request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lap: Option<LapRecord>,
    /// Current theme
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Current tab
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<Tab>,
    /// Notifications still on screen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Vec<Notification>>,
}

/// Response status values.
pub const STATUS_SUCCESS: &str = "success";
/// The request was valid but had no effect in the current state.
pub const STATUS_IGNORED: &str = "ignored";
/// The request failed.
pub const STATUS_ERROR: &str = "error";

/// IPC response from daemon to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success", "ignored" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates a response for a request that was a no-op in the current state.
    pub fn ignored(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: STATUS_IGNORED.to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: message.into(),
            data: None,
        }
    }

    /// Returns true for error responses.
    pub fn is_error(&self) -> bool {
        self.status == STATUS_ERROR
    }

    /// Returns true for ignored requests.
    pub fn is_ignored(&self) -> bool {
        self.status == STATUS_IGNORED
    }
}

// ============================================================================
// Tests
// ============================================================================
