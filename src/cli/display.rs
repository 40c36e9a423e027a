//! Display utilities for the clockdeck CLI.
//!
//! The `render_*` functions build the lines; the `show_*` functions print
//! them. Only the rendering is unit tested.

use chrono::NaiveDateTime;

use crate::engine::format::{
    format_clock_date, format_clock_time, format_countdown, format_progress_bar, format_stopwatch,
};
use crate::types::{
    CountdownPhase, CountdownSnapshot, IpcResponse, LapRecord, Notification, ResponseData,
    StopwatchSnapshot,
};

/// Width of the countdown progress bar in characters.
const PROGRESS_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the outcome of a command.
    pub fn show_result(response: &IpcResponse) {
        println!("{}", Self::render_result(response));
    }

    /// Shows the full state from a status response.
    pub fn show_status(response: &IpcResponse, now: &NaiveDateTime) {
        match &response.data {
            Some(data) => {
                for line in Self::render_status(data, now) {
                    println!("{}", line);
                }
            }
            None => println!("No state received from the daemon"),
        }
    }

    /// Shows the active notifications.
    pub fn show_notifications(response: &IpcResponse) {
        let notifications = response
            .data
            .as_ref()
            .and_then(|data| data.notifications.as_deref())
            .unwrap_or_default();

        if notifications.is_empty() {
            println!("No notifications");
            return;
        }
        for line in Self::render_notifications(notifications) {
            println!("{}", line);
        }
    }

    /// Shows the local time and date.
    pub fn show_clock(now: &NaiveDateTime) {
        println!("{}", format_clock_time(now));
        println!("{}", format_clock_date(now));
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// One line for a command response.
    pub fn render_result(response: &IpcResponse) -> String {
        if response.is_ignored() {
            format!("- Ignored: {}", response.message)
        } else {
            format!("* {}", response.message)
        }
    }

    /// Full status block.
    pub fn render_status(data: &ResponseData, now: &NaiveDateTime) -> Vec<String> {
        let mut lines = vec![
            "clockdeck status".to_string(),
            "─────────────────────────────".to_string(),
        ];

        if let Some(theme) = data.theme {
            lines.push(format!("Theme:     {}", theme));
        }
        if let Some(tab) = data.tab {
            lines.push(format!("Tab:       {}", tab));
        }
        lines.push(format!(
            "Clock:     {}  {}",
            format_clock_time(now),
            format_clock_date(now)
        ));

        if let Some(stopwatch) = &data.stopwatch {
            lines.push(format!(
                "Stopwatch: {} ({})",
                format_stopwatch(stopwatch.elapsed_ms),
                if stopwatch.running { "running" } else { "stopped" }
            ));
            lines.extend(
                Self::render_laps(&stopwatch.laps)
                    .into_iter()
                    .map(|line| format!("  {}", line)),
            );
        }

        if let Some(countdown) = &data.countdown {
            lines.push(format!("Timer:     {}", Self::render_countdown(countdown)));
        }

        if let Some(notifications) = &data.notifications {
            lines.extend(Self::render_notifications(notifications));
        }

        lines
    }

    /// Lap list, rebuilt from scratch: `Lap n  MM:SS:CC`.
    pub fn render_laps(laps: &[LapRecord]) -> Vec<String> {
        laps.iter()
            .map(|lap| format!("Lap {}  {}", lap.number, format_stopwatch(lap.elapsed_ms)))
            .collect()
    }

    /// Remaining time, phase and progress bar.
    pub fn render_countdown(countdown: &CountdownSnapshot) -> String {
        format!(
            "{} ({}) {}",
            format_countdown(countdown.remaining_seconds),
            countdown.phase,
            format_progress_bar(countdown.progress, PROGRESS_WIDTH)
        )
    }

    /// One line per notification.
    pub fn render_notifications(notifications: &[Notification]) -> Vec<String> {
        notifications
            .iter()
            .map(|n| format!("! {}", n.message))
            .collect()
    }

    /// Single status line for `watch`.
    ///
    /// `since_sync_ms` is how long ago `data` was fetched; a running
    /// stopwatch is advanced by that much.
    pub fn render_watch_line(data: &ResponseData, since_sync_ms: u64, now: &NaiveDateTime) -> String {
        let mut parts = vec![format_clock_time(now)];

        if let Some(stopwatch) = &data.stopwatch {
            parts.push(format!(
                "SW {}{}",
                format_stopwatch(extrapolate_elapsed(stopwatch, since_sync_ms)),
                if stopwatch.running { "" } else { " (stopped)" }
            ));
        }

        if let Some(countdown) = &data.countdown {
            let mut part = format!("TM {}", format_countdown(countdown.remaining_seconds));
            if countdown.phase != CountdownPhase::Running {
                part.push_str(&format!(" ({})", countdown.phase));
            }
            parts.push(part);
        }

        if let Some(latest) = data.notifications.as_ref().and_then(|n| n.last()) {
            parts.push(latest.message.clone());
        }

        parts.join(" | ")
    }
}

/// Elapsed stopwatch time `since_sync_ms` after `snapshot` was taken.
pub fn extrapolate_elapsed(snapshot: &StopwatchSnapshot, since_sync_ms: u64) -> u64 {
    if snapshot.running {
        snapshot.elapsed_ms.saturating_add(since_sync_ms)
    } else {
        snapshot.elapsed_ms
    }
}

// ============================================================================
// Tests
// ============================================================================
