//! Pure display helpers derived from engine state.
//!
//! Nothing in here touches engine state; these only turn numbers into
//! the strings the CLI prints.

use chrono::NaiveDateTime;

/// Formats stopwatch time as `MM:SS:CC` (minutes, seconds, hundredths).
///
/// Minutes are not wrapped into hours.
pub fn format_stopwatch(elapsed_ms: u64) -> String {
    let total_seconds = elapsed_ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let hundredths = (elapsed_ms % 1000) / 10;
    format!("{:02}:{:02}:{:02}", minutes, seconds, hundredths)
}

/// Formats countdown time as `MM:SS`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Clock-of-day as `HH:MM:SS` (24-hour).
pub fn format_clock_time(now: &NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Date line as `Weekday, Month D, YYYY`.
pub fn format_clock_date(now: &NaiveDateTime) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

/// Renders a progress fraction as a fixed-width text bar with a percentage.
pub fn format_progress_bar(progress: f64, width: usize) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = ((progress * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        (progress * 100.0).round() as u32
    )
}

/// Parses a user-typed duration field leniently.
///
/// Leading whitespace is skipped and the leading run of digits is used.
/// Anything absent or non-numeric yields 0; overflow saturates.
pub fn parse_duration_field(input: &str) -> u32 {
    input
        .trim_start()
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u32, |acc, digit| acc.saturating_mul(10).saturating_add(digit))
}

/// Total seconds for a minutes/seconds pair, saturating on overflow.
pub fn total_seconds(minutes: u32, seconds: u32) -> u32 {
    minutes.saturating_mul(60).saturating_add(seconds)
}
