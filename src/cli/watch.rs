//! Live single-line display.
//!
//! The daemon is polled at most every [`SYNC_INTERVAL_MS`]; between polls
//! the running stopwatch is advanced locally so the hundredths move at the
//! redraw rate.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};

use crate::types::ResponseData;

use super::client::IpcClient;
use super::display::Display;

/// Minimum time between two status requests.
pub const SYNC_INTERVAL_MS: u64 = 250;

/// Redraws the status line every `refresh` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the daemon cannot be reached or stdout fails.
pub async fn watch(client: &IpcClient, refresh: Duration) -> Result<()> {
    let mut ticker = interval(refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let sync_every = Duration::from_millis(SYNC_INTERVAL_MS);
    let mut synced: Option<(Instant, ResponseData)> = None;
    let mut stdout = std::io::stdout();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    tracing::debug!("Watching with a {:?} refresh", refresh);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                writeln!(stdout)?;
                return Ok(());
            }
            _ = ticker.tick() => {
                let stale = synced
                    .as_ref()
                    .map_or(true, |(at, _)| at.elapsed() >= sync_every);
                if stale {
                    let response = client.status().await?;
                    let data = response
                        .data
                        .context("The daemon returned no state")?;
                    synced = Some((Instant::now(), data));
                }

                if let Some((at, data)) = &synced {
                    let since_sync_ms = u64::try_from(at.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let line = Display::render_watch_line(
                        data,
                        since_sync_ms,
                        &Local::now().naive_local(),
                    );
                    write!(stdout, "\r{}\x1b[K", line)?;
                    stdout.flush()?;
                }
            }
        }
    }
}
