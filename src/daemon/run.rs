//! Daemon main loop.
//!
//! Binds the IPC socket, serves requests against a shared [`App`], drives
//! the countdown through a [`TickScheduler`] and periodically drops expired
//! notifications.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::UnixStream;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::config::AppConfig;
use crate::types::IpcResponse;

use super::app::{App, AppEvent};
use super::ipc::{IpcServer, RequestHandler};
use super::scheduler::{Tick, TickScheduler};
use super::time_source::{MonotonicTimeSource, TimeSource};

/// How often expired notifications are dropped.
const SWEEP_INTERVAL_MS: u64 = 500;

/// Runs the daemon until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the socket path cannot be resolved or bound.
pub async fn run(config: AppConfig) -> Result<()> {
    let socket_path = config.resolved_socket_path()?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_until(
        &config,
        &socket_path,
        Arc::new(MonotonicTimeSource::new()),
        shutdown,
    )
    .await
}

/// Runs the daemon on `socket_path` until `shutdown` completes.
///
/// # Errors
///
/// Returns an error if the socket cannot be bound.
pub async fn run_until<F>(
    config: &AppConfig,
    socket_path: &Path,
    time: Arc<dyn TimeSource>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let server = IpcServer::new(socket_path)?;
    tracing::info!("Daemon listening on {:?}", server.socket_path());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let app = Arc::new(Mutex::new(App::new(config, time, event_tx)));
    app.lock().await.announce_startup();
    let handler = Arc::new(RequestHandler::new(app.clone()));

    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let mut scheduler = TickScheduler::new(Duration::from_millis(config.countdown_tick_ms));

    let mut sweep = interval(Duration::from_millis(SWEEP_INTERVAL_MS));
    sweep.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutting down daemon");
                break;
            }
            accepted = server.accept() => match accepted {
                Ok(stream) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        if let Err(e) = serve_connection(stream, &handler).await {
                            tracing::warn!("Connection failed: {:#}", e);
                        }
                    });
                }
                Err(e) => tracing::warn!("{:#}", e),
            },
            Some(event) = event_rx.recv() => {
                on_event(&event, &mut scheduler, &tick_tx);
            }
            Some(tick) = tick_rx.recv() => {
                on_tick(tick, &scheduler, &app).await;
            }
            _ = sweep.tick() => {
                let removed = app.lock().await.sweep_notifications();
                if removed > 0 {
                    tracing::trace!("Dropped {} expired notifications", removed);
                }
            }
        }
    }

    scheduler.disarm();
    Ok(())
}

async fn serve_connection(mut stream: UnixStream, handler: &RequestHandler) -> Result<()> {
    let request = match IpcServer::receive_request(&mut stream).await {
        Ok(request) => request,
        Err(e) => {
            let response = IpcResponse::error(format!("{:#}", e));
            let _ = IpcServer::send_response(&mut stream, &response).await;
            return Err(e);
        }
    };

    let response = handler.handle(request).await;
    IpcServer::send_response(&mut stream, &response).await
}

fn on_event(event: &AppEvent, scheduler: &mut TickScheduler, tick_tx: &mpsc::UnboundedSender<Tick>) {
    match event {
        AppEvent::CountdownStarted { remaining_seconds } => {
            tracing::info!("Timer started ({}s remaining)", remaining_seconds);
            scheduler.arm(tick_tx.clone());
        }
        AppEvent::CountdownCompleted => {
            tracing::info!("Timer completed");
        }
        AppEvent::CountdownTick { remaining_seconds } => {
            tracing::trace!("Timer tick ({}s remaining)", remaining_seconds);
        }
        other => tracing::debug!("{:?}", other),
    }

    if event.halts_countdown() {
        scheduler.disarm();
    }
}

async fn on_tick(tick: Tick, scheduler: &TickScheduler, app: &Mutex<App>) {
    if !scheduler.is_current(&tick) {
        tracing::trace!("Dropping stale tick (generation {})", tick.generation);
        return;
    }

    if let Err(e) = app.lock().await.countdown_tick() {
        tracing::debug!("Tick ignored: {}", e);
    }
}
