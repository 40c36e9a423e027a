//! IPC server for the clockdeck daemon.
//!
//! One JSON request per connection over a Unix domain socket. The client
//! writes the request and shuts down its write half; the server answers
//! with one JSON response.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::engine::format::{format_countdown, format_stopwatch};
use crate::engine::{InvalidOperation, LapOrReset};
use crate::types::{IpcRequest, IpcResponse, LapRecord, ResponseData};

use super::app::App;

// ============================================================================
// Constants
// ============================================================================

/// Maximum request size in bytes (4KB)
pub const MAX_REQUEST_SIZE: usize = 4096;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// IpcError
// ============================================================================

/// IPC-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Read error
    #[error("Failed to read request: {0}")]
    ReadError(String),

    /// The client closed the connection without sending anything
    #[error("Connection closed by client")]
    EmptyRequest,

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,

    /// Request too large
    #[error("Request too large (max {MAX_REQUEST_SIZE} bytes)")]
    RequestTooLarge,
}

// ============================================================================
// IpcServer
// ============================================================================

/// Unix Domain Socket IPC server.
pub struct IpcServer {
    listener: UnixListener,
    /// Socket path (for cleanup)
    socket_path: PathBuf,
}

impl IpcServer {
    /// Creates a new IPC server bound to `socket_path`.
    ///
    /// A stale socket file is removed and missing parent directories are
    /// created.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn new(socket_path: &Path) -> Result<Self> {
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("Failed to remove existing socket: {:?}", socket_path))?;
        }

        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {:?}", parent))?;
        }

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("Failed to bind Unix socket: {:?}", socket_path))?;

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Accepts an incoming client connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be accepted.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        Ok(stream)
    }

    /// Reads the request until the client closes its write half.
    ///
    /// # Errors
    ///
    /// Returns an error on timeout, on an empty or oversized request, or if
    /// the bytes are not a valid request.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = Vec::with_capacity(256);
        let limit = (MAX_REQUEST_SIZE + 1) as u64;

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            (&mut *stream).take(limit).read_to_end(&mut buffer),
        )
        .await;

        match read_result {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(IpcError::ReadError(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        }

        if buffer.is_empty() {
            return Err(IpcError::EmptyRequest.into());
        }
        if buffer.len() > MAX_REQUEST_SIZE {
            return Err(IpcError::RequestTooLarge.into());
        }

        let request: IpcRequest =
            serde_json::from_slice(&buffer).context("Failed to deserialize IPC request")?;

        Ok(request)
    }

    /// Serializes and sends a response.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("Failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("Failed to write response")?;
        stream.flush().await.context("Failed to flush response")?;
        stream
            .shutdown()
            .await
            .context("Failed to close response stream")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Maps IPC requests onto [`App`] operations.
///
/// Requests that are not valid in the current state are answered with an
/// `ignored` response carrying the unchanged state.
pub struct RequestHandler {
    app: Arc<Mutex<App>>,
}

impl RequestHandler {
    /// Creates a handler over the shared application state.
    pub fn new(app: Arc<Mutex<App>>) -> Self {
        Self { app }
    }

    /// Handles one request.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        let mut app = self.app.lock().await;
        tracing::debug!("Handling request: {:?}", request);

        match request {
            IpcRequest::Status => IpcResponse::success("", Some(app.response_data())),
            IpcRequest::Notifications => {
                let data = ResponseData {
                    notifications: Some(app.notifications()),
                    ..Default::default()
                };
                IpcResponse::success("", Some(data))
            }

            IpcRequest::StopwatchStart => {
                let result = app.stopwatch_start();
                reply(&app, result, |()| "Stopwatch started".to_string())
            }
            IpcRequest::StopwatchStop => {
                let result = app.stopwatch_stop();
                reply(&app, result, |elapsed| {
                    format!("Stopwatch stopped at {}", format_stopwatch(elapsed))
                })
            }
            IpcRequest::StopwatchToggle => {
                let message = if app.stopwatch_toggle() {
                    "Stopwatch started"
                } else {
                    "Stopwatch stopped"
                };
                IpcResponse::success(message, Some(app.response_data()))
            }
            IpcRequest::StopwatchLap => {
                let result = app.stopwatch_lap();
                match result {
                    Ok(lap) => lap_response(&app, lap),
                    Err(e) => ignored(&app, e),
                }
            }
            IpcRequest::StopwatchLapOrReset => match app.stopwatch_lap_or_reset() {
                LapOrReset::Lapped(lap) => lap_response(&app, lap),
                LapOrReset::Reset => {
                    IpcResponse::success("Stopwatch reset", Some(app.response_data()))
                }
            },
            IpcRequest::StopwatchClearLaps => {
                app.stopwatch_clear_laps();
                IpcResponse::success("Laps cleared", Some(app.response_data()))
            }

            IpcRequest::TimerConfigure { total_seconds } => {
                let result = app.countdown_configure(total_seconds);
                reply(&app, result, |()| {
                    format!("Timer set to {}", format_countdown(total_seconds))
                })
            }
            IpcRequest::TimerStart { total_seconds } => {
                let result = app.countdown_start(total_seconds);
                let remaining = app.countdown_snapshot().remaining_seconds;
                reply(&app, result, |()| {
                    format!("Timer started ({} remaining)", format_countdown(remaining))
                })
            }
            IpcRequest::TimerPause => {
                let result = app.countdown_pause();
                let remaining = app.countdown_snapshot().remaining_seconds;
                reply(&app, result, |()| {
                    format!("Timer paused ({} remaining)", format_countdown(remaining))
                })
            }
            IpcRequest::TimerReset => {
                app.countdown_reset();
                IpcResponse::success("Timer reset", Some(app.response_data()))
            }
            IpcRequest::TimerPreset { minutes } => {
                let result = app.countdown_preset(minutes);
                reply(&app, result, |()| {
                    format!("Pomodoro timer set to {} minutes", minutes)
                })
            }

            IpcRequest::Theme { theme } => {
                app.set_theme(theme);
                IpcResponse::success(
                    format!("Theme changed to {}", theme),
                    Some(app.response_data()),
                )
            }
            IpcRequest::Tab { tab } => {
                app.switch_tab(tab);
                IpcResponse::success(format!("Switched to {}", tab), Some(app.response_data()))
            }
            IpcRequest::Shortcut { key } => {
                let result = app.dispatch_shortcut(key);
                let tab = app.tab();
                reply(&app, result, |()| format!("Key handled on {} tab", tab))
            }
        }
    }
}

fn reply<T>(
    app: &App,
    result: Result<T, InvalidOperation>,
    message: impl FnOnce(T) -> String,
) -> IpcResponse {
    match result {
        Ok(value) => IpcResponse::success(message(value), Some(app.response_data())),
        Err(e) => ignored(app, e),
    }
}

fn ignored(app: &App, error: InvalidOperation) -> IpcResponse {
    tracing::info!("Ignored request: {}", error);
    IpcResponse::ignored(error.to_string(), Some(app.response_data()))
}

fn lap_response(app: &App, lap: LapRecord) -> IpcResponse {
    let mut data = app.response_data();
    data.lap = Some(lap);
    IpcResponse::success(
        format!(
            "Lap {} recorded at {}",
            lap.number,
            format_stopwatch(lap.elapsed_ms)
        ),
        Some(data),
    )
}

// ============================================================================
// Tests
// ============================================================================
