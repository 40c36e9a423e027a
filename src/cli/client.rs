//! IPC client for talking to the clockdeck daemon.
//!
//! This module provides:
//! - Unix Domain Socket client
//! - Connection retry logic
//! - Timeout handling

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::time::timeout;

use crate::types::{IpcRequest, IpcResponse};

// ============================================================================
// Constants
// ============================================================================

/// Connection timeout in seconds
const CONNECTION_TIMEOUT_SECS: u64 = 5;

/// Read/write timeout in seconds
const IO_TIMEOUT_SECS: u64 = 5;

/// Maximum response size in bytes (64KB)
const MAX_RESPONSE_SIZE: u64 = 65536;

/// Maximum connection attempts
const MAX_RETRIES: u32 = 3;

/// Retry delay in milliseconds (base delay, multiplied by attempt number)
const RETRY_DELAY_MS: u64 = 200;

// ============================================================================
// IpcClient
// ============================================================================

/// IPC client for daemon communication.
#[derive(Debug, Clone)]
pub struct IpcClient {
    socket_path: PathBuf,
    timeout: Duration,
    max_retries: u32,
}

impl IpcClient {
    /// Creates a client for the daemon listening on `socket_path`.
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            timeout: Duration::from_secs(CONNECTION_TIMEOUT_SECS),
            max_retries: MAX_RETRIES,
        }
    }

    /// Sets how many times connecting is attempted (at least once).
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Queries the full daemon state.
    pub async fn status(&self) -> Result<IpcResponse> {
        self.send(&IpcRequest::Status).await
    }

    /// Sends a request and returns the response.
    ///
    /// Only connecting is retried; once a request is written it is never
    /// sent again.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon is unreachable, the exchange fails or
    /// times out, or the daemon answers with an error status. `ignored`
    /// responses are returned as `Ok`.
    pub async fn send(&self, request: &IpcRequest) -> Result<IpcResponse> {
        let mut stream = self.connect_with_retry().await?;
        let response = self.exchange(&mut stream, request).await?;

        if response.is_error() {
            anyhow::bail!("{}", response.message);
        }

        Ok(response)
    }

    async fn connect_with_retry(&self) -> Result<UnixStream> {
        let mut attempt = 1;

        loop {
            match self.connect().await {
                Ok(stream) => return Ok(stream),
                Err(e) if attempt < self.max_retries => {
                    tracing::debug!(
                        "Connection failed (attempt {}/{}): {:#}",
                        attempt,
                        self.max_retries,
                        e
                    );
                    let delay = Duration::from_millis(RETRY_DELAY_MS * u64::from(attempt));
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn connect(&self) -> Result<UnixStream> {
        timeout(self.timeout, UnixStream::connect(&self.socket_path))
            .await
            .context("Connection timed out")?
            .with_context(|| {
                format!(
                    "Cannot connect to the daemon at {:?}. Start it with 'clockdeck daemon'",
                    self.socket_path
                )
            })
    }

    async fn exchange(&self, stream: &mut UnixStream, request: &IpcRequest) -> Result<IpcResponse> {
        let io_timeout = Duration::from_secs(IO_TIMEOUT_SECS);
        let request_json = serde_json::to_vec(request).context("Failed to serialize request")?;

        timeout(io_timeout, stream.write_all(&request_json))
            .await
            .context("Write timed out")?
            .context("Failed to send request")?;

        // Shutdown write side to signal end of request
        stream
            .shutdown()
            .await
            .context("Failed to finish request")?;

        let mut buffer = Vec::new();
        timeout(
            io_timeout,
            (&mut *stream).take(MAX_RESPONSE_SIZE).read_to_end(&mut buffer),
        )
        .await
        .context("Read timed out")?
        .context("Failed to read response")?;

        if buffer.is_empty() {
            anyhow::bail!("The daemon closed the connection without answering");
        }

        serde_json::from_slice(&buffer).context("Failed to parse response")
    }
}

// ============================================================================
// Tests
// ============================================================================
