//! End-to-end tests against a running daemon loop.
//!
//! The daemon runs with a 10 ms countdown tick and the real monotonic
//! clock, so these tests poll with generous timeouts instead of asserting
//! exact timings.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};

use clockdeck::cli::client::IpcClient;
use clockdeck::config::AppConfig;
use clockdeck::daemon::run_until;
use clockdeck::daemon::time_source::MonotonicTimeSource;
use clockdeck::types::{CountdownPhase, CountdownSnapshot, IpcRequest, IpcResponse};

// ============================================================================
// Test Helpers
// ============================================================================

struct RunningDaemon {
    _dir: tempfile::TempDir,
    socket_path: PathBuf,
    client: IpcClient,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<anyhow::Result<()>>>,
}

impl RunningDaemon {
    async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("e2e_test.sock");
        let config = AppConfig::default()
            .with_socket_path(&socket_path)
            .with_countdown_tick_ms(10);

        let (tx, rx) = oneshot::channel::<()>();
        let path = socket_path.clone();
        let handle = tokio::spawn(async move {
            run_until(
                &config,
                &path,
                Arc::new(MonotonicTimeSource::new()),
                async {
                    let _ = rx.await;
                },
            )
            .await
        });

        let deadline = Instant::now() + Duration::from_secs(2);
        while !socket_path.exists() {
            assert!(Instant::now() < deadline, "daemon did not bind its socket");
            sleep(Duration::from_millis(5)).await;
        }

        Self {
            _dir: dir,
            client: IpcClient::new(&socket_path),
            socket_path,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    async fn send(&self, request: IpcRequest) -> IpcResponse {
        self.client.send(&request).await.unwrap()
    }

    async fn countdown(&self) -> CountdownSnapshot {
        self.send(IpcRequest::Status)
            .await
            .data
            .unwrap()
            .countdown
            .unwrap()
    }

    async fn wait_for_phase(&self, phase: CountdownPhase) -> CountdownSnapshot {
        timeout(Duration::from_secs(3), async {
            loop {
                let countdown = self.countdown().await;
                if countdown.phase == phase {
                    return countdown;
                }
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("countdown did not reach the expected phase")
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.await.unwrap().unwrap();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_startup_notification() {
    let daemon = RunningDaemon::start().await;

    let response = daemon.send(IpcRequest::Notifications).await;
    let messages: Vec<String> = response
        .data
        .unwrap()
        .notifications
        .unwrap()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(messages, vec!["Clock app loaded successfully!"]);

    daemon.stop().await;
}

#[tokio::test]
async fn test_countdown_runs_to_completion() {
    let daemon = RunningDaemon::start().await;

    daemon
        .send(IpcRequest::TimerStart {
            total_seconds: Some(3),
        })
        .await;

    let countdown = daemon.wait_for_phase(CountdownPhase::Completed).await;
    assert_eq!(countdown.remaining_seconds, 0);
    assert_eq!(countdown.total_seconds, 3);

    // No further ticks after completion
    sleep(Duration::from_millis(50)).await;
    assert_eq!(daemon.countdown().await.phase, CountdownPhase::Completed);

    let response = daemon.send(IpcRequest::Notifications).await;
    let completed = response
        .data
        .unwrap()
        .notifications
        .unwrap()
        .into_iter()
        .filter(|n| n.message == "Timer completed! 🎉")
        .count();
    assert_eq!(completed, 1);

    daemon.stop().await;
}

#[tokio::test]
async fn test_pause_freezes_countdown() {
    let daemon = RunningDaemon::start().await;

    daemon
        .send(IpcRequest::TimerStart {
            total_seconds: Some(10_000),
        })
        .await;
    sleep(Duration::from_millis(50)).await;

    let paused = daemon.send(IpcRequest::TimerPause).await;
    let remaining = paused.data.unwrap().countdown.unwrap().remaining_seconds;
    assert!(remaining < 10_000);

    sleep(Duration::from_millis(100)).await;
    let countdown = daemon.countdown().await;
    assert_eq!(countdown.phase, CountdownPhase::Paused);
    assert_eq!(countdown.remaining_seconds, remaining);

    daemon
        .send(IpcRequest::TimerStart {
            total_seconds: None,
        })
        .await;
    sleep(Duration::from_millis(100)).await;
    assert!(daemon.countdown().await.remaining_seconds < remaining);

    daemon.stop().await;
}

#[tokio::test]
async fn test_reset_stops_ticking() {
    let daemon = RunningDaemon::start().await;

    daemon
        .send(IpcRequest::TimerStart {
            total_seconds: Some(10_000),
        })
        .await;
    sleep(Duration::from_millis(30)).await;
    daemon.send(IpcRequest::TimerReset).await;

    sleep(Duration::from_millis(50)).await;
    let countdown = daemon.countdown().await;
    assert_eq!(countdown.phase, CountdownPhase::Idle);
    assert_eq!(countdown.remaining_seconds, 0);

    daemon.stop().await;
}

#[tokio::test]
async fn test_stopwatch_measures_real_time() {
    let daemon = RunningDaemon::start().await;

    daemon.send(IpcRequest::StopwatchStart).await;
    sleep(Duration::from_millis(60)).await;
    let response = daemon.send(IpcRequest::StopwatchStop).await;

    let stopwatch = response.data.unwrap().stopwatch.unwrap();
    assert!(!stopwatch.running);
    assert!(stopwatch.elapsed_ms >= 60);

    daemon.stop().await;
}

#[tokio::test]
async fn test_malformed_request_gets_error_response() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixStream;

    let daemon = RunningDaemon::start().await;

    let mut stream = UnixStream::connect(&daemon.socket_path).await.unwrap();
    stream.write_all(b"not json").await.unwrap();
    stream.shutdown().await.unwrap();

    let mut buffer = Vec::new();
    stream.read_to_end(&mut buffer).await.unwrap();
    let response: IpcResponse = serde_json::from_slice(&buffer).unwrap();
    assert!(response.is_error());

    daemon.stop().await;
}

#[tokio::test]
async fn test_shutdown_removes_socket() {
    let daemon = RunningDaemon::start().await;
    let socket_path = daemon.socket_path.clone();
    assert!(socket_path.exists());

    daemon.stop().await;
    assert!(!socket_path.exists());
}
