//! Performance tests for clockdeck.
//!
//! - IPC round-trip latency (target: 50ms average)
//! - Lap list rendering with many laps (target: 50ms)
//! - Stopwatch reads at display-refresh rate (target: 10ms for 10k reads)
//!
//! Targets are loose so the tests hold on a loaded CI machine.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, Mutex};

use clockdeck::cli::client::IpcClient;
use clockdeck::cli::display::Display;
use clockdeck::config::AppConfig;
use clockdeck::daemon::app::App;
use clockdeck::daemon::ipc::{IpcServer, RequestHandler};
use clockdeck::daemon::time_source::ManualTimeSource;
use clockdeck::types::IpcRequest;
use clockdeck::StopwatchEngine;

// ============================================================================
// Test Helpers
// ============================================================================

/// Performance measurement result.
#[derive(Debug)]
struct PerfResult {
    operation: String,
    duration: Duration,
    target: Duration,
}

impl PerfResult {
    fn new(operation: &str, duration: Duration, target_ms: u64) -> Self {
        Self {
            operation: operation.to_string(),
            duration,
            target: Duration::from_millis(target_ms),
        }
    }

    fn assert_passed(&self) {
        assert!(
            self.duration <= self.target,
            "Performance test failed: {} took {:?} (target: {:?})",
            self.operation,
            self.duration,
            self.target
        );
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_ipc_round_trip_latency() {
    const REQUESTS: u32 = 20;

    let dir = tempfile::tempdir().unwrap();
    let socket_path = dir.path().join("perf_test.sock");

    let (tx, _rx) = mpsc::unbounded_channel();
    let app = App::new(&AppConfig::default(), Arc::new(ManualTimeSource::new(0)), tx);
    let handler = RequestHandler::new(Arc::new(Mutex::new(app)));
    let server = IpcServer::new(&socket_path).unwrap();

    let server_task = tokio::spawn(async move {
        for _ in 0..REQUESTS {
            let mut stream = server.accept().await.unwrap();
            let request = IpcServer::receive_request(&mut stream).await.unwrap();
            let response = handler.handle(request).await;
            IpcServer::send_response(&mut stream, &response)
                .await
                .unwrap();
        }
    });

    let client = IpcClient::new(&socket_path);
    let start = Instant::now();
    for _ in 0..REQUESTS {
        client.send(&IpcRequest::Status).await.unwrap();
    }
    let average = start.elapsed() / REQUESTS;

    server_task.await.unwrap();
    PerfResult::new("IPC round trip (average)", average, 50).assert_passed();
}

#[test]
fn test_lap_list_render() {
    let mut stopwatch = StopwatchEngine::new();
    stopwatch.start(0).unwrap();
    for n in 1..=1_000u64 {
        stopwatch.record_lap(n * 37).unwrap();
    }

    let start = Instant::now();
    let lines = Display::render_laps(stopwatch.laps());
    let elapsed = start.elapsed();

    assert_eq!(lines.len(), 1_000);
    assert_eq!(lines[999], "Lap 1000  00:37:00");
    PerfResult::new("Render 1000 laps", elapsed, 50).assert_passed();
}

#[test]
fn test_stopwatch_reads() {
    let mut stopwatch = StopwatchEngine::new();
    stopwatch.start(0).unwrap();

    let start = Instant::now();
    let mut last = 0;
    for now in 0..10_000u64 {
        let elapsed = stopwatch.current_elapsed_ms(now * 10);
        assert!(elapsed >= last);
        last = elapsed;
    }
    let elapsed = start.elapsed();

    assert_eq!(last, 99_990);
    PerfResult::new("10k stopwatch reads", elapsed, 10).assert_passed();
}
