//! Tick scheduling for the countdown engine.
//!
//! A [`TickScheduler`] owns at most one background interval task. Arming it
//! again replaces the previous task, and every arm or disarm starts a new
//! generation. Ticks carry their generation so the consumer can drop ticks
//! that were already queued by a task that has since been replaced.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

/// One tick from a scheduler task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Generation of the task that produced the tick
    pub generation: u64,
}

/// Fixed-period tick source with at most one active task.
#[derive(Debug)]
pub struct TickScheduler {
    period: Duration,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    /// Creates a disarmed scheduler with the given period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            generation: 0,
            handle: None,
        }
    }

    /// Starts delivering ticks to `tx`, one per period, the first one a full
    /// period from now. Any previously armed task is cancelled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, tx: mpsc::UnboundedSender<Tick>) -> u64 {
        self.cancel_task();
        self.generation += 1;

        let generation = self.generation;
        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                ticker.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));

        tracing::debug!("Tick scheduler armed (generation {})", generation);
        generation
    }

    /// Stops delivering ticks. Returns true if a task was running.
    pub fn disarm(&mut self) -> bool {
        let was_armed = self.cancel_task();
        if was_armed {
            self.generation += 1;
            tracing::debug!("Tick scheduler disarmed");
        }
        was_armed
    }

    /// Returns true while a task is delivering ticks.
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns true if `tick` came from the currently armed task.
    pub fn is_current(&self, tick: &Tick) -> bool {
        self.is_armed() && tick.generation == self.generation
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    fn cancel_task(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel_task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(1000);

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TickScheduler::new(PERIOD);
        let start = Instant::now();

        let generation = scheduler.arm(tx);
        for n in 1..=3u32 {
            let tick = rx.recv().await.unwrap();
            assert_eq!(tick.generation, generation);
            assert!(scheduler.is_current(&tick));
            assert_eq!(Instant::now() - start, PERIOD * n);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TickScheduler::new(PERIOD);

        scheduler.arm(tx);
        let tick = rx.recv().await.unwrap();
        assert!(scheduler.disarm());
        assert!(!scheduler.is_armed());
        assert!(!scheduler.is_current(&tick));

        // The task held the only sender, so the channel closes once it is gone.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_previous_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TickScheduler::new(PERIOD);

        let first = scheduler.arm(tx.clone());
        let stale = rx.recv().await.unwrap();
        let second = scheduler.arm(tx);

        assert_ne!(first, second);
        assert!(!scheduler.is_current(&stale));

        let fresh = rx.recv().await.unwrap();
        assert_eq!(fresh.generation, second);
        assert!(scheduler.is_current(&fresh));
    }

    #[tokio::test]
    async fn test_disarm_when_idle() {
        let mut scheduler = TickScheduler::new(PERIOD);
        assert!(!scheduler.disarm());
        assert_eq!(scheduler.period(), PERIOD);
    }
}
