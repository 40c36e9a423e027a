//! Application state owned by the daemon.
//!
//! `App` bundles the two engines with the presentation state (theme, tab,
//! notifications) and is the only place where engine transitions happen.
//! Each successful transition posts a notification where the user should
//! see one, and emits an [`AppEvent`] for the daemon loop (which uses the
//! countdown events to arm and disarm its tick scheduler).

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::engine::{
    CountdownEngine, InvalidOperation, LapOrReset, StopwatchEngine, TickOutcome,
};
use crate::types::{
    CountdownPhase, CountdownSnapshot, LapRecord, Notification, ResponseData, ShortcutKey,
    StopwatchSnapshot, Tab, Theme,
};

use super::time_source::TimeSource;
use super::toast::ToastCenter;

// ============================================================================
// AppEvent
// ============================================================================

/// State changes reported to the daemon loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Stopwatch began a segment
    StopwatchStarted,
    /// Stopwatch closed a segment
    StopwatchStopped {
        /// Total elapsed time after the stop
        elapsed_ms: u64,
    },
    /// A lap was recorded
    LapRecorded(LapRecord),
    /// Stopwatch cleared to zero with no laps
    StopwatchReset,
    /// Laps dropped
    LapsCleared,
    /// Countdown duration set
    CountdownConfigured {
        /// New duration
        total_seconds: u32,
    },
    /// Countdown started or resumed
    CountdownStarted {
        /// Seconds left at start
        remaining_seconds: u32,
    },
    /// Countdown paused
    CountdownPaused {
        /// Seconds left at pause
        remaining_seconds: u32,
    },
    /// Countdown cleared
    CountdownReset,
    /// One second counted
    CountdownTick {
        /// Seconds left
        remaining_seconds: u32,
    },
    /// Countdown reached zero
    CountdownCompleted,
    /// Theme changed
    ThemeChanged(Theme),
    /// Tab switched
    TabSwitched(Tab),
}

impl AppEvent {
    /// Returns true for events after which the countdown must not be ticked.
    pub fn halts_countdown(&self) -> bool {
        matches!(
            self,
            AppEvent::CountdownPaused { .. }
                | AppEvent::CountdownReset
                | AppEvent::CountdownCompleted
        )
    }
}

// ============================================================================
// App
// ============================================================================

/// Engines plus presentation state.
pub struct App {
    stopwatch: StopwatchEngine,
    countdown: CountdownEngine,
    theme: Theme,
    tab: Tab,
    toasts: ToastCenter,
    time: Arc<dyn TimeSource>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    /// Creates fresh application state.
    pub fn new(
        config: &AppConfig,
        time: Arc<dyn TimeSource>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            stopwatch: StopwatchEngine::new(),
            countdown: CountdownEngine::new(),
            theme: config.theme,
            tab: config.tab,
            toasts: ToastCenter::new(config.notification_ttl_ms),
            time,
            event_tx,
        }
    }

    /// Posts the start-up greeting.
    pub fn announce_startup(&mut self) {
        self.notify("Clock app loaded successfully!");
    }

    // ------------------------------------------------------------------------
    // Stopwatch
    // ------------------------------------------------------------------------

    /// Starts the stopwatch.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::StopwatchAlreadyRunning`] if it is running.
    pub fn stopwatch_start(&mut self) -> Result<(), InvalidOperation> {
        self.stopwatch.start(self.time.now_ms())?;
        self.emit(AppEvent::StopwatchStarted);
        Ok(())
    }

    /// Stops the stopwatch and returns the elapsed total.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::StopwatchNotRunning`] if it is stopped.
    pub fn stopwatch_stop(&mut self) -> Result<u64, InvalidOperation> {
        let now = self.time.now_ms();
        self.stopwatch.stop(now)?;
        let elapsed_ms = self.stopwatch.current_elapsed_ms(now);
        self.emit(AppEvent::StopwatchStopped { elapsed_ms });
        Ok(elapsed_ms)
    }

    /// Starts a stopped stopwatch or stops a running one.
    /// Returns true if it is running afterwards.
    pub fn stopwatch_toggle(&mut self) -> bool {
        if self.stopwatch.is_running() {
            let _ = self.stopwatch_stop();
        } else {
            let _ = self.stopwatch_start();
        }
        self.stopwatch.is_running()
    }

    /// Records a lap.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::LapWhileStopped`] if the stopwatch is stopped.
    pub fn stopwatch_lap(&mut self) -> Result<LapRecord, InvalidOperation> {
        let lap = self.stopwatch.record_lap(self.time.now_ms())?;
        self.on_lap(lap);
        Ok(lap)
    }

    /// Records a lap while running, resets while stopped.
    pub fn stopwatch_lap_or_reset(&mut self) -> LapOrReset {
        let outcome = self.stopwatch.reset_or_record(self.time.now_ms());
        match outcome {
            LapOrReset::Lapped(lap) => self.on_lap(lap),
            LapOrReset::Reset => self.emit(AppEvent::StopwatchReset),
        }
        outcome
    }

    /// Drops all laps.
    pub fn stopwatch_clear_laps(&mut self) {
        self.stopwatch.clear_laps();
        self.notify("Laps cleared");
        self.emit(AppEvent::LapsCleared);
    }

    /// Current stopwatch view.
    pub fn stopwatch_snapshot(&self) -> StopwatchSnapshot {
        self.stopwatch.snapshot(self.time.now_ms())
    }

    fn on_lap(&mut self, lap: LapRecord) {
        self.notify(format!("Lap {} recorded", lap.number));
        self.emit(AppEvent::LapRecorded(lap));
    }

    // ------------------------------------------------------------------------
    // Countdown
    // ------------------------------------------------------------------------

    /// Sets the countdown duration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::ConfigureWhileRunning`] while running.
    pub fn countdown_configure(&mut self, total_seconds: u32) -> Result<(), InvalidOperation> {
        self.countdown.configure(total_seconds)?;
        self.emit(AppEvent::CountdownConfigured { total_seconds });
        Ok(())
    }

    /// Sets the countdown to a whole number of minutes.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::ConfigureWhileRunning`] while running.
    pub fn countdown_preset(&mut self, minutes: u32) -> Result<(), InvalidOperation> {
        self.countdown.preset_minutes(minutes)?;
        self.notify(format!("Pomodoro timer set to {} minutes", minutes));
        self.emit(AppEvent::CountdownConfigured {
            total_seconds: self.countdown.total_seconds(),
        });
        Ok(())
    }

    /// Starts or resumes the countdown.
    ///
    /// With `total_seconds`, an idle or completed countdown is configured to
    /// that duration first. A paused countdown resumes and ignores it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::CountdownAlreadyRunning`] while running and
    /// [`InvalidOperation::CountdownEmpty`] when there is nothing to count.
    pub fn countdown_start(&mut self, total_seconds: Option<u32>) -> Result<(), InvalidOperation> {
        if let Some(total) = total_seconds {
            if matches!(
                self.countdown.phase(),
                CountdownPhase::Idle | CountdownPhase::Completed
            ) {
                self.countdown_configure(total)?;
            }
        }

        self.countdown.start()?;
        self.notify("Timer started");
        self.emit(AppEvent::CountdownStarted {
            remaining_seconds: self.countdown.remaining_seconds(),
        });
        Ok(())
    }

    /// Pauses the countdown.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::CountdownNotRunning`] unless running.
    pub fn countdown_pause(&mut self) -> Result<(), InvalidOperation> {
        self.countdown.pause()?;
        self.notify("Timer paused");
        self.emit(AppEvent::CountdownPaused {
            remaining_seconds: self.countdown.remaining_seconds(),
        });
        Ok(())
    }

    /// Clears the countdown.
    pub fn countdown_reset(&mut self) {
        self.countdown.reset();
        self.notify("Timer reset");
        self.emit(AppEvent::CountdownReset);
    }

    /// Advances the countdown by one second.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation::CountdownNotRunning`] unless running.
    pub fn countdown_tick(&mut self) -> Result<TickOutcome, InvalidOperation> {
        let outcome = self.countdown.tick()?;
        match outcome {
            TickOutcome::Running { remaining_seconds } => {
                self.emit(AppEvent::CountdownTick { remaining_seconds });
            }
            TickOutcome::Completed => {
                self.notify("Timer completed! 🎉");
                self.emit(AppEvent::CountdownCompleted);
            }
        }
        Ok(outcome)
    }

    /// Current countdown view.
    pub fn countdown_snapshot(&self) -> CountdownSnapshot {
        self.countdown.snapshot()
    }

    // ------------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------------

    /// Changes the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.notify(format!("Theme changed to {}", theme));
        self.emit(AppEvent::ThemeChanged(theme));
    }

    /// Switches the active tab.
    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.emit(AppEvent::TabSwitched(tab));
    }

    /// Dispatches a keyboard shortcut.
    ///
    /// Digits switch tabs. Space toggles the stopwatch on the stopwatch tab,
    /// starts the countdown on the timer tab and does nothing on the clock tab.
    ///
    /// # Errors
    ///
    /// Propagates [`InvalidOperation`] from starting the countdown.
    pub fn dispatch_shortcut(&mut self, key: ShortcutKey) -> Result<(), InvalidOperation> {
        if let Some(tab) = key.target_tab() {
            self.switch_tab(tab);
            return Ok(());
        }

        match self.tab {
            Tab::Stopwatch => {
                self.stopwatch_toggle();
                Ok(())
            }
            Tab::Timer => self.countdown_start(None),
            Tab::Clock => Ok(()),
        }
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Current tab.
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Notifications still visible.
    pub fn notifications(&self) -> Vec<Notification> {
        self.toasts.active(self.time.now_ms())
    }

    /// Drops expired notifications.
    pub fn sweep_notifications(&mut self) -> usize {
        self.toasts.sweep(self.time.now_ms())
    }

    /// Full state for IPC responses.
    pub fn response_data(&self) -> ResponseData {
        ResponseData {
            stopwatch: Some(self.stopwatch_snapshot()),
            countdown: Some(self.countdown_snapshot()),
            lap: None,
            theme: Some(self.theme),
            tab: Some(self.tab),
            notifications: Some(self.notifications()),
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        let now = self.time.now_ms();
        self.toasts.post(message, now);
    }

    fn emit(&self, event: AppEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::trace!("Event receiver dropped");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
