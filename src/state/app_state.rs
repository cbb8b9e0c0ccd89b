//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use tokio::sync::{broadcast, watch};
use tracing::info;

use super::{CompetitionSelector, TimerState, TimerView};
use crate::{
    error::AppError,
    repository::TeamRepository,
    services::{EventNotifier, SoundCommandNotifier, TimerEvent, WatchDisplay},
    timer::{SourceId, TickOutcome, TickScheduler, TimerController},
};

/// Server metadata and optional extras used to build [`AppState`]
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub port: u16,
    pub host: String,
    /// Shell command played on the server when a round ends
    pub sound_command: Option<String>,
}

/// Shared state behind every handler and background task
pub struct AppState {
    /// The one timer of this display session
    timer: Mutex<TimerController>,
    /// Which team list the board shows
    pub selector: CompetitionSelector,
    /// Team storage
    pub teams: Arc<dyn TeamRepository>,
    /// Latest rendered timer view
    pub timer_view_tx: watch::Sender<TimerView>,
    /// End-of-round events for connected browsers
    pub timer_event_tx: broadcast::Sender<TimerEvent>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Create the state with a fresh 5 minute idle timer
    pub fn new(
        options: AppOptions,
        teams: Arc<dyn TeamRepository>,
        scheduler: Arc<dyn TickScheduler>,
    ) -> Self {
        let initial = TimerState::default();
        let (timer_view_tx, _) = watch::channel(initial.view());
        let (timer_event_tx, _) = broadcast::channel(16);

        let mut timer = TimerController::new(
            initial,
            scheduler,
            Arc::new(WatchDisplay::new(timer_view_tx.clone())),
        )
        .with_notifier(Arc::new(EventNotifier::new(timer_event_tx.clone())));

        if let Some(command) = options.sound_command {
            info!("Completion sound command: {}", command);
            timer = timer.with_notifier(Arc::new(SoundCommandNotifier::new(command)));
        }

        Self {
            timer: Mutex::new(timer),
            selector: CompetitionSelector::default(),
            teams,
            timer_view_tx,
            timer_event_tx,
            start_time: Instant::now(),
            port: options.port,
            host: options.host,
        }
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerController>, AppError> {
        self.timer
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to lock timer state: {}", e)))
    }

    /// Latest view, read without touching the timer lock
    pub fn timer_view(&self) -> TimerView {
        self.timer_view_tx.borrow().clone()
    }

    pub fn timer_state(&self) -> Result<TimerState, AppError> {
        Ok(self.lock_timer()?.state())
    }

    pub fn set_timer(&self, minutes: i64, seconds: i64) -> Result<TimerView, AppError> {
        Ok(self.lock_timer()?.set(minutes, seconds)?.view())
    }

    pub fn start_timer(&self) -> Result<TimerView, AppError> {
        Ok(self.lock_timer()?.start()?.view())
    }

    pub fn pause_timer(&self) -> Result<TimerView, AppError> {
        Ok(self.lock_timer()?.pause().view())
    }

    pub fn stop_timer(&self) -> Result<TimerView, AppError> {
        Ok(self.lock_timer()?.stop().view())
    }

    /// Apply a tick delivered by the scheduler
    pub fn tick(&self, source: SourceId) -> Result<TickOutcome, AppError> {
        Ok(self.lock_timer()?.tick(source))
    }

    pub fn subscribe_views(&self) -> watch::Receiver<TimerView> {
        self.timer_view_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.timer_event_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
