//! Countdown state machine

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{CompletionNotifier, DisplaySink, SourceId, TickScheduler, TickSource};
use crate::state::{TimerPhase, TimerState};

pub const MAX_MINUTES: i64 = 60;
pub const MAX_SECONDS: i64 = 59;

/// Rejected user actions; state is left untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("invalid time {minutes}m {seconds}s (expected 0-60 minutes, 0-59 seconds)")]
    InvalidInput { minutes: i64, seconds: i64 },
    #[error("no time remaining, set a valid time first")]
    NotReady,
}

/// What a tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second elapsed, still running
    Counted(u32),
    /// The run reached zero on this tick
    Completed,
    /// Stale tick from a cancelled source, or timer not running
    Ignored,
}

struct ActiveSource {
    id: SourceId,
    source: Box<dyn TickSource>,
}

/// Owns the countdown and its single tick source
pub struct TimerController {
    state: TimerState,
    scheduler: Arc<dyn TickScheduler>,
    display: Arc<dyn DisplaySink>,
    notifiers: Vec<Arc<dyn CompletionNotifier>>,
    active: Option<ActiveSource>,
    next_source: u64,
}

impl TimerController {
    pub fn new(
        initial: TimerState,
        scheduler: Arc<dyn TickScheduler>,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        let controller = Self {
            state: initial,
            scheduler,
            display,
            notifiers: Vec::new(),
            active: None,
            next_source: 0,
        };
        controller.render();
        controller
    }

    /// Register an extra end-of-round notifier
    pub fn with_notifier(mut self, notifier: Arc<dyn CompletionNotifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Id of the live tick source, if the timer is running
    pub fn active_source(&self) -> Option<SourceId> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Configure a new round length; resets to idle from any phase
    pub fn set(&mut self, minutes: i64, seconds: i64) -> Result<TimerState, TimerError> {
        if !(0..=MAX_MINUTES).contains(&minutes) || !(0..=MAX_SECONDS).contains(&seconds) {
            warn!(minutes, seconds, "Rejected out-of-range timer value");
            return Err(TimerError::InvalidInput { minutes, seconds });
        }

        self.cancel_source();
        // Bounded above by 60:59, fits u32
        let total = (minutes * 60 + seconds) as u32;
        self.state = TimerState::new(total);
        info!(seconds = total, "Timer set to {}", self.state.display());
        self.render();
        Ok(self.state)
    }

    /// Start a fresh run or resume a paused one
    pub fn start(&mut self) -> Result<TimerState, TimerError> {
        match self.state.phase {
            TimerPhase::Idle | TimerPhase::Stopped => {
                if self.state.remaining_seconds == 0 {
                    return Err(TimerError::NotReady);
                }
                info!(remaining = self.state.remaining_seconds, "Starting timer");
            }
            TimerPhase::Paused => {
                info!(remaining = self.state.remaining_seconds, "Resuming timer");
            }
            TimerPhase::Running | TimerPhase::Completed => {
                debug!(phase = self.state.phase.as_str(), "Start ignored");
                return Ok(self.state);
            }
        }

        self.state.phase = TimerPhase::Running;
        self.begin_source();
        self.render();
        Ok(self.state)
    }

    pub fn pause(&mut self) -> TimerState {
        if self.state.phase != TimerPhase::Running {
            debug!(phase = self.state.phase.as_str(), "Pause ignored");
            return self.state;
        }

        self.cancel_source();
        self.state.phase = TimerPhase::Paused;
        info!(remaining = self.state.remaining_seconds, "Timer paused");
        self.render();
        self.state
    }

    /// Abort the run and restore the configured time
    pub fn stop(&mut self) -> TimerState {
        match self.state.phase {
            TimerPhase::Running | TimerPhase::Paused | TimerPhase::Completed => {}
            TimerPhase::Idle | TimerPhase::Stopped => {
                debug!(phase = self.state.phase.as_str(), "Stop ignored");
                return self.state;
            }
        }

        self.cancel_source();
        self.state.phase = TimerPhase::Stopped;
        self.state.remaining_seconds = self.state.configured_seconds;
        info!("Timer stopped, restored {}", self.state.display());
        self.render();
        self.state
    }

    /// Apply one elapsed second delivered by `source`
    pub fn tick(&mut self, source: SourceId) -> TickOutcome {
        if self.state.phase != TimerPhase::Running || self.active_source() != Some(source) {
            debug!(%source, "Dropping stale tick");
            return TickOutcome::Ignored;
        }

        if self.state.remaining_seconds > 1 {
            self.state.remaining_seconds -= 1;
            self.render();
            return TickOutcome::Counted(self.state.remaining_seconds);
        }

        self.cancel_source();
        self.state.remaining_seconds = 0;
        self.state.phase = TimerPhase::Completed;
        info!("Time's up");
        self.render();
        self.notify_completed();
        TickOutcome::Completed
    }

    fn begin_source(&mut self) {
        self.cancel_source();
        self.next_source += 1;
        let id = SourceId(self.next_source);
        let source = self.scheduler.schedule(id);
        debug!(%id, "Tick source started");
        self.active = Some(ActiveSource { id, source });
    }

    fn cancel_source(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.source.cancel();
            debug!(id = %active.id, "Tick source cancelled");
        }
    }

    fn render(&self) {
        self.display.render(&self.state.view());
    }

    fn notify_completed(&self) {
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify_completed(&self.state) {
                warn!(notifier = notifier.name(), "Completion notifier failed: {}", e);
            }
        }
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        self.cancel_source();
    }
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("state", &self.state)
            .field("active_source", &self.active_source())
            .field("notifiers", &self.notifiers.len())
            .finish()
    }
}
