//! Interval-backed tick sources and the task feeding them to the timer

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{
    state::AppState,
    timer::{SourceId, TickOutcome, TickScheduler, TickSource},
};

/// Tick period of the round clock
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawns one tokio interval task per tick source
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    period: Duration,
    tick_tx: mpsc::UnboundedSender<SourceId>,
}

impl IntervalScheduler {
    /// Create a scheduler and the receiving end for [`tick_driver_task`]
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<SourceId>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        (Self { period, tick_tx }, tick_rx)
    }
}

impl TickScheduler for IntervalScheduler {
    fn schedule(&self, id: SourceId) -> Box<dyn TickSource> {
        let period = self.period;
        let tick_tx = self.tick_tx.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tick_tx.send(id).is_err() {
                    debug!(%id, "Tick receiver closed, ending source");
                    break;
                }
            }
        });

        Box::new(IntervalSource {
            handle: Some(handle),
        })
    }
}

/// Live interval task; aborted on cancel or drop
#[derive(Debug)]
pub struct IntervalSource {
    handle: Option<JoinHandle<()>>,
}

impl TickSource for IntervalSource {
    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for IntervalSource {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Background task applying delivered ticks to the shared timer
pub async fn tick_driver_task(state: Arc<AppState>, mut tick_rx: mpsc::UnboundedReceiver<SourceId>) {
    info!("Starting tick driver task");

    while let Some(source) = tick_rx.recv().await {
        match state.tick(source) {
            Ok(TickOutcome::Completed) => info!("Round complete"),
            Ok(TickOutcome::Counted(remaining)) => debug!(remaining, "Tick"),
            Ok(TickOutcome::Ignored) => {}
            Err(e) => error!("Failed to apply tick: {}", e),
        }
    }

    info!("Tick channel closed, tick driver exiting");
}
