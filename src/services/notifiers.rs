//! Production display sink and completion notifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::{
    process::Command,
    sync::{broadcast, watch},
};
use tracing::{debug, info, warn};

use crate::{
    state::{TimerState, TimerView},
    timer::{CompletionNotifier, DisplaySink, NotifyError},
};

/// Publishes each rendered view into a watch channel (latest value wins)
#[derive(Debug, Clone)]
pub struct WatchDisplay {
    tx: watch::Sender<TimerView>,
}

impl WatchDisplay {
    pub fn new(tx: watch::Sender<TimerView>) -> Self {
        Self { tx }
    }
}

impl DisplaySink for WatchDisplay {
    fn render(&self, view: &TimerView) {
        // send_replace keeps the value even with no subscriber attached
        self.tx.send_replace(view.clone());
    }
}

/// Events pushed to connected browsers besides plain view updates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TimerEvent {
    /// The countdown reached zero: play the bell and raise the alert
    #[serde(rename_all = "camelCase")]
    Completed {
        configured_seconds: u32,
        at: DateTime<Utc>,
    },
}

/// Broadcasts the end-of-round event to SSE subscribers
#[derive(Debug, Clone)]
pub struct EventNotifier {
    tx: broadcast::Sender<TimerEvent>,
}

impl EventNotifier {
    pub fn new(tx: broadcast::Sender<TimerEvent>) -> Self {
        Self { tx }
    }
}

impl CompletionNotifier for EventNotifier {
    fn name(&self) -> &'static str {
        "browser-events"
    }

    fn notify_completed(&self, state: &TimerState) -> Result<(), NotifyError> {
        let event = TimerEvent::Completed {
            configured_seconds: state.configured_seconds,
            at: Utc::now(),
        };
        let receivers = self
            .tx
            .send(event)
            .map_err(|_| NotifyError::NoListeners)?;
        debug!(receivers, "Completion event broadcast");
        Ok(())
    }
}

/// Plays the bell by running a shell command on the server host
#[derive(Debug, Clone)]
pub struct SoundCommandNotifier {
    command: String,
}

impl SoundCommandNotifier {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl CompletionNotifier for SoundCommandNotifier {
    fn name(&self) -> &'static str {
        "sound-command"
    }

    fn notify_completed(&self, _state: &TimerState) -> Result<(), NotifyError> {
        debug!("Running sound command: {}", self.command);

        let mut child = Command::new("sh")
            .args(["-c", &self.command])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(false)
            .spawn()
            .map_err(|source| NotifyError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        // Reap the child off the timer path
        let command = self.command.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => info!("Sound command finished"),
                Ok(status) => warn!(
                    "Sound command `{}` exited with code {}",
                    command,
                    status.code().unwrap_or(-1)
                ),
                Err(e) => warn!("Failed to wait for sound command `{}`: {}", command, e),
            }
        });

        Ok(())
    }
}
