//! Collaborators the controller reports to

use thiserror::Error;

use crate::state::{TimerState, TimerView};

/// Receives every rendered timer change
pub trait DisplaySink: Send + Sync {
    fn render(&self, view: &TimerView);
}

/// Raises the end-of-round signal
pub trait CompletionNotifier: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn notify_completed(&self, state: &TimerState) -> Result<(), NotifyError>;
}

/// Failure raised by a completion notifier; logged, never propagated
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no listeners connected")]
    NoListeners,
    #[error("failed to spawn sound command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Other(String),
}
