//! Round timer module
//!
//! The countdown state machine and the seams it reports through: tick
//! scheduling, display rendering and completion signalling.

pub mod controller;
pub mod sink;
pub mod tick;

// Re-export main types
pub use controller::{TickOutcome, TimerController, TimerError};
pub use sink::{CompletionNotifier, DisplaySink, NotifyError};
pub use tick::{SourceId, TickScheduler, TickSource};
