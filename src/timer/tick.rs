//! Recurring tick sources

use std::fmt;

/// Identifies one tick source; ticks carry the id of the source that fired them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Creates 1-second recurring tick sources for the controller
pub trait TickScheduler: Send + Sync {
    /// Begin delivering ticks tagged with `id` until the returned source is cancelled
    fn schedule(&self, id: SourceId) -> Box<dyn TickSource>;
}

/// Handle to a live tick source.
///
/// `cancel` must be idempotent.
pub trait TickSource: Send {
    fn cancel(&mut self);
}
