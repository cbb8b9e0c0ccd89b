//! Collaborator implementations wired into the timer
//!
//! This module contains the production display sink and the completion
//! notifiers that signal the end of a round.

pub mod notifiers;

// Re-export main types
pub use notifiers::{EventNotifier, SoundCommandNotifier, TimerEvent, WatchDisplay};
