//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod competition;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppOptions, AppState};
pub use competition::{Competition, CompetitionSelector};
pub use timer_state::{
    format_clock, ControlEnablement, TimerPhase, TimerState, TimerView, DEFAULT_ROUND_SECONDS,
};
