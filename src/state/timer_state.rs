//! Timer state structure and derived views

use serde::{Deserialize, Serialize};

/// Countdown length a fresh session starts with (5 minutes).
pub const DEFAULT_ROUND_SECONDS: u32 = 300;

/// Phase of the countdown state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Stopped,
    Completed,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Stopped => "stopped",
            TimerPhase::Completed => "completed",
        }
    }
}

/// Countdown state for the single display session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub phase: TimerPhase,
    /// Last duration set by the user, restored on stop
    pub configured_seconds: u32,
}

impl TimerState {
    /// Create an idle timer holding `seconds`
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining_seconds: seconds,
            phase: TimerPhase::Idle,
            configured_seconds: seconds,
        }
    }

    /// Remaining time formatted as zero-padded `mm:ss`
    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    pub fn controls(&self) -> ControlEnablement {
        ControlEnablement::for_phase(self.phase)
    }

    /// Snapshot handed to display sinks
    pub fn view(&self) -> TimerView {
        TimerView {
            remaining_seconds: self.remaining_seconds,
            configured_seconds: self.configured_seconds,
            phase: self.phase,
            display: self.display(),
            controls: self.controls(),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_ROUND_SECONDS)
    }
}

/// Which timer controls the UI should offer in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlEnablement {
    pub set: bool,
    pub start: bool,
    pub pause: bool,
    pub stop: bool,
}

impl ControlEnablement {
    pub fn for_phase(phase: TimerPhase) -> Self {
        let active = matches!(phase, TimerPhase::Running | TimerPhase::Paused);
        Self {
            set: !active,
            start: phase != TimerPhase::Running,
            pause: phase == TimerPhase::Running,
            stop: active,
        }
    }
}

/// Rendered timer state pushed to the display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    pub remaining_seconds: u32,
    pub configured_seconds: u32,
    pub phase: TimerPhase,
    pub display: String,
    pub controls: ControlEnablement,
}

impl Default for TimerView {
    fn default() -> Self {
        TimerState::default().view()
    }
}

/// Format seconds as `mm:ss`
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_clock_with_padding() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(5), "00:05");
        assert_eq!(format_clock(245), "04:05");
        assert_eq!(format_clock(3600), "60:00");
        assert_eq!(format_clock(3599), "59:59");
    }

    #[test]
    fn fresh_state_is_idle_at_five_minutes() {
        let state = TimerState::default();
        assert_eq!(state.phase, TimerPhase::Idle);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(state.configured_seconds, 300);
        assert_eq!(state.display(), "05:00");
    }

    #[test]
    fn controls_follow_phase() {
        let idle = ControlEnablement::for_phase(TimerPhase::Idle);
        assert_eq!(
            idle,
            ControlEnablement { set: true, start: true, pause: false, stop: false }
        );

        let running = ControlEnablement::for_phase(TimerPhase::Running);
        assert_eq!(
            running,
            ControlEnablement { set: false, start: false, pause: true, stop: true }
        );

        let paused = ControlEnablement::for_phase(TimerPhase::Paused);
        assert_eq!(
            paused,
            ControlEnablement { set: false, start: true, pause: false, stop: true }
        );

        for phase in [TimerPhase::Stopped, TimerPhase::Completed] {
            assert_eq!(ControlEnablement::for_phase(phase), idle);
        }
    }

    #[test]
    fn view_serializes_camel_case() {
        let json = serde_json::to_value(TimerState::new(65).view()).unwrap();
        assert_eq!(json["remainingSeconds"], 65);
        assert_eq!(json["configuredSeconds"], 65);
        assert_eq!(json["phase"], "idle");
        assert_eq!(json["display"], "01:05");
        assert_eq!(json["controls"]["start"], true);
    }
}
