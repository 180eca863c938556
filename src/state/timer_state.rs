//! Timer state record and its read-only snapshot

use serde::{Deserialize, Serialize};

use super::Settings;

/// Which part of the Pomodoro cycle the timer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Focus,
    /// Focus has expired; the break starts once the fixed delay elapses
    BreakPending,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Focus => "focus",
            Phase::BreakPending => "break_pending",
            Phase::Break => "break",
        }
    }
}

/// Action to run when the current countdown reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    FocusComplete,
    BreakComplete,
}

/// Mutable countdown record owned by the timer controller
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    pub phase: Phase,
    pub is_running: bool,
    pub is_paused: bool,
    pub time_left: u32,
    pub timer_duration: u32,
    pub pending_completion: Option<Completion>,
    /// `MM:SS` while a phase is counting, empty when idle
    pub display: String,
    /// Last fraction sent to the progress renderer
    pub progress: f64,
}

impl TimerState {
    /// Create an idle timer state
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            is_running: false,
            is_paused: false,
            time_left: 0,
            timer_duration: 0,
            pending_completion: None,
            display: String::new(),
            progress: 0.0,
        }
    }

    /// Fraction of the current phase already elapsed, in [0, 1]
    pub fn elapsed_fraction(&self) -> f64 {
        if self.timer_duration == 0 {
            return 1.0;
        }
        let elapsed = self.timer_duration.saturating_sub(self.time_left);
        f64::from(elapsed) / f64::from(self.timer_duration)
    }

    /// Check whether the countdown is advancing
    pub fn is_counting(&self) -> bool {
        self.is_running && !self.is_paused && self.pending_completion.is_some()
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as zero-padded `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Point-in-time copy of the timer published to observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub is_running: bool,
    pub is_paused: bool,
    pub time_left: u32,
    pub timer_duration: u32,
    pub display: String,
    pub progress: f64,
    pub settings: Settings,
}

impl TimerSnapshot {
    pub fn new(state: &TimerState, settings: Settings) -> Self {
        Self {
            phase: state.phase,
            is_running: state.is_running,
            is_paused: state.is_paused,
            time_left: state.time_left,
            timer_duration: state.timer_duration,
            display: state.display.clone(),
            progress: state.progress,
            settings,
        }
    }
}
