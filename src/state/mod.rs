//! State management module
//!
//! This module contains the timer record, the user settings and the shared
//! host state handed to HTTP handlers.

pub mod app_state;
pub mod settings;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerCommand, TimerReply, TimerRequest};
pub use settings::{Settings, SettingsError};
pub use timer_state::{format_clock, Completion, Phase, TimerSnapshot, TimerState};
