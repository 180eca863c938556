//! Pomodoro Timer - a focus/break countdown with end-of-phase notifications
//!
//! This library provides the timer controller, the background task that
//! drives it once per second, and a small HTTP surface for controlling it.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
pub use timer::TimerController;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
