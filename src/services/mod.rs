//! External collaborators of the timer
//!
//! This module contains the notification and progress output ports and their
//! implementations.

pub mod notifier;
pub mod progress;

// Re-export main types
pub use notifier::{DesktopNotifier, LogNotifier, Notifier};
pub use progress::{render_bar, ProgressRenderer, TracingProgressRenderer};
