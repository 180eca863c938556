//! Timer controller module
//!
//! This module contains the focus/break countdown logic.

pub mod controller;

pub use controller::{
    Driver, TimerController, BREAK_DONE_MESSAGE, DEFAULT_BREAK_DELAY, FOCUS_DONE_MESSAGE,
};
