//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::{
    error::AppError,
    services::notifier::NOTIFICATION_SOUND,
    state::Settings,
    timer::DEFAULT_BREAK_DELAY,
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-timer")]
#[command(about = "A Pomodoro focus/break timer with a local HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "25525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Focus phase minutes
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u32).range(0..=59))]
    pub focus_minutes: u32,

    /// Focus phase seconds
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=59))]
    pub focus_seconds: u32,

    /// Break phase minutes
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(0..=29))]
    pub break_minutes: u32,

    /// Break phase seconds
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=59))]
    pub break_seconds: u32,

    /// Seconds to wait between the end of focus and the start of the break
    #[arg(long, default_value_t = DEFAULT_BREAK_DELAY.as_secs())]
    pub break_delay: u64,

    /// Sound played with desktop notifications
    #[arg(long, default_value = NOTIFICATION_SOUND)]
    pub notification_sound: String,

    /// Log notifications instead of sending desktop notifications
    #[arg(long)]
    pub no_desktop_notifications: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial phase lengths
    pub fn settings(&self) -> Result<Settings, AppError> {
        Ok(Settings::new(
            self.focus_minutes,
            self.focus_seconds,
            self.break_minutes,
            self.break_seconds,
        )?)
    }

    pub fn break_delay(&self) -> Duration {
        Duration::from_secs(self.break_delay)
    }
}
