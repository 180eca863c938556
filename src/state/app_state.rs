//! Shared state handed to the HTTP layer

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

use super::{Settings, TimerSnapshot};
use crate::error::AppError;

/// User action forwarded to the timer driver
#[derive(Debug, Clone, PartialEq)]
pub enum TimerCommand {
    StartFocus,
    TogglePause,
    Reset,
    UpdateSettings(Settings),
}

impl TimerCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerCommand::StartFocus => "focus",
            TimerCommand::TogglePause => "pause",
            TimerCommand::Reset => "reset",
            TimerCommand::UpdateSettings(_) => "settings",
        }
    }
}

/// Driver answer to a command
#[derive(Debug, Clone, PartialEq)]
pub struct TimerReply {
    /// False when the controller ignored the command (e.g. focus while running)
    pub applied: bool,
    pub snapshot: TimerSnapshot,
}

/// A command plus the channel the driver answers on
#[derive(Debug)]
pub struct TimerRequest {
    pub command: TimerCommand,
    pub reply: oneshot::Sender<TimerReply>,
}

/// Host state: the only way in to the timer is the command channel, the only
/// way out is the snapshot watch
#[derive(Debug)]
pub struct AppState {
    /// Commands for the timer driver task
    pub command_tx: mpsc::Sender<TimerRequest>,
    /// Latest timer snapshot published by the driver
    pub snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        command_tx: mpsc::Sender<TimerRequest>,
        snapshot_rx: watch::Receiver<TimerSnapshot>,
    ) -> Self {
        Self {
            command_tx,
            snapshot_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Send a command to the timer driver and wait for its outcome
    pub async fn dispatch(&self, command: TimerCommand) -> Result<TimerReply, AppError> {
        let action = command.as_str();
        info!("Dispatching timer command: {}", action);

        let (reply, response) = oneshot::channel();
        self.command_tx
            .send(TimerRequest { command, reply })
            .await
            .map_err(|_| AppError::DriverUnavailable)?;
        let outcome = response.await.map_err(|_| AppError::DriverUnavailable)?;

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(outcome)
    }

    pub async fn start_focus(&self) -> Result<TimerReply, AppError> {
        self.dispatch(TimerCommand::StartFocus).await
    }

    pub async fn toggle_pause(&self) -> Result<TimerReply, AppError> {
        self.dispatch(TimerCommand::TogglePause).await
    }

    pub async fn reset(&self) -> Result<TimerReply, AppError> {
        self.dispatch(TimerCommand::Reset).await
    }

    pub async fn update_settings(&self, settings: Settings) -> Result<TimerReply, AppError> {
        self.dispatch(TimerCommand::UpdateSettings(settings)).await
    }

    /// Get the latest published timer snapshot
    pub fn get_snapshot(&self) -> TimerSnapshot {
        if self.snapshot_rx.has_changed().is_err() {
            warn!("Timer driver has stopped, serving last known snapshot");
        }
        self.snapshot_rx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
