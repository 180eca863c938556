//! Crate error types

use crate::state::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("timer driver is not running")]
    DriverUnavailable,
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),
}
