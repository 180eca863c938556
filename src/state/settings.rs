//! Focus/break duration settings

use serde::{Deserialize, Serialize};

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

const MAX_FOCUS_MINUTES: u32 = 59;
const MAX_BREAK_MINUTES: u32 = 29;
const MAX_SECONDS: u32 = 59;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        max: u32,
        value: u32,
    },
}

#[derive(Deserialize)]
struct RawSettings {
    focus_minutes: u32,
    #[serde(default)]
    focus_seconds: u32,
    break_minutes: u32,
    #[serde(default)]
    break_seconds: u32,
}

/// Validated phase lengths.
///
/// Invariant: every field is inside the range the picker offers
/// (focus minutes 0-59, break minutes 0-29, seconds 0-59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct Settings {
    focus_minutes: u32,
    focus_seconds: u32,
    break_minutes: u32,
    break_seconds: u32,
}

impl TryFrom<RawSettings> for Settings {
    type Error = SettingsError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        Self::new(
            raw.focus_minutes,
            raw.focus_seconds,
            raw.break_minutes,
            raw.break_seconds,
        )
    }
}

fn check(field: &'static str, value: u32, max: u32) -> Result<u32, SettingsError> {
    if value > max {
        return Err(SettingsError::OutOfRange { field, max, value });
    }
    Ok(value)
}

impl Settings {
    pub fn new(
        focus_minutes: u32,
        focus_seconds: u32,
        break_minutes: u32,
        break_seconds: u32,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            focus_minutes: check("focus_minutes", focus_minutes, MAX_FOCUS_MINUTES)?,
            focus_seconds: check("focus_seconds", focus_seconds, MAX_SECONDS)?,
            break_minutes: check("break_minutes", break_minutes, MAX_BREAK_MINUTES)?,
            break_seconds: check("break_seconds", break_seconds, MAX_SECONDS)?,
        })
    }

    #[must_use]
    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    #[must_use]
    pub fn focus_seconds(&self) -> u32 {
        self.focus_seconds
    }

    #[must_use]
    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    #[must_use]
    pub fn break_seconds(&self) -> u32 {
        self.break_seconds
    }

    /// Total length of the focus phase in seconds
    #[must_use]
    pub fn focus_duration_seconds(&self) -> u32 {
        self.focus_minutes * 60 + self.focus_seconds
    }

    /// Total length of the break phase in seconds
    #[must_use]
    pub fn break_duration_seconds(&self) -> u32 {
        self.break_minutes * 60 + self.break_seconds
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            focus_seconds: 0,
            break_minutes: DEFAULT_BREAK_MINUTES,
            break_seconds: 0,
        }
    }
}
