//! End-of-phase notifications

use notify_rust::Notification;
use tracing::{debug, info, warn};

pub const NOTIFICATION_TITLE: &str = "Pomodoro Timer";
pub const NOTIFICATION_APP_NAME: &str = "pomodoro";
pub const NOTIFICATION_SOUND: &str = "alarm-clock-elapsed";

/// Produces a user-visible alert for a finished phase.
///
/// Delivery is best effort: implementations log failures and never report
/// them back to the timer.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Desktop notification with an audible cue, sent through notify-rust
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    sound: String,
}

impl DesktopNotifier {
    pub fn with_sound(sound: impl Into<String>) -> Self {
        Self {
            sound: sound.into(),
        }
    }
}

fn deliver(message: &str, sound: &str) {
    let result = Notification::new()
        .appname(NOTIFICATION_APP_NAME)
        .summary(NOTIFICATION_TITLE)
        .body(message)
        .sound_name(sound)
        .show();

    match result {
        Ok(_) => debug!("Notification delivered: {}", message),
        Err(e) => warn!("Notification not delivered ({}), continuing: {}", e, message),
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        info!("Notifying: {}", message);

        let message = message.to_string();
        let sound = self.sound.clone();

        // The notification daemon round-trip blocks, keep it off the timer task
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || deliver(&message, &sound));
            }
            Err(_) => deliver(&message, &sound),
        }
    }
}

/// Notifier that only writes to the log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("{}: {}", NOTIFICATION_TITLE, message);
    }
}
