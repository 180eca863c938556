//! Timer driver background task

use std::{future::pending, pin::Pin, time::Duration};
use tokio::{
    sync::{mpsc, watch},
    time::{interval_at, sleep, Instant, Interval, MissedTickBehavior, Sleep},
};
use tracing::{debug, info, warn};

use crate::{
    state::{TimerCommand, TimerReply, TimerRequest, TimerSnapshot},
    timer::{Driver, TimerController},
};

const TICK_PERIOD: Duration = Duration::from_secs(1);

enum Event {
    Request(TimerRequest),
    Tick,
    BreakDue,
}

/// Time sources currently armed on behalf of the controller
#[derive(Default)]
struct Sources {
    armed: Option<Driver>,
    ticker: Option<Interval>,
    break_timer: Option<Pin<Box<Sleep>>>,
}

impl Sources {
    /// Bring the armed sources in line with what the controller asks for
    fn sync(&mut self, controller: &TimerController) {
        let wanted = controller.driver();
        if self.armed == Some(wanted) {
            return;
        }

        self.ticker = None;
        self.break_timer = None;

        match wanted {
            Driver::Stopped => debug!("Time sources stopped"),
            Driver::Ticking { epoch } => {
                // First tick one full period out so a resume never loses a second
                let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.ticker = Some(ticker);
                debug!("Ticker armed (epoch {})", epoch);
            }
            Driver::BreakDelay { epoch } => {
                self.break_timer = Some(Box::pin(sleep(controller.break_delay())));
                debug!(
                    "Break scheduled in {}s (epoch {})",
                    controller.break_delay().as_secs(),
                    epoch
                );
            }
        }

        self.armed = Some(wanted);
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => pending().await,
    }
}

async fn break_due(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(timer) => timer.as_mut().await,
        None => pending().await,
    }
}

/// Run a command against the controller, reporting whether it took effect
fn apply(controller: &mut TimerController, command: TimerCommand) -> bool {
    match command {
        TimerCommand::StartFocus => controller.start_focus(),
        TimerCommand::TogglePause => controller.toggle_pause(),
        TimerCommand::Reset => {
            controller.reset();
            true
        }
        TimerCommand::UpdateSettings(settings) => {
            controller.update_settings(settings);
            true
        }
    }
}

/// Background task that owns the timer controller.
///
/// Runs until every command sender has been dropped.
pub async fn timer_driver_task(
    mut controller: TimerController,
    mut commands: mpsc::Receiver<TimerRequest>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
) {
    info!("Starting timer driver task");

    let mut sources = Sources::default();

    loop {
        let event = tokio::select! {
            request = commands.recv() => match request {
                Some(request) => Event::Request(request),
                None => break,
            },
            _ = next_tick(&mut sources.ticker) => Event::Tick,
            _ = break_due(&mut sources.break_timer) => Event::BreakDue,
        };

        let reply = match event {
            Event::Request(TimerRequest { command, reply }) => {
                let applied = apply(&mut controller, command);
                Some((reply, applied))
            }
            Event::Tick => {
                controller.tick();
                None
            }
            Event::BreakDue => {
                sources.break_timer = None;
                controller.start_break();
                None
            }
        };

        sources.sync(&controller);

        let snapshot = controller.snapshot();
        snapshot_tx.send_replace(snapshot.clone());
        if let Some((reply, applied)) = reply {
            if reply.send(TimerReply { applied, snapshot }).is_err() {
                warn!("Command caller went away before the reply was sent");
            }
        }
    }

    info!("Timer driver task stopped");
}
