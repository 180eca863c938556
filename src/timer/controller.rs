//! Pomodoro countdown state machine
//!
//! The controller owns the timer record and decides what happens on every
//! user action and tick. It performs no I/O of its own: alerts go through the
//! [`Notifier`] port, progress through the [`ProgressRenderer`] port, and the
//! caller reads [`TimerController::driver`] to learn which time source should
//! be armed.

use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

use crate::{
    services::{Notifier, ProgressRenderer},
    state::{format_clock, Completion, Phase, Settings, TimerSnapshot, TimerState},
};

pub const DEFAULT_BREAK_DELAY: Duration = Duration::from_secs(5);

pub const FOCUS_DONE_MESSAGE: &str = "Pomodoro Done! Time for a break.";
pub const BREAK_DONE_MESSAGE: &str = "Break finished! Ready for another Pomodoro.";

/// Time source the controller currently needs.
///
/// The epoch changes every time a new source is requested, so a host can tell
/// a fresh start apart from the source it already armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Stopped,
    /// One tick per second
    Ticking { epoch: u64 },
    /// One-shot wait before the break phase starts
    BreakDelay { epoch: u64 },
}

pub struct TimerController {
    state: TimerState,
    settings: Settings,
    break_delay: Duration,
    driver: Driver,
    epoch: u64,
    notifier: Arc<dyn Notifier>,
    renderer: Arc<dyn ProgressRenderer>,
}

impl TimerController {
    pub fn new(
        settings: Settings,
        break_delay: Duration,
        notifier: Arc<dyn Notifier>,
        renderer: Arc<dyn ProgressRenderer>,
    ) -> Self {
        Self {
            state: TimerState::new(),
            settings,
            break_delay,
            driver: Driver::Stopped,
            epoch: 0,
            notifier,
            renderer,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    pub fn break_delay(&self) -> Duration {
        self.break_delay
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::new(&self.state, self.settings)
    }

    /// Replace the phase lengths; they apply from the next phase start
    pub fn update_settings(&mut self, settings: Settings) {
        info!(
            "Settings updated: focus={}s, break={}s",
            settings.focus_duration_seconds(),
            settings.break_duration_seconds()
        );
        self.settings = settings;
    }

    /// Begin a focus phase. Ignored while a session is already running.
    ///
    /// Returns whether a new focus phase was started.
    pub fn start_focus(&mut self) -> bool {
        if self.state.is_running {
            debug!("Focus requested while running, ignoring");
            return false;
        }

        self.state.is_running = true;
        self.state.is_paused = false;
        self.state.phase = Phase::Focus;
        let duration = self.settings.focus_duration_seconds();
        info!("Starting focus phase: {}", format_clock(duration));
        self.begin_countdown(duration, Completion::FocusComplete);
        true
    }

    /// Begin a break phase
    pub fn start_break(&mut self) {
        self.state.is_running = true;
        self.state.is_paused = false;
        self.state.phase = Phase::Break;
        let duration = self.settings.break_duration_seconds();
        info!("Starting break phase: {}", format_clock(duration));
        self.begin_countdown(duration, Completion::BreakComplete);
    }

    /// Advance the countdown by one second.
    ///
    /// Does nothing unless a countdown is running and not paused.
    pub fn tick(&mut self) {
        if !self.state.is_counting() {
            return;
        }

        self.state.time_left = self.state.time_left.saturating_sub(1);
        self.state.display = format_clock(self.state.time_left);
        self.render(self.state.elapsed_fraction());
        debug!("Tick: {} left", self.state.display);

        if self.state.time_left == 0 {
            self.driver = Driver::Stopped;
            if let Some(completion) = self.state.pending_completion.take() {
                self.complete(completion);
            }
        }
    }

    /// Pause a running countdown, or resume a paused one.
    ///
    /// Returns false when there was nothing to pause or resume.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }
        if self.state.phase == Phase::BreakPending {
            debug!("Pause requested during break delay, ignoring");
            return false;
        }

        if self.state.is_paused {
            self.state.is_paused = false;
            info!("Resuming {} with {} left", self.state.phase.as_str(), self.state.display);
            self.render(self.state.elapsed_fraction());
            self.arm_ticker();
        } else {
            self.state.is_paused = true;
            self.driver = Driver::Stopped;
            info!("Paused {} with {} left", self.state.phase.as_str(), self.state.display);
        }
        true
    }

    /// Stop everything and return to idle
    pub fn reset(&mut self) {
        info!("Resetting timer");
        self.driver = Driver::Stopped;
        self.state = TimerState::new();
        self.render(0.0);
    }

    fn begin_countdown(&mut self, duration: u32, completion: Completion) {
        self.state.timer_duration = duration;
        self.state.time_left = duration;
        self.state.pending_completion = Some(completion);
        self.state.display = format_clock(duration);
        self.render(0.0);
        self.arm_ticker();
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::FocusComplete => {
                info!("Focus phase complete");
                self.notifier.notify(FOCUS_DONE_MESSAGE);
                self.state.phase = Phase::BreakPending;
                self.epoch += 1;
                self.driver = Driver::BreakDelay { epoch: self.epoch };
            }
            Completion::BreakComplete => {
                info!("Break phase complete");
                self.notifier.notify(BREAK_DONE_MESSAGE);
                self.reset();
            }
        }
    }

    fn arm_ticker(&mut self) {
        self.epoch += 1;
        self.driver = Driver::Ticking { epoch: self.epoch };
    }

    fn render(&mut self, fraction: f64) {
        self.state.progress = fraction;
        self.renderer.set_progress(fraction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        fractions: Mutex<Vec<f64>>,
    }

    impl ProgressRenderer for RecordingRenderer {
        fn set_progress(&self, fraction: f64) {
            self.fractions.lock().unwrap().push(fraction);
        }
    }

    impl RecordingRenderer {
        fn fractions(&self) -> Vec<f64> {
            self.fractions.lock().unwrap().clone()
        }
    }

    struct Harness {
        timer: TimerController,
        notifier: Arc<RecordingNotifier>,
        renderer: Arc<RecordingRenderer>,
    }

    fn harness(focus_seconds: u32, break_seconds: u32) -> Harness {
        let notifier = Arc::new(RecordingNotifier::default());
        let renderer = Arc::new(RecordingRenderer::default());
        let settings = Settings::new(
            focus_seconds / 60,
            focus_seconds % 60,
            break_seconds / 60,
            break_seconds % 60,
        )
        .unwrap();
        let timer = TimerController::new(
            settings,
            DEFAULT_BREAK_DELAY,
            notifier.clone(),
            renderer.clone(),
        );
        Harness {
            timer,
            notifier,
            renderer,
        }
    }

    fn assert_idle(timer: &TimerController) {
        let state = timer.state();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.time_left, 0);
        assert!(!state.is_running);
        assert!(!state.is_paused);
        assert_eq!(state.progress, 0.0);
        assert!(state.display.is_empty());
        assert_eq!(timer.driver(), Driver::Stopped);
    }

    #[test]
    fn focus_of_three_seconds_reports_thirds_then_schedules_break() {
        let mut h = harness(3, 60);
        assert!(h.timer.start_focus());
        assert_eq!(h.timer.state().display, "00:03");
        assert!(matches!(h.timer.driver(), Driver::Ticking { .. }));

        h.timer.tick();
        h.timer.tick();
        assert!(h.notifier.messages().is_empty());
        h.timer.tick();

        assert_eq!(h.renderer.fractions(), vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
        assert_eq!(h.notifier.messages(), vec![FOCUS_DONE_MESSAGE]);
        assert_eq!(h.timer.state().phase, Phase::BreakPending);
        assert_eq!(h.timer.state().time_left, 0);
        assert!(h.timer.state().is_running);
        assert!(matches!(h.timer.driver(), Driver::BreakDelay { .. }));
    }

    #[test]
    fn completion_fires_exactly_once_after_duration_ticks() {
        for duration in [1, 2, 7, 61] {
            let mut h = harness(duration, 60);
            h.timer.start_focus();
            for _ in 0..duration {
                h.timer.tick();
            }
            assert_eq!(h.timer.state().time_left, 0);
            // Extra ticks after expiry are ignored
            h.timer.tick();
            h.timer.tick();
            assert_eq!(h.notifier.messages().len(), 1, "duration {}", duration);
        }
    }

    #[test]
    fn break_expiry_notifies_and_returns_to_idle() {
        let mut h = harness(1, 2);
        h.timer.start_focus();
        h.timer.tick();
        h.timer.start_break();
        assert_eq!(h.timer.state().phase, Phase::Break);
        assert_eq!(h.timer.state().display, "00:02");

        h.timer.tick();
        h.timer.tick();

        assert_eq!(
            h.notifier.messages(),
            vec![FOCUS_DONE_MESSAGE, BREAK_DONE_MESSAGE]
        );
        assert_idle(&h.timer);
    }

    #[test]
    fn pause_freezes_time_and_resume_keeps_it() {
        let mut h = harness(15, 60);
        h.timer.start_focus();
        for _ in 0..5 {
            h.timer.tick();
        }
        assert_eq!(h.timer.state().time_left, 10);

        h.timer.toggle_pause();
        assert!(h.timer.state().is_paused);
        assert_eq!(h.timer.driver(), Driver::Stopped);
        for _ in 0..100 {
            h.timer.tick();
        }
        assert_eq!(h.timer.state().time_left, 10);

        h.timer.toggle_pause();
        assert!(!h.timer.state().is_paused);
        assert_eq!(h.timer.state().time_left, 10);
        assert!(matches!(h.timer.driver(), Driver::Ticking { .. }));

        h.timer.tick();
        assert_eq!(h.timer.state().time_left, 9);
    }

    #[test]
    fn resume_arms_a_new_ticker_and_keeps_progress() {
        let mut h = harness(4, 60);
        h.timer.start_focus();
        let first = h.timer.driver();
        h.timer.tick();
        h.timer.toggle_pause();
        h.timer.toggle_pause();

        assert_ne!(h.timer.driver(), first);
        assert_eq!(h.timer.state().progress, 0.25);
        assert_eq!(h.renderer.fractions().last(), Some(&0.25));
    }

    #[test]
    fn toggle_pause_is_ignored_when_idle() {
        let mut h = harness(10, 60);
        assert!(!h.timer.toggle_pause());
        assert_idle(&h.timer);
    }

    #[test]
    fn toggle_pause_is_ignored_during_break_delay() {
        let mut h = harness(1, 60);
        h.timer.start_focus();
        h.timer.tick();
        let driver = h.timer.driver();
        assert!(!h.timer.toggle_pause());
        assert!(!h.timer.state().is_paused);
        assert_eq!(h.timer.driver(), driver);
    }

    #[test]
    fn start_focus_while_running_has_no_effect() {
        let mut h = harness(10, 60);
        h.timer.start_focus();
        h.timer.tick();
        let before = h.timer.state().clone();
        let driver = h.timer.driver();

        assert!(!h.timer.start_focus());

        assert_eq!(h.timer.state(), &before);
        assert_eq!(h.timer.driver(), driver);
    }

    #[test]
    fn start_focus_while_paused_has_no_effect() {
        let mut h = harness(10, 60);
        h.timer.start_focus();
        h.timer.tick();
        h.timer.toggle_pause();
        h.timer.start_focus();
        assert!(h.timer.state().is_paused);
        assert_eq!(h.timer.state().time_left, 9);
    }

    #[test]
    fn reset_from_any_state_returns_to_idle() {
        // running
        let mut h = harness(10, 60);
        h.timer.start_focus();
        h.timer.tick();
        h.timer.reset();
        assert_idle(&h.timer);

        // paused
        let mut h = harness(10, 60);
        h.timer.start_focus();
        h.timer.tick();
        h.timer.toggle_pause();
        h.timer.reset();
        assert_idle(&h.timer);

        // waiting for the break
        let mut h = harness(1, 60);
        h.timer.start_focus();
        h.timer.tick();
        h.timer.reset();
        assert_idle(&h.timer);

        // during the break
        let mut h = harness(1, 60);
        h.timer.start_focus();
        h.timer.tick();
        h.timer.start_break();
        h.timer.tick();
        h.timer.reset();
        assert_idle(&h.timer);
        assert_eq!(h.renderer.fractions().last(), Some(&0.0));

        // already idle
        let mut h = harness(10, 60);
        h.timer.reset();
        assert_idle(&h.timer);
    }

    #[test]
    fn settings_apply_from_next_phase() {
        let mut h = harness(10, 60);
        h.timer.start_focus();
        h.timer.update_settings(Settings::new(1, 0, 0, 3).unwrap());
        assert_eq!(h.timer.state().timer_duration, 10);

        for _ in 0..10 {
            h.timer.tick();
        }
        h.timer.start_break();
        assert_eq!(h.timer.state().timer_duration, 3);
    }

    #[test]
    fn zero_length_phase_expires_on_first_tick() {
        let mut h = harness(0, 60);
        h.timer.start_focus();
        assert_eq!(h.timer.state().display, "00:00");
        h.timer.tick();
        assert_eq!(h.renderer.fractions(), vec![0.0, 1.0]);
        assert_eq!(h.notifier.messages(), vec![FOCUS_DONE_MESSAGE]);
    }

    #[test]
    fn time_left_never_exceeds_duration() {
        let mut h = harness(5, 3);
        h.timer.start_focus();
        for _ in 0..5 {
            let state = h.timer.state();
            assert!(state.time_left <= state.timer_duration);
            h.timer.tick();
        }
        h.timer.start_break();
        let state = h.timer.state();
        assert_eq!(state.time_left, state.timer_duration);
    }
}
