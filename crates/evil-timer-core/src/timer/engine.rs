//! Stopwatch engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or read the system clock - the caller feeds it wall-clock deltas
//! through `on_tick()` at a fixed cadence (nominally every 10ms).
//!
//! ## State Transitions
//!
//! ```text
//! Stopped <-> Running        (start / stop / toggle)
//! Stopped -> Stopped         (reset)
//! Running -> Running         (reset)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut stopwatch = Stopwatch::new(StopwatchSettings::default());
//! stopwatch.start();
//! // In a loop:
//! for event in stopwatch.on_tick(0.01) { /* render or log */ }
//! ```

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::feedback::{FeedbackScheduler, FeedbackState};
use super::format::Digits;
use super::mode::{Mode, PhrasePicker, RngPicker};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Tunables for a stopwatch instance, usually built from `Config`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopwatchSettings {
    /// Nominal wall-clock seconds between ticks.
    pub tick_interval_secs: f64,
    /// Minimum effective time between feedback triggers.
    pub cooldown_secs: f64,
    /// Wall-clock seconds feedback stays on screen.
    pub display_secs: f64,
    /// Mode selected at startup.
    pub mode: Mode,
}

impl Default for StopwatchSettings {
    fn default() -> Self {
        Self {
            tick_interval_secs: 0.01,
            cooldown_secs: 5.0,
            display_secs: 3.0,
            mode: Mode::default(),
        }
    }
}

/// Owned stopwatch state: duration, run state, mode and feedback.
pub struct Stopwatch {
    settings: StopwatchSettings,
    state: RunState,
    mode: Mode,
    /// Effective (mode-scaled) seconds.
    duration: f64,
    /// Real seconds seen through ticks since creation.
    wall_clock: f64,
    feedback: FeedbackScheduler,
    picker: Box<dyn PhrasePicker>,
    torn_down: bool,
}

impl Stopwatch {
    /// Create a stopped stopwatch with an entropy-seeded phrase picker.
    pub fn new(settings: StopwatchSettings) -> Self {
        Self::with_picker(settings, Box::new(RngPicker::from_entropy()))
    }

    pub fn with_picker(settings: StopwatchSettings, picker: Box<dyn PhrasePicker>) -> Self {
        Self {
            settings,
            state: RunState::Stopped,
            mode: settings.mode,
            duration: 0.0,
            wall_clock: 0.0,
            feedback: FeedbackScheduler::new(settings.display_secs),
            picker,
            torn_down: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn wall_clock(&self) -> f64 {
        self.wall_clock
    }

    pub fn settings(&self) -> &StopwatchSettings {
        &self.settings
    }

    pub fn display_digits(&self) -> Digits {
        Digits::from_secs(self.duration)
    }

    pub fn feedback_text(&self) -> &str {
        self.feedback.current_text()
    }

    pub fn feedback_state(&self) -> &FeedbackState {
        self.feedback.state()
    }

    pub fn pending_clears(&self) -> usize {
        self.feedback.pending()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let digits = self.display_digits();
        Event::StateSnapshot {
            state: self.state,
            mode: self.mode,
            duration_secs: self.duration,
            digits,
            display: digits.to_string(),
            feedback: self.feedback.current_text().to_string(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state == RunState::Running {
            return None;
        }
        self.state = RunState::Running;
        tracing::info!(mode = %self.mode, duration = self.duration, "stopwatch started");
        Some(Event::StopwatchStarted {
            mode: self.mode,
            duration_secs: self.duration,
            at: Utc::now(),
        })
    }

    pub fn stop(&mut self) -> Option<Event> {
        if self.state == RunState::Stopped {
            return None;
        }
        self.state = RunState::Stopped;
        tracing::info!(duration = self.duration, "stopwatch stopped");
        Some(Event::StopwatchStopped {
            duration_secs: self.duration,
            at: Utc::now(),
        })
    }

    /// The start/stop button.
    pub fn toggle(&mut self) -> Event {
        let event = match self.state {
            RunState::Stopped => self.start(),
            RunState::Running => self.stop(),
        };
        event.unwrap_or_else(|| self.snapshot())
    }

    /// Zero the duration without touching the run state or feedback cooldown.
    pub fn reset(&mut self) -> Event {
        self.duration = 0.0;
        tracing::info!(state = ?self.state, "stopwatch reset");
        Event::StopwatchReset {
            state: self.state,
            at: Utc::now(),
        }
    }

    pub fn set_mode(&mut self, mode: Mode) -> Option<Event> {
        if mode == self.mode {
            return None;
        }
        let from = self.mode;
        self.mode = mode;
        tracing::info!(%from, to = %mode, "mode changed");
        Some(Event::ModeChanged {
            from,
            to: mode,
            at: Utc::now(),
        })
    }

    /// Advance by `delta` wall-clock seconds.
    ///
    /// Due feedback clears fire whether or not the stopwatch is running;
    /// duration and feedback triggers only advance while running.
    pub fn on_tick(&mut self, delta: f64) -> Vec<Event> {
        if self.torn_down || !delta.is_finite() || delta <= 0.0 {
            return Vec::new();
        }

        self.wall_clock += delta;
        let mut events: Vec<Event> = self
            .feedback
            .poll(self.wall_clock)
            .into_iter()
            .map(|fired| Event::FeedbackCleared {
                trigger_duration_secs: fired.trigger_duration,
                blanked: fired.blanked,
                at: Utc::now(),
            })
            .collect();

        if self.state == RunState::Running {
            self.duration += delta * self.mode.multiplier();

            if self
                .feedback
                .should_trigger(self.duration, self.settings.cooldown_secs)
            {
                self.feedback.trigger(
                    self.mode,
                    self.picker.as_mut(),
                    self.duration,
                    self.wall_clock,
                );
                events.push(Event::FeedbackShown {
                    mode: self.mode,
                    text: self.feedback.current_text().to_string(),
                    duration_secs: self.duration,
                    at: Utc::now(),
                });
            }
        }

        events
    }

    /// Abandon pending clears and ignore all later ticks.
    ///
    /// Returns the number of clears that were abandoned.
    pub fn teardown(&mut self) -> usize {
        self.torn_down = true;
        let cancelled = self.feedback.cancel_all();
        tracing::debug!(cancelled, "stopwatch torn down");
        cancelled
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new(StopwatchSettings::default())
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("duration", &self.duration)
            .field("wall_clock", &self.wall_clock)
            .field("feedback", &self.feedback)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::mode::BLANK_FEEDBACK;

    struct First;

    impl PhrasePicker for First {
        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn stopwatch(mode: Mode) -> Stopwatch {
        Stopwatch::with_picker(
            StopwatchSettings {
                mode,
                ..StopwatchSettings::default()
            },
            Box::new(First),
        )
    }

    fn run_ticks(sw: &mut Stopwatch, n: usize) -> Vec<Event> {
        (0..n).flat_map(|_| sw.on_tick(0.01)).collect()
    }

    #[test]
    fn start_stop_toggle() {
        let mut sw = stopwatch(Mode::Normal);
        assert_eq!(sw.state(), RunState::Stopped);

        assert!(sw.start().is_some());
        assert!(sw.start().is_none());
        assert!(sw.is_running());

        assert!(sw.stop().is_some());
        assert!(sw.stop().is_none());

        assert!(matches!(sw.toggle(), Event::StopwatchStarted { .. }));
        assert!(matches!(sw.toggle(), Event::StopwatchStopped { .. }));
        assert_eq!(sw.state(), RunState::Stopped);
    }

    #[test]
    fn ten_ticks_make_a_tenth() {
        let mut sw = stopwatch(Mode::Normal);
        sw.start();
        run_ticks(&mut sw, 10);
        assert!((sw.duration() - 0.10).abs() < 1e-9);
    }

    #[test]
    fn evil_mode_runs_slow() {
        let mut sw = stopwatch(Mode::Evil);
        sw.start();
        run_ticks(&mut sw, 700);
        assert!((sw.duration() - 6.0).abs() < 1e-6);
        assert!((sw.wall_clock() - 7.0).abs() < 1e-6);
    }

    #[test]
    fn stopped_stopwatch_is_frozen() {
        let mut sw = stopwatch(Mode::Normal);
        sw.start();
        run_ticks(&mut sw, 50);
        sw.stop();
        let frozen = sw.duration();
        run_ticks(&mut sw, 50);
        assert_eq!(sw.duration(), frozen);
    }

    #[test]
    fn reset_keeps_running() {
        let mut sw = stopwatch(Mode::Normal);
        sw.start();
        run_ticks(&mut sw, 100);
        let event = sw.reset();
        assert!(matches!(
            event,
            Event::StopwatchReset {
                state: RunState::Running,
                ..
            }
        ));
        assert_eq!(sw.duration(), 0.0);
        assert!(sw.is_running());
        sw.on_tick(0.01);
        assert!(sw.duration() > 0.0);
    }

    #[test]
    fn reset_while_stopped_stays_stopped() {
        let mut sw = stopwatch(Mode::Normal);
        sw.start();
        run_ticks(&mut sw, 10);
        sw.stop();
        sw.reset();
        assert_eq!(sw.duration(), 0.0);
        assert_eq!(sw.state(), RunState::Stopped);
    }

    #[test]
    fn coach_feedback_fires_after_cooldown_and_clears() {
        let mut sw = stopwatch(Mode::Coach);
        sw.start();

        let events = run_ticks(&mut sw, 500);
        assert!(events.is_empty());
        assert_eq!(sw.feedback_text(), BLANK_FEEDBACK);

        let events = run_ticks(&mut sw, 2);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], Event::FeedbackShown { text, .. } if text == "You got this!"));
        assert_eq!(sw.feedback_text(), "You got this!");

        // Still visible just before the three second window closes.
        run_ticks(&mut sw, 295);
        assert_eq!(sw.feedback_text(), "You got this!");

        let events = run_ticks(&mut sw, 10);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::FeedbackCleared { blanked: true, .. })));
        assert_eq!(sw.feedback_text(), BLANK_FEEDBACK);
    }

    #[test]
    fn feedback_clears_while_stopped() {
        let mut sw = stopwatch(Mode::Coach);
        sw.start();
        run_ticks(&mut sw, 510);
        assert_ne!(sw.feedback_text(), BLANK_FEEDBACK);
        sw.stop();
        run_ticks(&mut sw, 310);
        assert_eq!(sw.feedback_text(), BLANK_FEEDBACK);
    }

    #[test]
    fn one_trigger_per_cooldown_window() {
        let mut sw = stopwatch(Mode::Coach);
        sw.start();
        let shown = run_ticks(&mut sw, 2_050)
            .iter()
            .filter(|e| matches!(e, Event::FeedbackShown { .. }))
            .count();
        // ~5.01, ~10.02, ~15.03, ~20.04
        assert_eq!(shown, 4);
    }

    #[test]
    fn short_cooldown_still_spaces_triggers() {
        let mut config = crate::storage::Config::default();
        config.set("feedback.display_secs", "0.5").unwrap();
        config.set("feedback.cooldown_secs", "1.0").unwrap();
        let settings = StopwatchSettings {
            mode: Mode::Coach,
            ..config.stopwatch_settings()
        };
        let mut sw = Stopwatch::with_picker(settings, Box::new(First));
        sw.start();

        let shown: Vec<f64> = run_ticks(&mut sw, 1_000)
            .iter()
            .filter_map(|e| match e {
                Event::FeedbackShown { duration_secs, .. } => Some(*duration_secs),
                _ => None,
            })
            .collect();
        assert!(shown.len() >= 8, "{shown:?}");
        for pair in shown.windows(2) {
            assert!(pair[1] - pair[0] > 1.0, "{shown:?}");
        }
    }

    #[test]
    fn evil_feedback_is_blank_but_still_scheduled() {
        let mut sw = stopwatch(Mode::Evil);
        sw.start();
        let events = run_ticks(&mut sw, 600);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Event::FeedbackShown { .. }))
                .count(),
            1
        );
        assert_eq!(sw.feedback_text(), BLANK_FEEDBACK);
        assert_eq!(sw.pending_clears(), 1);
    }

    #[test]
    fn set_mode_reports_changes_only() {
        let mut sw = stopwatch(Mode::Evil);
        assert!(sw.set_mode(Mode::Evil).is_none());
        let event = sw.set_mode(Mode::Coach).unwrap();
        assert!(matches!(
            event,
            Event::ModeChanged {
                from: Mode::Evil,
                to: Mode::Coach,
                ..
            }
        ));
        assert_eq!(sw.mode(), Mode::Coach);
    }

    #[test]
    fn bad_deltas_are_ignored() {
        let mut sw = stopwatch(Mode::Normal);
        sw.start();
        assert!(sw.on_tick(f64::NAN).is_empty());
        assert!(sw.on_tick(-0.01).is_empty());
        assert!(sw.on_tick(0.0).is_empty());
        assert_eq!(sw.duration(), 0.0);
        assert_eq!(sw.wall_clock(), 0.0);
    }

    #[test]
    fn teardown_abandons_pending_clear() {
        let mut sw = stopwatch(Mode::Coach);
        sw.start();
        run_ticks(&mut sw, 510);
        assert_eq!(sw.pending_clears(), 1);

        assert_eq!(sw.teardown(), 1);
        assert!(sw.is_torn_down());
        assert!(run_ticks(&mut sw, 400).is_empty());
        assert_eq!(sw.feedback_text(), "You got this!");
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut sw = stopwatch(Mode::Normal);
        sw.start();
        run_ticks(&mut sw, 123);
        match sw.snapshot() {
            Event::StateSnapshot {
                state,
                mode,
                display,
                feedback,
                ..
            } => {
                assert_eq!(state, RunState::Running);
                assert_eq!(mode, Mode::Normal);
                assert_eq!(display, "00:01.23");
                assert_eq!(feedback, BLANK_FEEDBACK);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
