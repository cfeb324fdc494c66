use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Digits, Mode, RunState};

/// Every state change in the stopwatch produces an Event.
/// Front-ends render from snapshots and may log the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    StopwatchStarted {
        mode: Mode,
        duration_secs: f64,
        at: DateTime<Utc>,
    },
    StopwatchStopped {
        duration_secs: f64,
        at: DateTime<Utc>,
    },
    /// Duration returned to zero; the run state is untouched.
    StopwatchReset {
        state: RunState,
        at: DateTime<Utc>,
    },
    ModeChanged {
        from: Mode,
        to: Mode,
        at: DateTime<Utc>,
    },
    FeedbackShown {
        mode: Mode,
        text: String,
        duration_secs: f64,
        at: DateTime<Utc>,
    },
    FeedbackCleared {
        trigger_duration_secs: f64,
        /// False when a newer trigger still owns the display.
        blanked: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: RunState,
        mode: Mode,
        duration_secs: f64,
        digits: Digits,
        display: String,
        feedback: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, for logs and terse output.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::StopwatchStarted { .. } => "stopwatch_started",
            Event::StopwatchStopped { .. } => "stopwatch_stopped",
            Event::StopwatchReset { .. } => "stopwatch_reset",
            Event::ModeChanged { .. } => "mode_changed",
            Event::FeedbackShown { .. } => "feedback_shown",
            Event::FeedbackCleared { .. } => "feedback_cleared",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}
