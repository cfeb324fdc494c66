//! Feedback text scheduling.
//!
//! A trigger shows text immediately and schedules a one-shot clear a fixed
//! wall-clock window later. Clears are explicit, cancellable entries polled
//! by the owner against its wall clock; nothing runs in the background.
//!
//! Each clear restores the cooldown bookkeeping captured at its own trigger,
//! while only the clear belonging to the most recent trigger blanks the text.

use serde::{Deserialize, Serialize};

use super::mode::{Mode, PhrasePicker, BLANK_FEEDBACK};

/// Slack for deadlines reached by summing many small float ticks.
const DEADLINE_EPSILON: f64 = 1e-6;

/// Identifies one scheduled clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClearHandle(u64);

/// The visible part of the feedback state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackState {
    pub current_text: String,
    /// Effective duration at which feedback was last shown.
    pub last_trigger_duration: f64,
}

impl Default for FeedbackState {
    fn default() -> Self {
        Self {
            current_text: BLANK_FEEDBACK.to_string(),
            last_trigger_duration: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
struct PendingClear {
    handle: ClearHandle,
    due_at: f64,
    trigger_duration: f64,
}

/// A clear that fired during [`FeedbackScheduler::poll`].
#[derive(Debug, Clone, PartialEq)]
pub struct FiredClear {
    pub handle: ClearHandle,
    pub trigger_duration: f64,
    /// Whether this clear blanked the text.
    pub blanked: bool,
}

#[derive(Debug)]
pub struct FeedbackScheduler {
    state: FeedbackState,
    display_secs: f64,
    pending: Vec<PendingClear>,
    next_id: u64,
    latest: Option<ClearHandle>,
}

impl FeedbackScheduler {
    pub fn new(display_secs: f64) -> Self {
        Self {
            state: FeedbackState::default(),
            display_secs,
            pending: Vec::new(),
            next_id: 0,
            latest: None,
        }
    }

    pub fn state(&self) -> &FeedbackState {
        &self.state
    }

    pub fn current_text(&self) -> &str {
        &self.state.current_text
    }

    pub fn last_trigger_duration(&self) -> f64 {
        self.state.last_trigger_duration
    }

    pub fn display_secs(&self) -> f64 {
        self.display_secs
    }

    /// Number of clears still waiting for their deadline.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Whether enough effective time has passed since the last trigger.
    pub fn should_trigger(&self, duration: f64, cooldown_secs: f64) -> bool {
        duration - self.state.last_trigger_duration > cooldown_secs
    }

    /// Show feedback for `mode` now and schedule its clear.
    pub fn trigger(
        &mut self,
        mode: Mode,
        picker: &mut dyn PhrasePicker,
        duration: f64,
        now: f64,
    ) -> ClearHandle {
        let handle = ClearHandle(self.next_id);
        self.next_id += 1;

        self.state.current_text = mode.feedback_text(picker);
        self.state.last_trigger_duration = duration;
        self.pending.push(PendingClear {
            handle,
            due_at: now + self.display_secs,
            trigger_duration: duration,
        });
        self.latest = Some(handle);

        tracing::debug!(
            ?handle,
            %mode,
            duration,
            text = %self.state.current_text,
            "feedback triggered"
        );
        handle
    }

    /// Fire every clear whose deadline is at or before `now`.
    pub fn poll(&mut self, now: f64) -> Vec<FiredClear> {
        if self.pending.is_empty() {
            return Vec::new();
        }

        let (due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|p| now + DEADLINE_EPSILON >= p.due_at);
        self.pending = waiting;

        due.into_iter()
            .map(|clear| {
                self.state.last_trigger_duration = clear.trigger_duration;
                let blanked = self.latest == Some(clear.handle);
                if blanked {
                    self.state.current_text = BLANK_FEEDBACK.to_string();
                    self.latest = None;
                }
                tracing::debug!(handle = ?clear.handle, blanked, "feedback cleared");
                FiredClear {
                    handle: clear.handle,
                    trigger_duration: clear.trigger_duration,
                    blanked,
                }
            })
            .collect()
    }

    /// Abandon one pending clear. Returns false if it already fired.
    pub fn cancel(&mut self, handle: ClearHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        before != self.pending.len()
    }

    /// Abandon every pending clear, as on teardown.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        if cancelled > 0 {
            tracing::debug!(cancelled, "pending feedback clears abandoned");
        }
        cancelled
    }
}

impl Default for FeedbackScheduler {
    fn default() -> Self {
        Self::new(3.0)
    }
}
