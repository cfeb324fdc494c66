mod engine;
mod feedback;
mod format;
mod mode;

pub use engine::{RunState, Stopwatch, StopwatchSettings};
pub use feedback::{ClearHandle, FeedbackScheduler, FeedbackState, FiredClear};
pub use format::Digits;
pub use mode::{Mode, ModeProfile, PhrasePicker, RngPicker, BLANK_FEEDBACK};
