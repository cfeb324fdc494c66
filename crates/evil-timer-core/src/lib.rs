//! # Evil Trainer Timer Core Library
//!
//! This library provides the logic behind the Evil Trainer Timer stopwatch.
//! Front-ends (the `evil-timer` terminal app, or any other view layer) own a
//! [`Stopwatch`], forward user actions to it and call `on_tick()` at a fixed
//! cadence; everything they display is read back from the stopwatch.
//!
//! ## Architecture
//!
//! - **Formatter**: duration to `MM:SS.hh` digit groups, wrapping hourly
//! - **Modes**: per-mode time multiplier and feedback phrases
//! - **Feedback**: cooldown-gated phrases with cancellable timed clears
//! - **Engine**: the tick-driven stopwatch state machine
//! - **Shell**: tab bar and face geometry shared by front-ends
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Stopwatch`]: Core stopwatch state machine
//! - [`Digits`]: Display digit groups
//! - [`Mode`]: Time/feedback profile selector
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod shell;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use events::Event;
pub use shell::Tab;
pub use storage::Config;
pub use timer::{
    Digits, FeedbackScheduler, Mode, PhrasePicker, RngPicker, RunState, Stopwatch,
    StopwatchSettings,
};
