//! Core error types for evil-timer-core.
//!
//! The stopwatch engine itself is total: ticking, starting, stopping and
//! resetting never fail. Errors only come from the edges of the library,
//! namely configuration I/O and parsing of user supplied values.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for evil-timer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization errors
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// The home directory could not be resolved
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// Validation errors for user supplied values.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Mode name did not match any known mode
    #[error("Unknown mode '{0}' (expected one of: normal, evil, coach)")]
    UnknownMode(String),

    /// Tab name did not match any known tab
    #[error("Unknown tab '{0}' (expected one of: world-clock, alarms, stopwatch, timers)")]
    UnknownTab(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
