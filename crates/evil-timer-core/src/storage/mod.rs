mod config;

pub use config::{Config, FeedbackConfig, StopwatchConfig, UiConfig};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/evil-timer[-dev]/` based on EVIL_TIMER_ENV.
///
/// Set EVIL_TIMER_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(".config");

    let env = std::env::var("EVIL_TIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("evil-timer-dev")
    } else {
        base_dir.join("evil-timer")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
