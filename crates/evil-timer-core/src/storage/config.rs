//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Startup mode and tick cadence
//! - Feedback cooldown and display window
//! - Terminal UI preferences
//!
//! Configuration is stored at `~/.config/evil-timer/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::shell::Tab;
use crate::timer::{Mode, StopwatchSettings};

/// Stopwatch behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopwatchConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Feedback timing, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Effective time between triggers.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: f64,
    /// Wall-clock time a phrase stays visible.
    #[serde(default = "default_display_secs")]
    pub display_secs: f64,
}

/// Terminal UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub start_tab: Tab,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/evil-timer/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stopwatch: StopwatchConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

fn default_tick_interval_ms() -> u64 {
    10
}
fn default_cooldown_secs() -> f64 {
    5.0
}
fn default_display_secs() -> f64 {
    3.0
}
fn default_accent_color() -> String {
    "orange".into()
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: default_cooldown_secs(),
            display_secs: default_display_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_tab: Tab::default(),
            accent_color: default_accent_color(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown().into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")).into());
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown().into())
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::debug!(path = %path.display(), "wrote default config");
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. On error `self` is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values the stopwatch cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.stopwatch.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "stopwatch.tick_interval_ms".into(),
                message: "must be greater than zero".into(),
            }
            .into());
        }
        for (key, value) in [
            ("feedback.cooldown_secs", self.feedback.cooldown_secs),
            ("feedback.display_secs", self.feedback.display_secs),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("must be a positive number of seconds, got {value}"),
                }
                .into());
            }
        }
        // Multipliers never exceed 1.0, so a display window shorter than the
        // cooldown means every clear fires before the next trigger.
        if self.feedback.display_secs >= self.feedback.cooldown_secs {
            return Err(ConfigError::InvalidValue {
                key: "feedback.display_secs".into(),
                message: format!(
                    "must be shorter than feedback.cooldown_secs ({}), got {}",
                    self.feedback.cooldown_secs, self.feedback.display_secs
                ),
            }
            .into());
        }
        Ok(())
    }

    pub fn stopwatch_settings(&self) -> StopwatchSettings {
        StopwatchSettings {
            tick_interval_secs: self.stopwatch.tick_interval_ms as f64 / 1000.0,
            cooldown_secs: self.feedback.cooldown_secs,
            display_secs: self.feedback.display_secs,
            mode: self.stopwatch.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.stopwatch.mode, Mode::Evil);
        assert_eq!(parsed.ui.start_tab, Tab::Stopwatch);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str(indoc! {r#"
            [stopwatch]
            mode = "coach"

            [feedback]
            display_secs = 1.5
        "#})
        .unwrap();
        assert_eq!(cfg.stopwatch.mode, Mode::Coach);
        assert_eq!(cfg.stopwatch.tick_interval_ms, 10);
        assert_eq!(cfg.feedback.cooldown_secs, 5.0);
        assert_eq!(cfg.feedback.display_secs, 1.5);
        assert_eq!(cfg.ui.accent_color, "orange");
    }

    #[test]
    fn get_by_dotted_key() {
        let cfg = Config::default();
        assert_eq!(cfg.get("stopwatch.mode").as_deref(), Some("evil"));
        assert_eq!(cfg.get("stopwatch.tick_interval_ms").as_deref(), Some("10"));
        assert_eq!(cfg.get("feedback.cooldown_secs").as_deref(), Some("5.0"));
        assert_eq!(cfg.get("ui.start_tab").as_deref(), Some("stopwatch"));
        assert!(cfg.get("nope").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_preserves_types() {
        let mut cfg = Config::default();
        cfg.set("stopwatch.mode", "normal").unwrap();
        cfg.set("stopwatch.tick_interval_ms", "20").unwrap();
        cfg.set("feedback.display_secs", "2.5").unwrap();
        cfg.set("ui.start_tab", "timers").unwrap();
        assert_eq!(cfg.stopwatch.mode, Mode::Normal);
        assert_eq!(cfg.stopwatch.tick_interval_ms, 20);
        assert_eq!(cfg.feedback.display_secs, 2.5);
        assert_eq!(cfg.ui.start_tab, Tab::Timers);
    }

    #[test]
    fn set_rejects_bad_values_and_keeps_old_state() {
        let mut cfg = Config::default();
        assert!(cfg.set("stopwatch.mode", "marathon").is_err());
        assert!(cfg.set("stopwatch.tick_interval_ms", "fast").is_err());
        assert!(cfg.set("stopwatch.tick_interval_ms", "0").is_err());
        assert!(cfg.set("feedback.cooldown_secs", "-1").is_err());
        assert!(cfg.set("feedback.cooldown_secs", "3.0").is_err());
        assert!(cfg.set("feedback.display_secs", "6").is_err());
        assert!(cfg.set("missing.key", "1").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn display_window_must_be_shorter_than_cooldown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            indoc! {r#"
                [feedback]
                cooldown_secs = 1.0
                display_secs = 3.0
            "#},
        )
        .unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("feedback.display_secs"), "{err}");

        let mut cfg = Config::default();
        cfg.set("feedback.display_secs", "1").unwrap();
        cfg.set("feedback.cooldown_secs", "1.5").unwrap();
        assert_eq!(cfg.stopwatch_settings().cooldown_secs, 1.5);
    }

    #[test]
    fn settings_follow_config() {
        let mut cfg = Config::default();
        cfg.stopwatch.tick_interval_ms = 50;
        cfg.feedback.cooldown_secs = 2.0;
        let settings = cfg.stopwatch_settings();
        assert_eq!(settings.tick_interval_secs, 0.05);
        assert_eq!(settings.cooldown_secs, 2.0);
        assert_eq!(settings.display_secs, 3.0);
        assert_eq!(settings.mode, Mode::Evil);
    }

    #[test]
    fn load_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("stopwatch.mode", "coach").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), changed);
    }

    #[test]
    fn load_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[stopwatch]\ntick_interval_ms = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
