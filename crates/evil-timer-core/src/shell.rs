//! View-shell model: the tab bar and stopwatch face geometry.
//!
//! Front-ends own rendering; this module only holds the parts of the shell
//! that are plain data, so every front-end lays things out the same way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    WorldClock,
    Alarms,
    #[default]
    Stopwatch,
    /// Hosts the mode selector.
    Timers,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::WorldClock, Tab::Alarms, Tab::Stopwatch, Tab::Timers];

    pub fn label(self) -> &'static str {
        match self {
            Tab::WorldClock => "World Clock",
            Tab::Alarms => "Alarms",
            Tab::Stopwatch => "Stopwatch",
            Tab::Timers => "Timers",
        }
    }

    /// Tabs with no behavior behind them.
    pub fn is_placeholder(self) -> bool {
        matches!(self, Tab::WorldClock | Tab::Alarms)
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Tab {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '_'], "-").as_str() {
            "world-clock" => Ok(Tab::WorldClock),
            "alarms" => Ok(Tab::Alarms),
            "stopwatch" => Ok(Tab::Stopwatch),
            "timers" => Ok(Tab::Timers),
            _ => Err(ValidationError::UnknownTab(s.to_string())),
        }
    }
}

/// Width of the `:` and `.` separators for a face `width` wide.
pub fn separator_width(width: f64) -> f64 {
    width / 25.0
}

/// Width of one digit cell; six digits and one and a half separators fill the face.
pub fn digit_width(width: f64) -> f64 {
    (width - separator_width(width) * 1.5) / 6.0
}
