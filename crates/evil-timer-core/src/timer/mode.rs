//! Stopwatch modes and their time/feedback profiles.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Feedback text meaning "nothing displayed".
pub const BLANK_FEEDBACK: &str = " ";

const COACH_PHRASES: &[&str] = &[
    "You got this!",
    "Almost there!",
    "Pain is something something leaving something",
    "Look at those muscles!",
    "Rude!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Normal,
    /// Displayed time advances slower than real time.
    #[default]
    Evil,
    /// Real-time clock with periodic motivational phrases.
    Coach,
}

/// Static per-mode behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeProfile {
    /// Scale applied to real elapsed time to get effective time.
    pub multiplier: f64,
    /// Feedback phrases; empty means feedback stays blank.
    pub phrases: &'static [&'static str],
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Evil, Mode::Coach];

    pub fn profile(self) -> ModeProfile {
        match self {
            Mode::Normal => ModeProfile {
                multiplier: 1.0,
                phrases: &[],
            },
            Mode::Evil => ModeProfile {
                multiplier: 0.857_142_857_1,
                phrases: &[],
            },
            Mode::Coach => ModeProfile {
                multiplier: 1.0,
                phrases: COACH_PHRASES,
            },
        }
    }

    pub fn multiplier(self) -> f64 {
        self.profile().multiplier
    }

    /// Pick the text to show when feedback fires in this mode.
    pub fn feedback_text(self, picker: &mut dyn PhrasePicker) -> String {
        let phrases = self.profile().phrases;
        if phrases.is_empty() {
            return BLANK_FEEDBACK.to_string();
        }
        let idx = picker.pick(phrases.len()).min(phrases.len() - 1);
        phrases[idx].to_string()
    }

    /// Human readable name, as shown in the mode selector.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "Normal",
            Mode::Evil => "Evil",
            Mode::Coach => "Coach",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Evil => "evil",
            Mode::Coach => "coach",
        }
    }

    pub fn next(self) -> Mode {
        match self {
            Mode::Normal => Mode::Evil,
            Mode::Evil => Mode::Coach,
            Mode::Coach => Mode::Normal,
        }
    }

    pub fn prev(self) -> Mode {
        match self {
            Mode::Normal => Mode::Coach,
            Mode::Evil => Mode::Normal,
            Mode::Coach => Mode::Evil,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Mode::Normal),
            "evil" => Ok(Mode::Evil),
            "coach" => Ok(Mode::Coach),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

/// Source of uniform random indices for phrase selection.
///
/// Implementations must return a value in `0..len`; `len` is never zero.
pub trait PhrasePicker {
    fn pick(&mut self, len: usize) -> usize;
}

/// Adapts any `rand` generator into a [`PhrasePicker`].
#[derive(Debug, Clone)]
pub struct RngPicker<R> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<StdRng> {
    /// Non-reproducible picker seeded from the OS.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl RngPicker<Pcg64> {
    /// Reproducible picker for headless runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg64::seed_from_u64(seed))
    }
}

impl<R: Rng> PhrasePicker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
