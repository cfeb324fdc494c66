//! Duration to digit-group formatting.
//!
//! The stopwatch face shows six independent digits laid out as `MM:SS.hh`.
//! The value wraps every hour; hours are never displayed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six digits shown on the stopwatch face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Digits {
    pub tens_of_minutes: u8,
    pub minutes: u8,
    pub tens_of_seconds: u8,
    pub seconds: u8,
    pub tens_of_hundredths: u8,
    pub hundredths: u8,
}

impl Digits {
    /// Split `secs` into display digits, modulo one hour.
    ///
    /// Each group takes a truncating remainder first and then truncates
    /// toward zero, so the hundredths never round up into the next second.
    /// Negative and non-finite input renders as `00:00.00`.
    pub fn from_secs(secs: f64) -> Self {
        if !secs.is_finite() || secs < 0.0 {
            return Self::default();
        }

        let within_hour = secs % 3600.0;
        let within_minute = secs % 60.0;
        let fraction = secs % 1.0;
        let centis = (fraction * 100.0) as u32;

        Self {
            tens_of_minutes: (within_hour / 600.0) as u8,
            minutes: ((within_hour / 60.0) as u32 % 10) as u8,
            tens_of_seconds: (within_minute / 10.0) as u8,
            seconds: (within_minute as u32 % 10) as u8,
            tens_of_hundredths: (centis / 10) as u8,
            hundredths: (centis % 10) as u8,
        }
    }

    pub fn as_array(&self) -> [u8; 6] {
        [
            self.tens_of_minutes,
            self.minutes,
            self.tens_of_seconds,
            self.seconds,
            self.tens_of_hundredths,
            self.hundredths,
        ]
    }

    /// Recombine the digits into seconds.
    pub fn to_secs(&self) -> f64 {
        f64::from(self.tens_of_minutes) * 600.0
            + f64::from(self.minutes) * 60.0
            + f64::from(self.tens_of_seconds) * 10.0
            + f64::from(self.seconds)
            + f64::from(self.tens_of_hundredths) * 0.1
            + f64::from(self.hundredths) * 0.01
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}.{}{}",
            self.tens_of_minutes,
            self.minutes,
            self.tens_of_seconds,
            self.seconds,
            self.tens_of_hundredths,
            self.hundredths
        )
    }
}
