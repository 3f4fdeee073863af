//! Hour-granularity clock times.
//!
//! Course listings give times as 12-hour clock strings ("10:00AM"). The
//! planner works purely in whole hours, so this module converts those
//! strings to a canonical 24-hour value and back. Minutes are dropped.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A whole hour of the day in 24-hour form (0-23).
///
/// # Examples
///
/// ```
/// use timetable_planner::domain::Hour;
///
/// assert_eq!(Hour::parse_12h("4:00PM").unwrap().get(), 16);
/// assert_eq!(Hour::parse_12h("12:00PM").unwrap().get(), 12);
/// assert_eq!(Hour::parse_12h("5:45AM").unwrap().get(), 5);
///
/// assert_eq!(Hour::new(16).unwrap().to_12h(), "4:00PM");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hour(u8);

impl Hour {
    /// Create an hour, rejecting values above 23.
    pub fn new(hour: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::HourOutOfRange(hour));
        }
        Ok(Self(hour))
    }

    /// Parse a 12-hour clock string such as `"10:00AM"` or `"4:30PM"`.
    ///
    /// The minutes must be present but are truncated.
    pub fn parse_12h(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        let time = NaiveTime::parse_from_str(s, "%I:%M%p").map_err(|_| {
            ValidationError::InvalidClock {
                input: s.to_string(),
                reason: "expected H:MMAM or H:MMPM",
            }
        })?;

        // chrono yields 0-23
        Self::new(time.hour() as u8)
    }

    /// Returns the hour value (0-23).
    pub fn get(self) -> u8 {
        self.0
    }

    /// Format as a 12-hour clock string, e.g. `"4:00PM"`.
    ///
    /// Noon is `"12:00PM"` and midnight is `"12:00AM"`.
    pub fn to_12h(self) -> String {
        match NaiveTime::from_hms_opt(u32::from(self.0), 0, 0) {
            Some(time) => time.format("%-I:%M%p").to_string(),
            None => format!("{}:00", self.0),
        }
    }
}

impl TryFrom<u8> for Hour {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Hour::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

impl fmt::Debug for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hour({})", self.0)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_12h())
    }
}
