//! Teaching weekdays.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A day on which lectures can be scheduled.
///
/// Only Monday to Friday exist; there are no weekend lectures. The day
/// number (Monday = 1 .. Friday = 5) is the only thing compared when
/// checking whether two occurrences share a day.
///
/// # Examples
///
/// ```
/// use timetable_planner::domain::Weekday;
///
/// let day = Weekday::parse("Tuesday").unwrap();
/// assert_eq!(day.number(), 2);
/// assert_eq!(day.to_string(), "Tuesday");
///
/// // Weekends are rejected
/// assert!(Weekday::parse("Saturday").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
}

impl Weekday {
    /// All teaching days, Monday first.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Parse a weekday name.
    ///
    /// Only the full English names, capitalised, are accepted.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim() {
            "Monday" => Ok(Weekday::Monday),
            "Tuesday" => Ok(Weekday::Tuesday),
            "Wednesday" => Ok(Weekday::Wednesday),
            "Thursday" => Ok(Weekday::Thursday),
            "Friday" => Ok(Weekday::Friday),
            "Saturday" | "Sunday" => Err(ValidationError::Weekend(s.to_string())),
            _ => Err(ValidationError::InvalidWeekday(s.to_string())),
        }
    }

    /// Day number, Monday = 1 through Friday = 5.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Days remaining until Friday (Friday itself is 0).
    pub fn days_until_friday(self) -> u8 {
        Weekday::Friday.number() - self.number()
    }

    /// Full English name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_names() {
        assert_eq!(Weekday::parse("Monday").unwrap(), Weekday::Monday);
        assert_eq!(Weekday::parse("Tuesday").unwrap(), Weekday::Tuesday);
        assert_eq!(Weekday::parse("Wednesday").unwrap(), Weekday::Wednesday);
        assert_eq!(Weekday::parse("Thursday").unwrap(), Weekday::Thursday);
        assert_eq!(Weekday::parse("Friday").unwrap(), Weekday::Friday);
    }

    #[test]
    fn reject_other_spellings() {
        for name in ["Mon", "mon", "FRIDAY", "thu", "wEdNeSdAy", "friday"] {
            assert_eq!(
                Weekday::parse(name),
                Err(ValidationError::InvalidWeekday(name.into())),
                "{name} should be rejected"
            );
        }
        assert!(matches!(Weekday::parse("sat"), Err(ValidationError::InvalidWeekday(_))));
    }

    #[test]
    fn reject_weekend() {
        assert_eq!(
            Weekday::parse("Saturday"),
            Err(ValidationError::Weekend("Saturday".into()))
        );
        assert_eq!(
            Weekday::parse("Sunday"),
            Err(ValidationError::Weekend("Sunday".into()))
        );
    }

    #[test]
    fn reject_garbage() {
        assert!(matches!(
            Weekday::parse("Funday"),
            Err(ValidationError::InvalidWeekday(_))
        ));
        assert!(Weekday::parse("").is_err());
    }

    #[test]
    fn numbers() {
        let numbers: Vec<u8> = Weekday::ALL.iter().map(|d| d.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn days_until_friday() {
        assert_eq!(Weekday::Monday.days_until_friday(), 4);
        assert_eq!(Weekday::Thursday.days_until_friday(), 1);
        assert_eq!(Weekday::Friday.days_until_friday(), 0);
    }

    #[test]
    fn display_roundtrip() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::parse(&day.to_string()).unwrap(), day);
        }
    }
}
