//! Lecture occurrences.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Hour, ValidationError, Weekday};

/// Suffix marking a course identifier as a tutorial section.
pub const TUTORIAL_SUFFIX: &str = "TUT";

/// Content key of an occurrence: (course, weekday, start, end).
///
/// Two occurrences with equal keys are indistinguishable to the planner.
pub type OccurrenceKey = (String, Weekday, Hour, Hour);

/// One scheduled meeting of a course.
///
/// An occurrence always ends strictly after it starts; this is checked at
/// construction so penalty rules never see an empty range.
///
/// # Examples
///
/// ```
/// use timetable_planner::domain::{Occurrence, Weekday};
///
/// let lec = Occurrence::parse_timeslot("CSCA08", "Tuesday 10:00AM - 12:00PM").unwrap();
/// assert_eq!(lec.weekday(), Weekday::Tuesday);
/// assert_eq!(lec.start().get(), 10);
/// assert_eq!(lec.end().get(), 12);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOccurrence")]
pub struct Occurrence {
    course: String,
    weekday: Weekday,
    start: Hour,
    end: Hour,
}

/// Unvalidated wire form, checked through [`Occurrence::new`].
#[derive(Deserialize)]
struct RawOccurrence {
    course: String,
    weekday: Weekday,
    start: Hour,
    end: Hour,
}

impl TryFrom<RawOccurrence> for Occurrence {
    type Error = ValidationError;

    fn try_from(raw: RawOccurrence) -> Result<Self, Self::Error> {
        Occurrence::new(raw.course, raw.weekday, raw.start, raw.end)
    }
}

impl Occurrence {
    /// Create an occurrence, rejecting ranges where end is not after start.
    pub fn new(
        course: impl Into<String>,
        weekday: Weekday,
        start: Hour,
        end: Hour,
    ) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::EmptyRange {
                start: start.get(),
                end: end.get(),
            });
        }

        Ok(Self {
            course: course.into(),
            weekday,
            start,
            end,
        })
    }

    /// Parse a raw listing line such as `"Tuesday 10:00AM - 12:00PM"`.
    pub fn parse_timeslot(course: &str, line: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [day, start, "-", end] = parts.as_slice() else {
            return Err(ValidationError::InvalidTimeslot(line.trim().to_string()));
        };

        let weekday = Weekday::parse(day)?;
        let start = Hour::parse_12h(start)?;
        let end = Hour::parse_12h(end)?;

        Self::new(course, weekday, start, end)
    }

    /// The course identifier.
    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn start(&self) -> Hour {
        self.start
    }

    pub fn end(&self) -> Hour {
        self.end
    }

    /// Returns true if the course identifier marks a tutorial.
    pub fn is_tutorial(&self) -> bool {
        self.course.ends_with(TUTORIAL_SUFFIX)
    }

    /// Returns true if both occurrences fall on the same weekday.
    pub fn same_day(&self, other: &Occurrence) -> bool {
        self.weekday == other.weekday
    }

    /// Returns true if the two occurrences properly intersect.
    ///
    /// Touching endpoints (one ends as the other starts) do not overlap.
    pub fn overlaps(&self, other: &Occurrence) -> bool {
        self.same_day(other) && self.start < other.end && other.start < self.end
    }

    /// Returns true if one occurrence ends exactly when the other starts.
    pub fn is_back_to_back(&self, other: &Occurrence) -> bool {
        self.same_day(other) && (self.start == other.end || other.start == self.end)
    }

    /// Content key used for deduplication.
    pub fn key(&self) -> OccurrenceKey {
        (self.course.clone(), self.weekday, self.start, self.end)
    }
}

impl PartialOrd for Occurrence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Occurrence {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.course, self.weekday, self.start, self.end).cmp(&(
            &other.course,
            other.weekday,
            other.start,
            other.end,
        ))
    }
}

impl fmt::Debug for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Occurrence({} {} {}-{})",
            self.course,
            self.weekday,
            self.start.get(),
            self.end.get()
        )
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {}-{}",
            self.course,
            self.weekday,
            self.start.to_12h(),
            self.end.to_12h()
        )
    }
}
