//! Domain error types.
//!
//! These errors represent validation failures in the catalog data model.
//! They are raised at construction time and never recovered inside the
//! search.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Weekday name that is not a recognised day at all
    #[error("invalid weekday: {0:?}")]
    InvalidWeekday(String),

    /// Saturday or Sunday; lectures only run on weekdays
    #[error("weekend day not allowed: {0:?}")]
    Weekend(String),

    /// Clock string that is not of the form H:MMAM or H:MMPM
    #[error("invalid clock time {input:?}: {reason}")]
    InvalidClock { input: String, reason: &'static str },

    /// Hour outside 0-23
    #[error("hour {0} is out of range 0-23")]
    HourOutOfRange(u8),

    /// Occurrence whose end is not after its start
    #[error("occurrence must end after it starts ({start} -> {end})")]
    EmptyRange { start: u8, end: u8 },

    /// Raw timeslot line that does not split into day, start, separator, end
    #[error("invalid timeslot {0:?}: expected e.g. \"Tuesday 10:00AM - 12:00PM\"")]
    InvalidTimeslot(String),

    /// Option-group with no occurrences
    #[error("option-group has no occurrences")]
    EmptyGroup,

    /// Option-group containing occurrences of another course
    #[error("option-group for {expected} contains an occurrence of {found}")]
    MixedCourses { expected: String, found: String },

    /// Option-group size differs from the course's session count
    #[error("option-group for {course} has {actual} occurrences, expected {expected}")]
    GroupSize {
        course: String,
        expected: usize,
        actual: usize,
    },

    /// Course declared with zero sessions per week
    #[error("course {0} must have at least one session per week")]
    NoSessions(String),

    /// Same course identifier declared twice in a catalog
    #[error("duplicate course: {0}")]
    DuplicateCourse(String),
}
