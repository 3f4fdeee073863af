//! Domain types for the timetable planner.
//!
//! This module contains the core data model: weekdays, hours, lecture
//! occurrences and the course catalog. All types enforce their invariants
//! at construction time, so code that receives them can trust their
//! validity.

mod catalog;
mod error;
mod hour;
mod occurrence;
mod weekday;

pub use catalog::{Catalog, CourseEntry, OptionGroup};
pub use error::ValidationError;
pub use hour::Hour;
pub use occurrence::{Occurrence, OccurrenceKey, TUTORIAL_SUFFIX};
pub use weekday::Weekday;
