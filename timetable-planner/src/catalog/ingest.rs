//! Building a catalog from raw timeslot listings.
//!
//! Listings arrive one line per meeting, e.g. `Tuesday 10:00AM - 12:00PM`.
//! Consecutive lines are bundled into option-groups of the course's
//! declared session count. A group whose meetings were already listed for
//! that course is dropped.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::error::IngestError;
use crate::domain::{Catalog, CourseEntry, Occurrence, OptionGroup};
use crate::planner::Signature;

/// What happened to a timeslot line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeslotOutcome {
    /// Waiting for the rest of its group.
    Pending,
    /// Completed a new option-group.
    GroupAdded,
    /// Completed a group identical to one already listed; dropped.
    DuplicateGroup,
}

/// A course whose timeslots are still being read.
struct PendingCourse {
    entry: CourseEntry,
    grouping: Vec<Occurrence>,
    seen: HashSet<Signature>,
}

impl PendingCourse {
    fn new(entry: CourseEntry) -> Self {
        Self {
            entry,
            grouping: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

/// Incrementally builds a [`Catalog`].
///
/// # Examples
///
/// ```
/// use timetable_planner::catalog::CatalogBuilder;
///
/// let mut builder = CatalogBuilder::new();
/// builder.add_course("CSCA08", 2).unwrap();
/// builder.add_timeslot("Monday 10:00AM - 11:00AM").unwrap();
/// builder.add_timeslot("Wednesday 10:00AM - 11:00AM").unwrap();
///
/// let catalog = builder.finish().unwrap();
/// assert_eq!(catalog.get("CSCA08").unwrap().groups.len(), 1);
/// ```
#[derive(Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
    current: Option<PendingCourse>,
}

impl CatalogBuilder {
    /// Create a builder for an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing catalog.
    ///
    /// Courses added again replace the stored ones; new courses are appended.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            current: None,
        }
    }

    /// Begin a new course, completing the previous one.
    pub fn add_course(&mut self, name: &str, sessions: usize) -> Result<(), IngestError> {
        self.close_course()?;
        let entry = CourseEntry::new(name.trim(), sessions)?;
        self.current = Some(PendingCourse::new(entry));
        Ok(())
    }

    /// Add one timeslot line to the current course.
    pub fn add_timeslot(&mut self, line: &str) -> Result<TimeslotOutcome, IngestError> {
        let pending = self.current.as_mut().ok_or(IngestError::NoCourse)?;

        let occurrence = Occurrence::parse_timeslot(&pending.entry.name, line)?;
        pending.grouping.push(occurrence);

        if pending.grouping.len() < pending.entry.sessions {
            return Ok(TimeslotOutcome::Pending);
        }

        let group = OptionGroup::new(std::mem::take(&mut pending.grouping))?;
        if !pending.seen.insert(Signature::of_group(&group)) {
            warn!(course = %pending.entry.name, "dropping duplicate option-group");
            return Ok(TimeslotOutcome::DuplicateGroup);
        }

        pending.entry.push_group(group)?;
        Ok(TimeslotOutcome::GroupAdded)
    }

    /// Read blank-line separated course blocks.
    ///
    /// Each block is a course name line, a sessions-per-week line, then one
    /// timeslot per line. Lines starting with `#` are ignored.
    pub fn read_blocks(&mut self, text: &str) -> Result<(), IngestError> {
        let mut block: Vec<(usize, &str)> = Vec::new();

        let lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));
        for (number, line) in lines.chain(std::iter::once((0, ""))) {
            if line.starts_with('#') {
                continue;
            }
            if !line.is_empty() {
                block.push((number, line));
                continue;
            }
            if !block.is_empty() {
                self.read_block(&block)?;
                block.clear();
            }
        }

        Ok(())
    }

    fn read_block(&mut self, block: &[(usize, &str)]) -> Result<(), IngestError> {
        let (_, name) = block[0];
        let Some(&(sessions_line, sessions)) = block.get(1) else {
            return Err(IngestError::InvalidSessions {
                line: block[0].0,
                course: name.to_string(),
                value: String::new(),
            });
        };

        let sessions = sessions
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| IngestError::InvalidSessions {
                line: sessions_line,
                course: name.to_string(),
                value: sessions.to_string(),
            })?;

        self.add_course(name, sessions)?;

        for &(number, line) in &block[2..] {
            self.add_timeslot(line).map_err(|e| match e {
                IngestError::Validation(source) => IngestError::AtLine {
                    line: number,
                    source,
                },
                other => other,
            })?;
        }

        Ok(())
    }

    /// Complete the last course and return the catalog.
    pub fn finish(mut self) -> Result<Catalog, IngestError> {
        self.close_course()?;
        Ok(self.catalog)
    }

    fn close_course(&mut self) -> Result<(), IngestError> {
        let Some(pending) = self.current.take() else {
            return Ok(());
        };

        if !pending.grouping.is_empty() {
            return Err(IngestError::IncompleteGroup {
                course: pending.entry.name,
                leftover: pending.grouping.len(),
                sessions: pending.entry.sessions,
            });
        }

        debug!(
            course = %pending.entry.name,
            groups = pending.entry.groups.len(),
            "course added to catalog"
        );
        self.catalog.upsert(pending.entry)?;
        Ok(())
    }
}
