//! The course catalog: every course and its interchangeable option-groups.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Occurrence, ValidationError};

/// Occurrences of one course that must be taken together.
///
/// A typical group is a lecture plus its linked tutorial, or the two weekly
/// meetings of the same lecture section. Groups are never empty and never
/// mix courses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Occurrence>", into = "Vec<Occurrence>")]
pub struct OptionGroup {
    occurrences: Vec<Occurrence>,
}

impl OptionGroup {
    /// Create a group, checking it is non-empty and single-course.
    pub fn new(occurrences: Vec<Occurrence>) -> Result<Self, ValidationError> {
        let Some(first) = occurrences.first() else {
            return Err(ValidationError::EmptyGroup);
        };

        if let Some(other) = occurrences.iter().find(|o| o.course() != first.course()) {
            return Err(ValidationError::MixedCourses {
                expected: first.course().to_string(),
                found: other.course().to_string(),
            });
        }

        Ok(Self { occurrences })
    }

    /// The course every occurrence belongs to.
    pub fn course(&self) -> &str {
        self.occurrences[0].course()
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    /// Always false; groups are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

impl TryFrom<Vec<Occurrence>> for OptionGroup {
    type Error = ValidationError;

    fn try_from(occurrences: Vec<Occurrence>) -> Result<Self, Self::Error> {
        OptionGroup::new(occurrences)
    }
}

impl From<OptionGroup> for Vec<Occurrence> {
    fn from(group: OptionGroup) -> Self {
        group.occurrences
    }
}

/// One course and its mutually exclusive option-groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Unique course identifier.
    pub name: String,

    /// Meetings per week; every group has exactly this many occurrences.
    pub sessions: usize,

    /// Alternatives, in listing order.
    pub groups: Vec<OptionGroup>,
}

impl CourseEntry {
    /// Create an entry with no options yet.
    pub fn new(name: impl Into<String>, sessions: usize) -> Result<Self, ValidationError> {
        let name = name.into();
        if sessions == 0 {
            return Err(ValidationError::NoSessions(name));
        }
        Ok(Self {
            name,
            sessions,
            groups: Vec::new(),
        })
    }

    /// Append an option-group after checking it fits this course.
    pub fn push_group(&mut self, group: OptionGroup) -> Result<(), ValidationError> {
        self.check_group(&group)?;
        self.groups.push(group);
        Ok(())
    }

    fn check_group(&self, group: &OptionGroup) -> Result<(), ValidationError> {
        if group.course() != self.name {
            return Err(ValidationError::MixedCourses {
                expected: self.name.clone(),
                found: group.course().to_string(),
            });
        }
        if group.len() != self.sessions {
            return Err(ValidationError::GroupSize {
                course: self.name.clone(),
                expected: self.sessions,
                actual: group.len(),
            });
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.sessions == 0 {
            return Err(ValidationError::NoSessions(self.name.clone()));
        }
        self.groups.iter().try_for_each(|g| self.check_group(g))
    }
}

/// Course options: the read-only input to the search.
///
/// Courses are kept in an explicit order; that order is the order in which
/// the search walks the cartesian product and the order in which each
/// candidate's occurrences are flattened.
///
/// # Examples
///
/// ```
/// use timetable_planner::domain::{Catalog, CourseEntry, Occurrence, OptionGroup};
///
/// let lec = Occurrence::parse_timeslot("CSCA08", "Monday 10:00AM - 11:00AM").unwrap();
/// let mut course = CourseEntry::new("CSCA08", 1).unwrap();
/// course.push_group(OptionGroup::new(vec![lec]).unwrap()).unwrap();
///
/// let mut catalog = Catalog::new();
/// catalog.push(course).unwrap();
/// assert_eq!(catalog.selection_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CourseEntry>", into = "Vec<CourseEntry>")]
pub struct Catalog {
    courses: Vec<CourseEntry>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from entries, validating every invariant.
    pub fn from_entries(courses: Vec<CourseEntry>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for course in &courses {
            if !seen.insert(course.name.as_str()) {
                return Err(ValidationError::DuplicateCourse(course.name.clone()));
            }
            course.validate()?;
        }
        Ok(Self { courses })
    }

    /// Append a course; names must be unique.
    pub fn push(&mut self, course: CourseEntry) -> Result<(), ValidationError> {
        if self.get(&course.name).is_some() {
            return Err(ValidationError::DuplicateCourse(course.name));
        }
        course.validate()?;
        self.courses.push(course);
        Ok(())
    }

    /// Insert a course, replacing any existing entry of the same name in place.
    pub fn upsert(&mut self, course: CourseEntry) -> Result<(), ValidationError> {
        course.validate()?;
        match self.courses.iter_mut().find(|c| c.name == course.name) {
            Some(existing) => *existing = course,
            None => self.courses.push(course),
        }
        Ok(())
    }

    /// Look up a course by name.
    pub fn get(&self, name: &str) -> Option<&CourseEntry> {
        self.courses.iter().find(|c| c.name == name)
    }

    /// Courses in product order.
    pub fn courses(&self) -> &[CourseEntry] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Number of tuples in the cartesian product of option-groups.
    ///
    /// Saturates at `usize::MAX`. Zero if any course has no options.
    pub fn selection_count(&self) -> usize {
        self.courses
            .iter()
            .fold(1usize, |acc, c| acc.saturating_mul(c.groups.len()))
    }
}

impl TryFrom<Vec<CourseEntry>> for Catalog {
    type Error = ValidationError;

    fn try_from(courses: Vec<CourseEntry>) -> Result<Self, Self::Error> {
        Catalog::from_entries(courses)
    }
}

impl From<Catalog> for Vec<CourseEntry> {
    fn from(catalog: Catalog) -> Self {
        catalog.courses
    }
}
