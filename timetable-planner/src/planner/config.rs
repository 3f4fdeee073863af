//! Search limits for the timetable planner.

use std::time::Duration;

/// Bounds on how much work a single search may do.
///
/// The product of option-group counts grows exponentially with the number
/// of courses. When either bound is hit the search stops and reports a
/// truncated result instead of running to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of selections (product tuples) to examine.
    pub max_selections: Option<usize>,

    /// Wall-clock budget for the whole search.
    pub deadline: Option<Duration>,
}

impl SearchLimits {
    /// Create limits with the given parameters.
    pub fn new(max_selections: Option<usize>, deadline: Option<Duration>) -> Self {
        Self {
            max_selections,
            deadline,
        }
    }

    /// No limits: the search always enumerates every selection.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Stop after examining this many selections.
    pub fn with_max_selections(mut self, max: usize) -> Self {
        self.max_selections = Some(max);
        self
    }

    /// Stop once this much time has elapsed.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns true if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.max_selections.is_none() && self.deadline.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        let limits = SearchLimits::default();
        assert!(limits.is_unbounded());
        assert_eq!(limits, SearchLimits::unbounded());
    }

    #[test]
    fn builders() {
        let limits = SearchLimits::unbounded()
            .with_max_selections(100)
            .with_deadline(Duration::from_secs(5));

        assert_eq!(limits.max_selections, Some(100));
        assert_eq!(limits.deadline, Some(Duration::from_secs(5)));
        assert!(!limits.is_unbounded());
    }

    #[test]
    fn custom_limits() {
        let limits = SearchLimits::new(Some(10), None);
        assert_eq!(limits.max_selections, Some(10));
        assert_eq!(limits.deadline, None);
    }
}
