//! Scored candidate schedules.

use serde::Serialize;

use crate::domain::Occurrence;
use crate::penalty::Penalty;

/// A complete schedule and its total penalty.
///
/// Occurrences are kept in selection order: catalog course order, then the
/// order within each chosen option-group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredCandidate {
    pub penalty: Penalty,
    pub occurrences: Vec<Occurrence>,
}

impl ScoredCandidate {
    pub fn new(penalty: Penalty, occurrences: Vec<Occurrence>) -> Self {
        Self {
            penalty,
            occurrences,
        }
    }

    /// Occurrences ordered for display: by weekday, then end hour.
    pub fn by_day(&self) -> Vec<&Occurrence> {
        let mut sorted: Vec<&Occurrence> = self.occurrences.iter().collect();
        sorted.sort_by_key(|o| (o.weekday(), o.end()));
        sorted
    }
}
