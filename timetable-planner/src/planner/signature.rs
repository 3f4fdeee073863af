//! Content-derived deduplication keys for selections.

use crate::domain::{OccurrenceKey, OptionGroup};

/// Identifies the occurrences a selection flattens to, ignoring order.
///
/// Two selections with equal signatures produce the same schedule (the same
/// multiset of occurrences), so only the first one needs scoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(Vec<OccurrenceKey>);

impl Signature {
    /// Build the signature of a selection of option-groups.
    pub fn of_selection(selection: &[&OptionGroup]) -> Self {
        let mut keys: Vec<OccurrenceKey> = selection
            .iter()
            .flat_map(|group| group.occurrences().iter().map(|o| o.key()))
            .collect();
        keys.sort();
        Self(keys)
    }

    /// Build the signature of a single option-group.
    pub fn of_group(group: &OptionGroup) -> Self {
        Self::of_selection(&[group])
    }

    /// Number of occurrences covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
