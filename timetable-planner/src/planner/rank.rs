//! Ranking of scored schedules.

use super::candidate::ScoredCandidate;

/// The best schedules from a search, lowest penalty first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    /// At most `requested` schedules, sorted by ascending penalty.
    pub schedules: Vec<ScoredCandidate>,

    /// How many schedules the caller asked for.
    pub requested: usize,

    /// How many schedules were available before truncation.
    pub available: usize,
}

impl Ranking {
    /// Returns true if fewer schedules exist than were requested.
    pub fn shortfall(&self) -> bool {
        self.available < self.requested
    }

    /// The lowest-penalty schedule, if any.
    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.schedules.first()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

/// Rank schedules by penalty and keep the `k` best.
///
/// The sort is stable, so schedules with equal penalties keep the order in
/// which the search found them. Any of them is an equally valid answer.
pub fn rank(mut candidates: Vec<ScoredCandidate>, k: usize) -> Ranking {
    candidates.sort_by_key(|c| c.penalty);

    let available = candidates.len();
    candidates.truncate(k);

    Ranking {
        schedules: candidates,
        requested: k,
        available,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Hour, Occurrence, Weekday};
    use proptest::prelude::*;

    fn candidates_strategy() -> impl Strategy<Value = Vec<ScoredCandidate>> {
        prop::collection::vec(0u64..50, 0..20).prop_map(|penalties| {
            penalties
                .into_iter()
                .map(|p| {
                    let occ = Occurrence::new(
                        "A",
                        Weekday::Monday,
                        Hour::new(9).unwrap(),
                        Hour::new(10).unwrap(),
                    )
                    .unwrap();
                    ScoredCandidate::new(p, vec![occ])
                })
                .collect()
        })
    }

    proptest! {
        /// Output is sorted ascending
        #[test]
        fn rank_is_sorted(candidates in candidates_strategy(), k in 0usize..25) {
            let ranked = rank(candidates, k);
            for window in ranked.schedules.windows(2) {
                prop_assert!(window[0].penalty <= window[1].penalty);
            }
        }

        /// Output holds exactly the k smallest penalties
        #[test]
        fn rank_is_k_smallest(candidates in candidates_strategy(), k in 0usize..25) {
            let mut expected: Vec<u64> = candidates.iter().map(|c| c.penalty).collect();
            expected.sort();
            expected.truncate(k);

            let ranked = rank(candidates, k);
            let actual: Vec<u64> = ranked.schedules.iter().map(|c| c.penalty).collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(ranked.shortfall(), ranked.available < k);
        }
    }
}
