//! Schedule scoring rules.
//!
//! Each rule looks at a complete candidate schedule (a flat list of
//! occurrences) and returns a non-negative penalty. Rules are sums over
//! single occurrences, unordered pairs or weekdays, so the total never
//! depends on the order of the input.

use serde::Serialize;

use super::config::PenaltyConfig;
use crate::domain::{Occurrence, Weekday};

/// A penalty value. Wider than the configured weights so sums cannot overflow.
pub type Penalty = u64;

/// Per-rule penalties for one schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PenaltyBreakdown {
    pub overlap: Penalty,
    pub back_to_back: Penalty,
    pub early_late: Penalty,
    pub early_tutorial: Penalty,
    pub single_lecture_day: Penalty,
    pub friday: Penalty,
}

impl PenaltyBreakdown {
    /// Sum of all rules.
    pub fn total(&self) -> Penalty {
        self.overlap
            + self.back_to_back
            + self.early_late
            + self.early_tutorial
            + self.single_lecture_day
            + self.friday
    }
}

/// Scores schedules against an immutable [`PenaltyConfig`].
#[derive(Debug, Clone, Default)]
pub struct PenaltyModel {
    config: PenaltyConfig,
}

impl PenaltyModel {
    /// Create a model with the given weights.
    pub fn new(config: PenaltyConfig) -> Self {
        Self { config }
    }

    /// The configured ceiling.
    pub fn ceiling(&self) -> Penalty {
        Penalty::from(self.config.max_consideration_ceiling)
    }

    /// Returns true if a schedule with this penalty should be kept.
    pub fn admits(&self, penalty: Penalty) -> bool {
        penalty <= self.ceiling()
    }

    /// Total penalty of a schedule.
    pub fn total(&self, occurrences: &[Occurrence]) -> Penalty {
        self.breakdown(occurrences).total()
    }

    /// Penalty of a schedule, split by rule.
    pub fn breakdown(&self, occurrences: &[Occurrence]) -> PenaltyBreakdown {
        PenaltyBreakdown {
            overlap: self.overlap(occurrences),
            back_to_back: self.back_to_back(occurrences),
            early_late: self.early_late(occurrences),
            early_tutorial: self.early_tutorial(occurrences),
            single_lecture_day: self.single_lecture_day(occurrences),
            friday: self.friday(occurrences),
        }
    }

    /// Fixed penalty per unordered pair of overlapping occurrences.
    pub fn overlap(&self, occurrences: &[Occurrence]) -> Penalty {
        count_pairs(occurrences, Occurrence::overlaps) * Penalty::from(self.config.overlap_penalty)
    }

    /// Fixed penalty per unordered pair where one ends as the other starts.
    pub fn back_to_back(&self, occurrences: &[Occurrence]) -> Penalty {
        count_pairs(occurrences, Occurrence::is_back_to_back)
            * Penalty::from(self.config.back_to_back_penalty)
    }

    /// Per-hour penalty for starting before the earliest hour or ending
    /// after the latest hour.
    pub fn early_late(&self, occurrences: &[Occurrence]) -> Penalty {
        let earliest = self.config.earliest_hour;
        let latest = self.config.latest_hour;
        let early_rate = Penalty::from(self.config.early_penalty_per_hour);
        let late_rate = Penalty::from(self.config.late_penalty_per_hour);

        occurrences
            .iter()
            .map(|o| {
                let early = Penalty::from(earliest.saturating_sub(o.start().get()));
                let late = Penalty::from(o.end().get().saturating_sub(latest));
                early * early_rate + late * late_rate
            })
            .sum()
    }

    /// Tutorials cost more the further they are from Friday.
    pub fn early_tutorial(&self, occurrences: &[Occurrence]) -> Penalty {
        let per_day = Penalty::from(self.config.early_tutorial_penalty_per_day);

        occurrences
            .iter()
            .filter(|o| o.is_tutorial())
            .map(|o| Penalty::from(o.weekday().days_until_friday()) * per_day)
            .sum()
    }

    /// Fixed penalty for each weekday holding exactly one occurrence.
    pub fn single_lecture_day(&self, occurrences: &[Occurrence]) -> Penalty {
        let lonely_days = Weekday::ALL
            .iter()
            .filter(|&&day| occurrences.iter().filter(|o| o.weekday() == day).count() == 1)
            .count();

        lonely_days as Penalty * Penalty::from(self.config.single_lecture_day_penalty)
    }

    /// Flat penalty if anything falls on Friday.
    pub fn friday(&self, occurrences: &[Occurrence]) -> Penalty {
        if occurrences.iter().any(|o| o.weekday() == Weekday::Friday) {
            Penalty::from(self.config.friday_penalty)
        } else {
            0
        }
    }
}

/// Count unordered pairs satisfying a symmetric predicate.
fn count_pairs(occurrences: &[Occurrence], pred: fn(&Occurrence, &Occurrence) -> bool) -> Penalty {
    let mut count = 0;
    for (i, a) in occurrences.iter().enumerate() {
        for b in &occurrences[i + 1..] {
            if pred(a, b) {
                count += 1;
            }
        }
    }
    count
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Hour;
    use proptest::prelude::*;

    fn occurrence_strategy() -> impl Strategy<Value = Occurrence> {
        (
            prop::sample::select(vec!["A", "B", "CTUT", "DTUT"]),
            0usize..5,
            7u8..21,
            1u8..3,
        )
            .prop_map(|(course, day, start, len)| {
                Occurrence::new(
                    course,
                    Weekday::ALL[day],
                    Hour::new(start).unwrap(),
                    Hour::new(start + len).unwrap(),
                )
                .unwrap()
            })
    }

    fn schedule_and_shuffle() -> impl Strategy<Value = (Vec<Occurrence>, Vec<Occurrence>)> {
        prop::collection::vec(occurrence_strategy(), 0..10).prop_flat_map(|lectures| {
            let original = lectures.clone();
            Just(lectures)
                .prop_shuffle()
                .prop_map(move |shuffled| (original.clone(), shuffled))
        })
    }

    proptest! {
        /// Reordering the schedule never changes its penalty
        #[test]
        fn total_is_order_independent((original, shuffled) in schedule_and_shuffle()) {
            let m = PenaltyModel::default();
            prop_assert_eq!(m.breakdown(&original), m.breakdown(&shuffled));
        }

        /// Schedules spread over distinct days never pay pairwise penalties
        #[test]
        fn distinct_days_no_pairwise(lectures in prop::collection::vec(occurrence_strategy(), 0..5)) {
            let mut seen = std::collections::HashSet::new();
            let distinct: Vec<Occurrence> = lectures
                .into_iter()
                .filter(|o| seen.insert(o.weekday()))
                .collect();
            let m = PenaltyModel::default();
            prop_assert_eq!(m.overlap(&distinct), 0);
            prop_assert_eq!(m.back_to_back(&distinct), 0);
        }
    }
}
