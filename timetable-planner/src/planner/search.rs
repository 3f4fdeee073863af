//! Exhaustive selection search.
//!
//! Walks the cartesian product of every course's option-groups, skips
//! selections whose occurrences were already scored, scores the rest and
//! keeps those under the penalty ceiling.

use std::collections::HashSet;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use super::candidate::ScoredCandidate;
use super::config::SearchLimits;
use super::signature::Signature;
use crate::domain::{Catalog, Occurrence, OptionGroup};
use crate::penalty::PenaltyModel;

/// How often (in selections) the deadline is checked.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// Why a search stopped before enumerating everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_selections` selections were examined
    SelectionBudget,
    /// The deadline passed
    Deadline,
}

/// Whether a search ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Every selection was examined.
    Complete,
    /// The search stopped early; results cover only part of the product.
    Truncated(StopReason),
}

/// Counters describing one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Selections taken from the product.
    pub examined: usize,
    /// Selections skipped because an identical schedule was already seen.
    pub duplicates: usize,
    /// Scored selections discarded for exceeding the ceiling.
    pub rejected: usize,
}

impl SearchStats {
    fn absorb(&mut self, other: SearchStats) {
        self.examined += other.examined;
        self.duplicates += other.duplicates;
        self.rejected += other.rejected;
    }
}

/// Result of a selection search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Retained candidates, in product order.
    pub candidates: Vec<ScoredCandidate>,

    /// Whether the product was fully enumerated.
    pub status: SearchStatus,

    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Create an empty, complete result.
    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            status: SearchStatus::Complete,
            stats: SearchStats::default(),
        }
    }

    /// Returns true if the search stopped early.
    pub fn is_partial(&self) -> bool {
        matches!(self.status, SearchStatus::Truncated(_))
    }

    /// Returns true if no schedule survived.
    pub fn is_infeasible(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Iterator over the cartesian product of option-group lists.
///
/// The last list varies fastest. An empty list of lists yields exactly one
/// empty selection; any empty list yields nothing.
struct Selections<'a> {
    lists: Vec<&'a [OptionGroup]>,
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Selections<'a> {
    fn new(lists: Vec<&'a [OptionGroup]>) -> Self {
        let done = lists.iter().any(|l| l.is_empty());
        let indices = vec![0; lists.len()];
        Self {
            lists,
            indices,
            done,
        }
    }

    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.lists[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        // Every position wrapped around
        self.done = true;
    }
}

impl<'a> Iterator for Selections<'a> {
    type Item = Vec<&'a OptionGroup>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let selection = self
            .lists
            .iter()
            .zip(&self.indices)
            .map(|(list, &idx)| &list[idx])
            .collect();

        self.advance();
        Some(selection)
    }
}

/// Shared work budget, usable from several threads at once.
struct Budget<'a> {
    limits: &'a SearchLimits,
    started: Instant,
    claimed: AtomicUsize,
    halted: AtomicBool,
    reason: OnceLock<StopReason>,
}

impl<'a> Budget<'a> {
    fn new(limits: &'a SearchLimits) -> Self {
        Self {
            limits,
            started: Instant::now(),
            claimed: AtomicUsize::new(0),
            halted: AtomicBool::new(false),
            reason: OnceLock::new(),
        }
    }

    /// Claim one selection. Returns false once the search must stop.
    fn claim(&self) -> bool {
        if self.limits.is_unbounded() {
            return true;
        }
        if self.halted.load(Ordering::Relaxed) {
            return false;
        }

        let n = self.claimed.fetch_add(1, Ordering::Relaxed);

        if let Some(max) = self.limits.max_selections
            && n >= max
        {
            self.halt(StopReason::SelectionBudget);
            return false;
        }

        if let Some(deadline) = self.limits.deadline
            && n % DEADLINE_CHECK_INTERVAL == 0
            && self.started.elapsed() >= deadline
        {
            self.halt(StopReason::Deadline);
            return false;
        }

        true
    }

    fn halt(&self, reason: StopReason) {
        let _ = self.reason.set(reason);
        self.halted.store(true, Ordering::Relaxed);
    }

    fn status(&self) -> SearchStatus {
        match self.reason.get() {
            Some(reason) => SearchStatus::Truncated(*reason),
            None => SearchStatus::Complete,
        }
    }
}

/// What one scan kept.
struct Scan {
    candidates: Vec<ScoredCandidate>,
    /// Signature of every distinct selection scored, with the index of its
    /// candidate if kept. Only recorded for scans that are merged later.
    keys: Vec<(Signature, Option<usize>)>,
    stats: SearchStats,
}

/// Selection search over a catalog.
pub struct Planner<'a> {
    model: &'a PenaltyModel,
    limits: &'a SearchLimits,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(model: &'a PenaltyModel, limits: &'a SearchLimits) -> Self {
        Self { model, limits }
    }

    /// Enumerate every selection on the current thread.
    pub fn search(&self, catalog: &Catalog) -> SearchOutcome {
        if let Some(empty) = first_empty_course(catalog) {
            debug!(course = empty, "course has no options; no feasible schedule");
            return SearchOutcome::empty();
        }

        let budget = Budget::new(self.limits);
        let lists = catalog.courses().iter().map(|c| c.groups.as_slice()).collect();
        let scan = self.scan(Selections::new(lists), &budget, false);

        let outcome = SearchOutcome {
            candidates: scan.candidates,
            status: budget.status(),
            stats: scan.stats,
        };
        log_outcome(&outcome);
        outcome
    }

    /// Enumerate selections across the rayon thread pool.
    ///
    /// The first course's option-groups are split into one partition each.
    /// Partitions deduplicate locally and are then merged in partition
    /// order through a single signature set, so a complete run returns
    /// exactly what [`Planner::search`] returns.
    pub fn search_parallel(&self, catalog: &Catalog) -> SearchOutcome {
        if let Some(empty) = first_empty_course(catalog) {
            debug!(course = empty, "course has no options; no feasible schedule");
            return SearchOutcome::empty();
        }

        let Some((first, rest)) = catalog.courses().split_first() else {
            return self.search(catalog);
        };

        let budget = Budget::new(self.limits);
        let scans: Vec<Scan> = first
            .groups
            .par_iter()
            .map(|group| {
                let mut lists: Vec<&[OptionGroup]> = Vec::with_capacity(rest.len() + 1);
                lists.push(std::slice::from_ref(group));
                lists.extend(rest.iter().map(|c| c.groups.as_slice()));
                self.scan(Selections::new(lists), &budget, true)
            })
            .collect();

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        let mut stats = SearchStats::default();

        for scan in scans {
            stats.absorb(scan.stats);
            let mut kept: Vec<Option<ScoredCandidate>> =
                scan.candidates.into_iter().map(Some).collect();

            for (signature, index) in scan.keys {
                if seen.insert(signature) {
                    candidates.extend(index.and_then(|i| kept.get_mut(i)).and_then(Option::take));
                    continue;
                }
                // Already scored in an earlier partition
                stats.duplicates += 1;
                if index.is_none() {
                    stats.rejected -= 1;
                }
            }
        }

        let outcome = SearchOutcome {
            candidates,
            status: budget.status(),
            stats,
        };
        log_outcome(&outcome);
        outcome
    }

    /// Score every selection from `selections` until the budget runs out.
    ///
    /// With `record_keys` the scan also lists each distinct signature, which
    /// a partitioned search needs to merge scans.
    fn scan<'c>(
        &self,
        selections: impl Iterator<Item = Vec<&'c OptionGroup>>,
        budget: &Budget<'_>,
        record_keys: bool,
    ) -> Scan {
        let mut seen: HashSet<Signature> = HashSet::new();
        let mut candidates = Vec::new();
        let mut keys = Vec::new();
        let mut stats = SearchStats::default();

        for selection in selections {
            if !budget.claim() {
                break;
            }
            stats.examined += 1;

            let signature = Signature::of_selection(&selection);
            if seen.contains(&signature) {
                trace!(?signature, "skipping duplicate selection");
                stats.duplicates += 1;
                continue;
            }

            let occurrences = flatten(&selection);
            let penalty = self.model.total(&occurrences);

            let index = if self.model.admits(penalty) {
                candidates.push(ScoredCandidate::new(penalty, occurrences));
                Some(candidates.len() - 1)
            } else {
                stats.rejected += 1;
                None
            };

            if record_keys {
                keys.push((signature.clone(), index));
            }
            seen.insert(signature);
        }

        Scan {
            candidates,
            keys,
            stats,
        }
    }
}

/// Concatenate the occurrences of every chosen group, in selection order.
fn flatten(selection: &[&OptionGroup]) -> Vec<Occurrence> {
    selection
        .iter()
        .flat_map(|group| group.occurrences().iter().cloned())
        .collect()
}

fn first_empty_course(catalog: &Catalog) -> Option<&str> {
    catalog
        .courses()
        .iter()
        .find(|c| c.groups.is_empty())
        .map(|c| c.name.as_str())
}

fn log_outcome(outcome: &SearchOutcome) {
    let stats = &outcome.stats;
    debug!(
        examined = stats.examined,
        duplicates = stats.duplicates,
        rejected = stats.rejected,
        retained = outcome.candidates.len(),
        "selection search finished"
    );
    if let SearchStatus::Truncated(reason) = outcome.status {
        warn!(?reason, examined = stats.examined, "selection search stopped early");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Hour, Weekday};

    fn occ(course: &str, day: Weekday, start: u8, end: u8) -> Occurrence {
        Occurrence::new(course, day, Hour::new(start).unwrap(), Hour::new(end).unwrap()).unwrap()
    }

    fn single(course: &str, day: Weekday, start: u8, end: u8) -> OptionGroup {
        OptionGroup::new(vec![occ(course, day, start, end)]).unwrap()
    }

    #[test]
    fn selections_cover_product_in_order() {
        let a = vec![
            single("A", Weekday::Monday, 9, 10),
            single("A", Weekday::Tuesday, 9, 10),
        ];
        let b = vec![
            single("B", Weekday::Monday, 12, 13),
            single("B", Weekday::Tuesday, 12, 13),
            single("B", Weekday::Wednesday, 12, 13),
        ];

        let days: Vec<(Weekday, Weekday)> = Selections::new(vec![a.as_slice(), b.as_slice()])
            .map(|s| {
                (
                    s[0].occurrences()[0].weekday(),
                    s[1].occurrences()[0].weekday(),
                )
            })
            .collect();

        assert_eq!(
            days,
            vec![
                (Weekday::Monday, Weekday::Monday),
                (Weekday::Monday, Weekday::Tuesday),
                (Weekday::Monday, Weekday::Wednesday),
                (Weekday::Tuesday, Weekday::Monday),
                (Weekday::Tuesday, Weekday::Tuesday),
                (Weekday::Tuesday, Weekday::Wednesday),
            ]
        );
    }

    #[test]
    fn selections_with_empty_list_yield_nothing() {
        let a = vec![single("A", Weekday::Monday, 9, 10)];
        let empty: Vec<OptionGroup> = Vec::new();
        assert_eq!(Selections::new(vec![a.as_slice(), empty.as_slice()]).count(), 0);
    }

    #[test]
    fn selections_of_nothing_yield_one_empty_selection() {
        let all: Vec<Vec<&OptionGroup>> = Selections::new(Vec::new()).collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
    }

    #[test]
    fn flatten_keeps_selection_order() {
        let a = OptionGroup::new(vec![
            occ("A", Weekday::Wednesday, 9, 10),
            occ("A", Weekday::Monday, 9, 10),
        ])
        .unwrap();
        let b = single("B", Weekday::Tuesday, 12, 13);

        let flat = flatten(&[&a, &b]);
        let days: Vec<Weekday> = flat.iter().map(|o| o.weekday()).collect();
        assert_eq!(
            days,
            vec![Weekday::Wednesday, Weekday::Monday, Weekday::Tuesday]
        );
    }

    #[test]
    fn budget_unbounded_never_stops() {
        let limits = SearchLimits::unbounded();
        let budget = Budget::new(&limits);
        assert!((0..10_000).all(|_| budget.claim()));
        assert_eq!(budget.status(), SearchStatus::Complete);
    }

    #[test]
    fn budget_stops_after_max_selections() {
        let limits = SearchLimits::unbounded().with_max_selections(3);
        let budget = Budget::new(&limits);
        assert!(budget.claim());
        assert!(budget.claim());
        assert!(budget.claim());
        assert!(!budget.claim());
        assert!(!budget.claim());
        assert_eq!(
            budget.status(),
            SearchStatus::Truncated(StopReason::SelectionBudget)
        );
    }

    #[test]
    fn budget_zero_deadline_stops_immediately() {
        let limits = SearchLimits::unbounded().with_deadline(std::time::Duration::ZERO);
        let budget = Budget::new(&limits);
        assert!(!budget.claim());
        assert_eq!(budget.status(), SearchStatus::Truncated(StopReason::Deadline));
    }

    #[test]
    fn only_merged_scans_record_keys() {
        use crate::penalty::PenaltyConfig;

        let a = vec![
            OptionGroup::new(vec![
                occ("A", Weekday::Monday, 9, 10),
                occ("A", Weekday::Tuesday, 9, 10),
            ])
            .unwrap(),
            OptionGroup::new(vec![
                occ("A", Weekday::Tuesday, 9, 10),
                occ("A", Weekday::Monday, 9, 10),
            ])
            .unwrap(),
        ];
        let b = vec![
            single("B", Weekday::Wednesday, 12, 13),
            single("B", Weekday::Monday, 9, 10),
        ];
        let limits = SearchLimits::unbounded();
        let model = PenaltyModel::new(PenaltyConfig::default());
        let planner = Planner::new(&model, &limits);

        let sequential = planner.scan(
            Selections::new(vec![a.as_slice(), b.as_slice()]),
            &Budget::new(&limits),
            false,
        );
        assert!(sequential.keys.is_empty());
        assert_eq!(sequential.candidates.len(), 1);
        assert_eq!(sequential.stats.duplicates, 2);
        assert_eq!(sequential.stats.rejected, 1);

        let merged = planner.scan(
            Selections::new(vec![a.as_slice(), b.as_slice()]),
            &Budget::new(&limits),
            true,
        );
        let indices: Vec<Option<usize>> = merged.keys.iter().map(|(_, i)| *i).collect();
        assert_eq!(indices, vec![Some(0), None]);
        assert_eq!(merged.candidates, sequential.candidates);
    }
}
