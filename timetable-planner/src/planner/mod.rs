//! Timetable planner using exhaustive search.
//!
//! This module implements the core planning algorithm that answers:
//! "Given these courses and their section options, which combinations give
//! me the best week?"
//!
//! The search enumerates every way to pick one option-group per course,
//! scores each distinct schedule with the penalty model, and keeps the ones
//! under the ceiling. Ranking then picks the lowest-penalty schedules.

mod candidate;
mod config;
mod rank;
mod search;
mod signature;


pub use candidate::ScoredCandidate;
pub use config::SearchLimits;
pub use rank::{Ranking, rank};
pub use search::{Planner, SearchOutcome, SearchStats, SearchStatus, StopReason};
pub use signature::Signature;
