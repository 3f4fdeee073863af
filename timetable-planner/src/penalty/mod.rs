//! Schedule-quality penalties.
//!
//! A candidate schedule is scored by summing independent rules (overlaps,
//! back-to-back meetings, early or late hours, early-week tutorials, days
//! with a single meeting, and Friday presence). Weights live in an
//! explicit [`PenaltyConfig`] handed to the model at construction.

mod config;
mod model;

pub use config::{ConfigError, PenaltyConfig};
pub use model::{Penalty, PenaltyBreakdown, PenaltyModel};
