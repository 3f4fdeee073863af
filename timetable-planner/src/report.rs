//! Plain-text rendering of ranked schedules.

use std::fmt::Write;

use crate::planner::{Ranking, ScoredCandidate, SearchStatus};

/// Printed after the schedules when fewer exist than were requested.
pub const SHORTFALL_NOTE: &str =
    "Note: there aren't enough timetables that fit your requirements.";

/// Printed when the search kept nothing at all.
pub const INFEASIBLE_NOTE: &str =
    "Uh oh! There aren't any timetables that fit your requirements.";

/// Printed when the search stopped before trying every combination.
pub const PARTIAL_NOTE: &str =
    "Note: the search stopped early, so better timetables may exist.";

/// Render one schedule: its penalty, then each meeting by day and end time.
pub fn render_schedule(candidate: &ScoredCandidate) -> String {
    let mut out = format!("Total penalty: {}\n", candidate.penalty);
    for occurrence in candidate.by_day() {
        let _ = writeln!(out, "{occurrence}");
    }
    out
}

/// Render a ranking for a terminal.
///
/// Schedules are printed worst-first so the best one ends up last, right
/// above the prompt.
pub fn render_ranking(ranking: &Ranking) -> String {
    let rendered: Vec<String> = ranking.schedules.iter().rev().map(render_schedule).collect();
    let mut out = rendered.join("\n");

    if ranking.shortfall() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(SHORTFALL_NOTE);
        out.push('\n');
    }

    out
}

/// Render the full result of a plan: the ranking, or the infeasible note
/// when nothing was kept, then a note if the search was cut short.
pub fn render_report(ranking: &Ranking, status: SearchStatus) -> String {
    let mut out = if ranking.available == 0 {
        format!("{INFEASIBLE_NOTE}\n")
    } else {
        render_ranking(ranking)
    };

    if let SearchStatus::Truncated(_) = status {
        out.push_str(PARTIAL_NOTE);
        out.push('\n');
    }

    out
}
