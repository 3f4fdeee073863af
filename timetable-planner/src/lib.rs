//! Course timetable planner.
//!
//! Picks one lecture option per course so that every course is covered
//! and the week is as pleasant as possible, then reports the best
//! combinations.

pub mod catalog;
pub mod domain;
pub mod penalty;
pub mod planner;
pub mod report;
