//! Catalog ingestion and storage error types.

use std::path::PathBuf;

use crate::domain::ValidationError;

/// Errors raised while building a catalog from timeslot listings.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// A value failed domain validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A listing line failed validation
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: ValidationError,
    },

    /// Session count line is not a positive integer
    #[error("line {line}: invalid sessions per week {value:?} for {course}")]
    InvalidSessions {
        line: usize,
        course: String,
        value: String,
    },

    /// A timeslot was given before any course
    #[error("timeslot given before any course")]
    NoCourse,

    /// A course's timeslots do not divide evenly into option-groups
    #[error("{course}: {leftover} timeslot(s) left over; expected groups of {sessions}")]
    IncompleteGroup {
        course: String,
        leftover: usize,
        sessions: usize,
    },
}

/// Errors from reading or writing a stored catalog.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("catalog file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a valid catalog
    #[error("catalog file {} is invalid: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
