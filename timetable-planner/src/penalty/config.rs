//! Penalty weights and the consideration ceiling.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error loading a penalty configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid configuration
    #[error("invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration parameters for schedule scoring.
///
/// Every field is a non-negative integer. Values are not range-checked;
/// choosing sensible weights is the caller's business. In JSON the fields
/// use camelCase names and any omitted field keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PenaltyConfig {
    /// Penalty per pair of overlapping occurrences.
    /// Large enough that the ceiling removes clashing schedules outright.
    pub overlap_penalty: u32,

    /// Penalty per pair of back-to-back occurrences.
    pub back_to_back_penalty: u32,

    /// Penalty per day a tutorial sits before Friday.
    pub early_tutorial_penalty_per_day: u32,

    /// Penalty per weekday with exactly one occurrence.
    pub single_lecture_day_penalty: u32,

    /// Earliest start hour (24h) that is not penalised.
    pub earliest_hour: u8,

    /// Penalty per hour an occurrence starts before `earliest_hour`.
    pub early_penalty_per_hour: u32,

    /// Latest end hour (24h) that is not penalised.
    pub latest_hour: u8,

    /// Penalty per hour an occurrence ends after `latest_hour`.
    pub late_penalty_per_hour: u32,

    /// Flat penalty if anything is scheduled on Friday.
    pub friday_penalty: u32,

    /// Maximum total penalty for a schedule to be kept.
    pub max_consideration_ceiling: u32,
}

impl PenaltyConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set a custom ceiling.
    pub fn with_ceiling(mut self, ceiling: u32) -> Self {
        self.max_consideration_ceiling = ceiling;
        self
    }
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            overlap_penalty: 5000,
            back_to_back_penalty: 100,
            early_tutorial_penalty_per_day: 1,
            single_lecture_day_penalty: 1,
            earliest_hour: 11,
            early_penalty_per_hour: 2,
            latest_hour: 18,
            late_penalty_per_hour: 10,
            friday_penalty: 0,
            max_consideration_ceiling: 5000,
        }
    }
}
