use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_RESULTS_PER_TOPIC, RESULTS_PER_TOPIC_CHOICES};

/// User-tunable generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub results_per_topic: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("results per topic must be one of {RESULTS_PER_TOPIC_CHOICES:?}, got {0}")]
pub struct InvalidSetting(pub u32);

impl Settings {
    /// Build settings from a results-per-topic choice.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not one of the allowed choices.
    pub fn new(results_per_topic: u32) -> Result<Self, InvalidSetting> {
        if RESULTS_PER_TOPIC_CHOICES.contains(&results_per_topic) {
            Ok(Self { results_per_topic })
        } else {
            Err(InvalidSetting(results_per_topic))
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_per_topic: DEFAULT_RESULTS_PER_TOPIC,
        }
    }
}

/// Snapshot of the last generation run. Overwritten each run; no history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Number of videos in the generated feed.
    pub generated: u32,
    /// Wall time of the run in milliseconds.
    pub performance_ms: u64,
    /// RFC 3339 timestamp of the run.
    pub last_generated: String,
}
