//! Topic validation.
//!
//! Topics are user input; everything downstream (expansion tables, persisted
//! list) assumes the canonical form produced here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum character length of a topic after trimming.
pub const MIN_TOPIC_LEN: usize = 2;

/// Maximum character length of a topic after trimming.
pub const MAX_TOPIC_LEN: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopicError {
    #[error("topic must be at least {MIN_TOPIC_LEN} characters")]
    TooShort,
    #[error("topic must be at most {MAX_TOPIC_LEN} characters")]
    TooLong,
}

/// A validated topic: trimmed, lowercased, length-bounded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    /// Canonicalize and validate raw user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is shorter than
    /// [`MIN_TOPIC_LEN`] or longer than [`MAX_TOPIC_LEN`] characters.
    pub fn parse(raw: &str) -> Result<Self, TopicError> {
        let canonical = raw.trim().to_lowercase();
        let len = canonical.chars().count();
        if len < MIN_TOPIC_LEN {
            return Err(TopicError::TooShort);
        }
        if len > MAX_TOPIC_LEN {
            return Err(TopicError::TooLong);
        }
        Ok(Self(canonical))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
