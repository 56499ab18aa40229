use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::constants::{
    DEFAULT_BATCH_DELAY_MS, DEFAULT_BATCH_SIZE, DEFAULT_MIN_FEED_SIZE, DEFAULT_MIN_QUERY_FANOUT,
    DEFAULT_QUERIES_PER_TOPIC,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Search endpoint
    pub search_base_url: String,

    // Database
    pub database_path: PathBuf,

    // Query expansion caps. The floor/multiplier constants are heuristics
    // inherited from the original feed behavior; they are configurable rather
    // than derived.
    pub min_query_fanout: usize,
    pub queries_per_topic: usize,

    // Aggregation
    pub min_feed_size: usize,
    pub batch_size: usize,
    pub batch_delay: Duration,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            search_base_url: env_or_default("SEARCH_BASE_URL", "https://www.youtube.com"),

            database_path: PathBuf::from(env_or_default(
                "DATABASE_PATH",
                "./data/recommender.sqlite",
            )),

            min_query_fanout: parse_env_usize("MIN_QUERY_FANOUT", DEFAULT_MIN_QUERY_FANOUT)?,
            queries_per_topic: parse_env_usize("QUERIES_PER_TOPIC", DEFAULT_QUERIES_PER_TOPIC)?,

            min_feed_size: parse_env_usize("MIN_FEED_SIZE", DEFAULT_MIN_FEED_SIZE)?,
            batch_size: parse_env_usize("FETCH_BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
            batch_delay: Duration::from_millis(parse_env_u64(
                "FETCH_BATCH_DELAY_MS",
                DEFAULT_BATCH_DELAY_MS,
            )?),

            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.search_base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                name: "SEARCH_BASE_URL".to_string(),
                message: format!("not a valid URL: {}", self.search_base_url),
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "FETCH_BATCH_SIZE".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.queries_per_topic == 0 {
            return Err(ConfigError::InvalidValue {
                name: "QUERIES_PER_TOPIC".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Configuration for tests: defaults everywhere, overridable per field.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            search_base_url: "http://localhost".to_string(),
            database_path: PathBuf::from(":memory:"),
            min_query_fanout: DEFAULT_MIN_QUERY_FANOUT,
            queries_per_topic: DEFAULT_QUERIES_PER_TOPIC,
            min_feed_size: DEFAULT_MIN_FEED_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: Duration::from_millis(0),
            web_host: "127.0.0.1".to_string(),
            web_port: 0,
        }
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_batch_size() {
        let config = Config {
            batch_size: 0,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = Config {
            search_base_url: "not a url".to_string(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_testing_config_is_valid() {
        assert!(Config::for_testing().validate().is_ok());
    }
}
