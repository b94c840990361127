use thiserror::Error;

use crate::config::ConfigError;
use crate::params::ValueError;

/// Represents errors that can occur while building generators or issuing IDs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdError {
    /// Generator configuration was rejected during initialization
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    /// A required parameter is absent from the parameter map
    #[error("Missing parameter `{key}`")]
    MissingParameter { key: String },
    /// A parameter is present but cannot be converted to the expected type
    #[error("Invalid parameter `{key}`: {source}")]
    InvalidParameter {
        key: String,
        #[source]
        source: ValueError,
    },
    /// No generator variant is registered under the given name
    #[error("Unknown generator type `{name}`")]
    UnknownGeneratorType { name: String },
    /// Wall clock regressed past the last recorded timestamp
    #[error("Clock moved backwards from {last} to {now}. Refusing to generate id")]
    ClockMovedBackwards { last: i64, now: i64 },
    /// Elapsed time since the epoch no longer fits the timestamp field
    #[error("Timestamp {timestamp} exceeds the 41-bit timestamp field")]
    TimestampOverflow { timestamp: i64 },
}
