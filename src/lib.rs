//! # flakeid
//!
//! Snowflake-style 64-bit identifiers issued without a coordinator.
//!
//! Generated ids are:
//! - Unique per generator, and across generators with distinct node/worker ids
//! - Time-sorted and monotonic
//! - Thread-safe through a lock-free compare-and-swap state word
//!
//! Generators are built either directly from a [`SnowflakeConfig`] or by name
//! from a parameter map with [`build`].

#![forbid(unsafe_code)]

mod config;
mod error;
mod extractor;
mod generator;
mod interface;
pub mod params;
pub mod registry;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::{
    ClockPolicy, ConfigError, Epoch, SnowflakeConfig, SnowflakeConfigBuilder, UnknownClockPolicy,
};
pub use error::IdError;
pub use extractor::{SnowflakeExtractor, SnowflakeParts};
pub use generator::time::{SystemClock, TimeSource};
pub use generator::Snowflake;
pub use interface::{IdGenerator, Initialize};
pub use params::{Parameters, ValueError};
pub use registry::{build, Generator, GeneratorKind};
