//! Generator variants and the builder that constructs them by name

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::config::{ClockPolicy, ConfigError, Epoch, SnowflakeConfig};
use crate::error::IdError;
use crate::interface::{IdGenerator, Initialize};
use crate::params::{require, try_get, Parameters};
use crate::Snowflake;

/// Parameter keys read by the Snowflake variant
pub mod keys {
    pub const NODE_ID: &str = "nodeId";
    pub const WORKER_ID: &str = "workerId";
    pub const EPOCH: &str = "epoch";
    pub const CLOCK_POLICY: &str = "clockPolicy";
    pub const MAX_BACKWARD_WAIT_MS: &str = "maxBackwardWaitMs";
    pub const SPIN_ENABLED: &str = "spinEnabled";
    pub const SPIN_LOOPS: &str = "spinLoops";
    pub const SPIN_YIELD_EVERY: &str = "spinYieldEvery";
}

/// Every generator variant the builder knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    Snowflake,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 1] = [GeneratorKind::Snowflake];

    /// Registered name of the variant
    pub const fn name(self) -> &'static str {
        match self {
            GeneratorKind::Snowflake => "snowflake",
        }
    }

    /// Parse the variant's typed config from `params` and initialize it
    pub fn build(self, params: &Parameters) -> Result<Generator, IdError> {
        match self {
            GeneratorKind::Snowflake => {
                let config = snowflake_config(params)?;
                Ok(Generator::Snowflake(Snowflake::initialize(config)?))
            }
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names are matched case-insensitively
impl FromStr for GeneratorKind {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| IdError::UnknownGeneratorType { name: s.to_owned() })
    }
}

/// A ready generator of one of the known variants
#[derive(Debug)]
pub enum Generator {
    Snowflake(Snowflake),
}

impl Generator {
    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Snowflake(_) => GeneratorKind::Snowflake,
        }
    }

    pub fn as_snowflake(&self) -> Option<&Snowflake> {
        match self {
            Generator::Snowflake(g) => Some(g),
        }
    }
}

impl IdGenerator for Generator {
    #[inline]
    fn next_id(&self) -> Result<i64, IdError> {
        match self {
            Generator::Snowflake(g) => g.next_id(),
        }
    }
}

/// Build a generator from its variant name and parameter map
///
/// ```
/// use flakeid::{build, IdGenerator};
/// use serde_json::json;
///
/// let params = json!({"nodeId": 1, "workerId": 2});
/// let generator = build("snowflake", params.as_object().unwrap()).unwrap();
/// let id = generator.next_id().unwrap();
/// assert!(id > 0);
/// ```
#[instrument(level = "debug", skip(params), err)]
pub fn build(variant: &str, params: &Parameters) -> Result<Generator, IdError> {
    let kind: GeneratorKind = variant.parse()?;
    debug!(%kind, "resolved generator variant");
    kind.build(params)
}

fn snowflake_config(params: &Parameters) -> Result<SnowflakeConfig, IdError> {
    let node_id = require::<i64>(params, keys::NODE_ID)?;
    let worker_id = require::<i64>(params, keys::WORKER_ID)?;

    let node_id = u8::try_from(node_id).map_err(|_| ConfigError::NodeIdOutOfRange {
        node_id,
        max: Snowflake::MAX_NODE_ID,
    })?;
    let worker_id = u8::try_from(worker_id).map_err(|_| ConfigError::WorkerIdOutOfRange {
        worker_id,
        max: Snowflake::MAX_WORKER_ID,
    })?;

    let mut builder = SnowflakeConfig::builder().node_id(node_id).worker_id(worker_id);

    if let Some(epoch) = try_get::<Epoch>(params, keys::EPOCH)? {
        builder = builder.epoch(epoch);
    }
    if let Some(policy) = try_get::<ClockPolicy>(params, keys::CLOCK_POLICY)? {
        builder = builder.clock_policy(policy);
    }
    if let Some(ms) = try_get::<u64>(params, keys::MAX_BACKWARD_WAIT_MS)? {
        builder = builder.max_backward_wait_ms(ms);
    }
    if let Some(enabled) = try_get::<bool>(params, keys::SPIN_ENABLED)? {
        builder = builder.enable_spin(enabled);
    }
    if let Some(loops) = try_get::<u32>(params, keys::SPIN_LOOPS)? {
        builder = builder.spin_loops(loops);
    }
    if let Some(n) = try_get::<u32>(params, keys::SPIN_YIELD_EVERY)? {
        builder = builder.spin_yield_every(n);
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!("snowflake".parse::<GeneratorKind>().unwrap(), GeneratorKind::Snowflake);
        assert_eq!("Snowflake".parse::<GeneratorKind>().unwrap(), GeneratorKind::Snowflake);
        assert_eq!(GeneratorKind::Snowflake.to_string(), "snowflake");
        assert_eq!(
            "uuid".parse::<GeneratorKind>().unwrap_err(),
            IdError::UnknownGeneratorType {
                name: "uuid".into()
            }
        );
    }
}
