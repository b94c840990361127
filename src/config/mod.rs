//! Configuration for the Snowflake generator

mod builder;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

pub use builder::SnowflakeConfigBuilder;

use crate::Snowflake;

/// Errors raised while validating a `SnowflakeConfig`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Node ID {node_id} is invalid. Maximum allowed value is {max}")]
    NodeIdOutOfRange { node_id: i64, max: u8 },
    #[error("Worker ID {worker_id} is invalid. Maximum allowed value is {max}")]
    WorkerIdOutOfRange { worker_id: i64, max: u8 },
    /// The epoch lies after the current time, which would give a negative timestamp field
    #[error("Epoch {epoch} is ahead of the current time {now}")]
    EpochInFuture { epoch: i64, now: i64 },
    /// The epoch lies so far back that the current time no longer fits the timestamp field
    #[error("Epoch {epoch} is more than 2^41 ms before the current time {now}")]
    EpochTooOld { epoch: i64, now: i64 },
}

/// Reference instant that generated timestamps are measured from,
/// stored as milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(i64);

impl Epoch {
    /// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
    pub const TWITTER: Epoch = Epoch(1_288_834_974_657);

    /// Unix epoch, January 1, 1970 UTC
    pub const UNIX: Epoch = Epoch(0);

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self(at.timestamp_millis())
    }

    #[inline(always)]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// The epoch as a UTC date, `None` if it falls outside chrono's range
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl Default for Epoch {
    fn default() -> Self {
        Self::TWITTER
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(at) => write!(f, "{}", at.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// What `next_id` does when the clock is observed behind the last issued timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClockPolicy {
    /// Fail immediately with `IdError::ClockMovedBackwards`
    #[default]
    Reject,
    /// Wait up to `max_backward_wait_ms` for the clock to catch up, then reject
    Wait,
}

impl ClockPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            ClockPolicy::Reject => "reject",
            ClockPolicy::Wait => "wait",
        }
    }
}

/// Error returned when a string names no `ClockPolicy`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown clock policy `{0}`, expected `reject` or `wait`")]
pub struct UnknownClockPolicy(pub String);

impl FromStr for ClockPolicy {
    type Err = UnknownClockPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("reject") {
            Ok(ClockPolicy::Reject)
        } else if s.eq_ignore_ascii_case("wait") {
            Ok(ClockPolicy::Wait)
        } else {
            Err(UnknownClockPolicy(s.to_owned()))
        }
    }
}

/// Configuration for the Snowflake generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnowflakeConfig {
    node_id: u8,
    worker_id: u8,
    epoch: Epoch,
    clock_policy: ClockPolicy,
    max_backward_wait_ms: u64,
    spin_enabled: bool,
    spin_loops: u32,
    spin_yield_every: u32,
}

impl SnowflakeConfig {
    /// Create config with the given ids and defaults for everything else
    pub fn new(node_id: u8, worker_id: u8) -> Self {
        Self::builder().node_id(node_id).worker_id(worker_id).build()
    }

    pub(crate) fn from_builder(b: SnowflakeConfigBuilder) -> Self {
        Self {
            node_id: b.node_id,
            worker_id: b.worker_id,
            epoch: b.epoch,
            clock_policy: b.clock_policy,
            max_backward_wait_ms: b.max_backward_wait_ms,
            spin_enabled: b.spin_enabled,
            spin_loops: b.spin_loops,
            spin_yield_every: b.spin_yield_every,
        }
    }

    /// Create a new configuration builder
    pub fn builder() -> SnowflakeConfigBuilder {
        SnowflakeConfigBuilder::new()
    }

    /// Check id ranges and that `now_unix_ms` lies within the timestamp range of the epoch
    pub fn validate(&self, now_unix_ms: i64) -> Result<(), ConfigError> {
        if self.node_id > Snowflake::MAX_NODE_ID {
            return Err(ConfigError::NodeIdOutOfRange {
                node_id: self.node_id.into(),
                max: Snowflake::MAX_NODE_ID,
            });
        }
        if self.worker_id > Snowflake::MAX_WORKER_ID {
            return Err(ConfigError::WorkerIdOutOfRange {
                worker_id: self.worker_id.into(),
                max: Snowflake::MAX_WORKER_ID,
            });
        }
        if self.epoch.as_millis() > now_unix_ms {
            return Err(ConfigError::EpochInFuture {
                epoch: self.epoch.as_millis(),
                now: now_unix_ms,
            });
        }
        if now_unix_ms.saturating_sub(self.epoch.as_millis()) > Snowflake::MAX_TIMESTAMP {
            return Err(ConfigError::EpochTooOld {
                epoch: self.epoch.as_millis(),
                now: now_unix_ms,
            });
        }
        Ok(())
    }

    #[inline(always)]
    pub const fn node_id(&self) -> u8 {
        self.node_id
    }

    #[inline(always)]
    pub const fn worker_id(&self) -> u8 {
        self.worker_id
    }

    #[inline(always)]
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    #[inline(always)]
    pub const fn clock_policy(&self) -> ClockPolicy {
        self.clock_policy
    }

    #[inline(always)]
    pub const fn max_backward_wait_ms(&self) -> u64 {
        self.max_backward_wait_ms
    }

    #[inline(always)]
    pub const fn spin_enabled(&self) -> bool {
        self.spin_enabled
    }

    #[inline(always)]
    pub const fn spin_loops(&self) -> u32 {
        self.spin_loops
    }

    #[inline(always)]
    pub const fn spin_yield_every(&self) -> u32 {
        self.spin_yield_every
    }
}

impl Default for SnowflakeConfig {
    fn default() -> Self {
        SnowflakeConfigBuilder::new().build()
    }
}
