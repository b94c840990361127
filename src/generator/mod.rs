//! Core Snowflake generator implementation
//!
//! Split into modules for testability:
//! - `state` - Combined atomic state (timestamp + sequence)
//! - `time` - Time sources
//! - `wait` - Spin, sleep and clock catch-up strategies
//! - `generate` - ID generation logic

mod generate;
mod state;
pub(crate) mod time;
mod wait;

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::config::SnowflakeConfig;
use crate::error::IdError;
use crate::extractor::SnowflakeExtractor;
use crate::interface::Initialize;

use state::State;
use time::{SystemClock, TimeSource};
use wait::{sleep_until_next_ms, spin_wait};

static GLOBAL: OnceCell<Snowflake> = OnceCell::new();

/// Lock-free Snowflake generator with cache-line alignment
///
/// Layout of every issued id, most significant bit first:
/// sign (1, always 0) | timestamp (41) | node (5) | worker (5) | sequence (12)
#[repr(align(64))]
pub struct Snowflake {
    // === Hot path fields ===
    pub(crate) state: AtomicU64,
    id_prefix: u64,
    epoch: i64,
    clock: Arc<dyn TimeSource>,

    // === Cold path fields ===
    pub config: SnowflakeConfig,
    pub extract: SnowflakeExtractor,
}

impl Snowflake {
    pub const TIMESTAMP_BITS: u32 = 41;
    pub const NODE_BITS: u32 = 5;
    pub const WORKER_BITS: u32 = 5;
    pub const SEQUENCE_BITS: u32 = 12;

    pub const WORKER_SHIFT: u32 = Self::SEQUENCE_BITS;
    pub const NODE_SHIFT: u32 = Self::WORKER_SHIFT + Self::WORKER_BITS;
    pub const TIMESTAMP_SHIFT: u32 = Self::NODE_SHIFT + Self::NODE_BITS;

    pub const MAX_NODE_ID: u8 = (1 << Self::NODE_BITS) - 1;
    pub const MAX_WORKER_ID: u8 = (1 << Self::WORKER_BITS) - 1;
    pub const MAX_SEQUENCE: u16 = (1 << Self::SEQUENCE_BITS) - 1;
    pub const MAX_TIMESTAMP: i64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Create with the given node and worker ids and default configuration
    pub fn new(node_id: u8, worker_id: u8) -> Result<Self, IdError> {
        Self::initialize(SnowflakeConfig::new(node_id, worker_id))
    }

    /// Create with a custom time source
    pub fn with_clock<C>(config: SnowflakeConfig, clock: C) -> Result<Self, IdError>
    where
        C: TimeSource + 'static,
    {
        let clock: Arc<dyn TimeSource> = Arc::new(clock);
        config.validate(clock.unix_millis())?;

        debug!(
            node_id = config.node_id(),
            worker_id = config.worker_id(),
            epoch = %config.epoch(),
            clock_policy = config.clock_policy().name(),
            "snowflake generator initialized"
        );

        Ok(Self {
            state: AtomicU64::new(State::new(0, 0).raw()),
            id_prefix: Self::compute_id_prefix(&config),
            epoch: config.epoch().as_millis(),
            clock,
            config,
            extract: SnowflakeExtractor,
        })
    }

    /// Process-wide generator for node 0 / worker 0, built on first use
    pub fn global() -> Result<&'static Snowflake, IdError> {
        GLOBAL.get_or_try_init(|| Self::initialize(SnowflakeConfig::default()))
    }

    #[inline(always)]
    fn compute_id_prefix(config: &SnowflakeConfig) -> u64 {
        ((config.node_id() as u64) << Self::NODE_SHIFT)
            | ((config.worker_id() as u64) << Self::WORKER_SHIFT)
    }

    /// Milliseconds elapsed since the configured epoch
    #[inline(always)]
    pub(crate) fn now_ms(&self) -> i64 {
        self.clock.unix_millis().saturating_sub(self.epoch)
    }

    pub(crate) fn wait_next_millis(&self, from_ts: i64) -> i64 {
        if let Some(new_ts) = spin_wait(from_ts, &self.config, || self.now_ms()) {
            return new_ts;
        }
        sleep_until_next_ms(from_ts, || self.now_ms())
    }

    #[inline(always)]
    pub(crate) fn assemble_id(&self, timestamp: i64, sequence: u16) -> i64 {
        (((timestamp as u64) << Self::TIMESTAMP_SHIFT) | self.id_prefix | sequence as u64) as i64
    }
}

impl Initialize for Snowflake {
    type Config = SnowflakeConfig;

    fn initialize(config: SnowflakeConfig) -> Result<Self, IdError> {
        Self::with_clock(config, SystemClock)
    }
}

impl fmt::Debug for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = State::from_raw(self.state.load(std::sync::atomic::Ordering::Relaxed));
        f.debug_struct("Snowflake")
            .field("node_id", &self.config.node_id())
            .field("worker_id", &self.config.worker_id())
            .field("epoch", &self.config.epoch())
            .field("last_timestamp", &state.timestamp())
            .field("sequence", &state.sequence())
            .finish_non_exhaustive()
    }
}
