//! SnowflakeConfig builder for constructing configuration

use super::{ClockPolicy, Epoch, SnowflakeConfig};

/// Default configuration values
const DEFAULT_CLOCK_POLICY: ClockPolicy = ClockPolicy::Reject;
const DEFAULT_MAX_BACKWARD_WAIT_MS: u64 = 5;
const DEFAULT_SPIN_ENABLED: bool = true;
const DEFAULT_SPIN_LOOPS: u32 = 64;
const DEFAULT_SPIN_YIELD_EVERY: u32 = 16;

/// Builder for SnowflakeConfig
///
/// Ids are range-checked when the generator is initialized, not here.
#[derive(Debug, Clone, Copy)]
pub struct SnowflakeConfigBuilder {
    pub(super) node_id: u8,
    pub(super) worker_id: u8,
    pub(super) epoch: Epoch,
    pub(super) clock_policy: ClockPolicy,
    pub(super) max_backward_wait_ms: u64,
    pub(super) spin_enabled: bool,
    pub(super) spin_loops: u32,
    pub(super) spin_yield_every: u32,
}

impl SnowflakeConfigBuilder {
    /// Create a new SnowflakeConfigBuilder with default values
    pub const fn new() -> Self {
        Self {
            node_id: 0,
            worker_id: 0,
            epoch: Epoch::TWITTER,
            clock_policy: DEFAULT_CLOCK_POLICY,
            max_backward_wait_ms: DEFAULT_MAX_BACKWARD_WAIT_MS,
            spin_enabled: DEFAULT_SPIN_ENABLED,
            spin_loops: DEFAULT_SPIN_LOOPS,
            spin_yield_every: DEFAULT_SPIN_YIELD_EVERY,
        }
    }

    /// Set the node (datacenter) id, valid range 0-31
    pub const fn node_id(mut self, node_id: u8) -> Self {
        self.node_id = node_id;
        self
    }

    /// Set the worker id, valid range 0-31
    pub const fn worker_id(mut self, worker_id: u8) -> Self {
        self.worker_id = worker_id;
        self
    }

    pub const fn epoch(mut self, epoch: Epoch) -> Self {
        self.epoch = epoch;
        self
    }

    /// Set a custom epoch in milliseconds since the Unix epoch
    pub const fn epoch_millis(mut self, millis: i64) -> Self {
        self.epoch = Epoch::from_millis(millis);
        self
    }

    pub const fn clock_policy(mut self, policy: ClockPolicy) -> Self {
        self.clock_policy = policy;
        self
    }

    /// Longest clock regression `ClockPolicy::Wait` will sit out
    pub const fn max_backward_wait_ms(mut self, ms: u64) -> Self {
        self.max_backward_wait_ms = ms;
        self
    }

    /// Enable or disable micro spin before sleep on sequence exhaustion
    pub const fn enable_spin(mut self, enable: bool) -> Self {
        self.spin_enabled = enable;
        self
    }

    /// Set number of spin loops attempted before falling back to sleep
    pub const fn spin_loops(mut self, loops: u32) -> Self {
        self.spin_loops = loops;
        self
    }

    /// Set spin yield cadence. Yield every N spin iterations; 0 disables yielding
    pub const fn spin_yield_every(mut self, n: u32) -> Self {
        self.spin_yield_every = n;
        self
    }

    /// Build the final SnowflakeConfig
    pub fn build(self) -> SnowflakeConfig {
        SnowflakeConfig::from_builder(self)
    }
}

impl Default for SnowflakeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
