//! Combined atomic state for timestamp + sequence
//!
//! Packs the last timestamp and its sequence into a single u64 for lock-free CAS

use crate::Snowflake;

/// Combined state: upper bits = timestamp, lower 12 bits = sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct State(u64);

impl State {
    /// Number of bits used for sequence
    pub const SEQ_BITS: u32 = Snowflake::SEQUENCE_BITS;

    /// Mask to extract sequence from raw value
    pub const SEQ_MASK: u64 = (1 << Self::SEQ_BITS) - 1;

    /// Create new state from timestamp and sequence
    #[inline(always)]
    pub const fn new(timestamp: i64, sequence: u16) -> Self {
        Self(((timestamp as u64) << Self::SEQ_BITS) | (sequence as u64 & Self::SEQ_MASK))
    }

    /// Extract timestamp from state
    #[inline(always)]
    pub const fn timestamp(self) -> i64 {
        (self.0 >> Self::SEQ_BITS) as i64
    }

    /// Extract sequence from state
    #[inline(always)]
    pub const fn sequence(self) -> u16 {
        (self.0 & Self::SEQ_MASK) as u16
    }

    /// Get raw u64 value for atomic operations
    #[inline(always)]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Create state from raw u64 value
    #[inline(always)]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}
