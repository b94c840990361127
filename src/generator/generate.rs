//! ID generation logic
//!
//! Core generate() implementation with fast and slow paths

use std::cmp;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tracing::{trace, warn};

use super::state::State;
use super::wait::wait_for_clock;
use super::Snowflake;
use crate::config::ClockPolicy;
use crate::error::IdError;
use crate::interface::IdGenerator;

impl Snowflake {
    /// Generate a new Snowflake id
    ///
    /// The state word is loaded before the clock is read, so a snapshot
    /// published by a concurrent caller can never look newer than `now`
    /// unless the clock itself went backward.
    #[inline]
    pub fn generate(&self) -> Result<i64, IdError> {
        let current = self.load_state();
        let now = self.now_ms();

        // Fast path 1: time advanced
        if now > current.timestamp() {
            if let Some(id) = self.try_claim_millisecond(current, now)? {
                return Ok(id);
            }
        } else if now == current.timestamp() {
            // Fast path 2: same millisecond, sequence available
            if let Some(id) = self.try_increment_sequence(current) {
                return Ok(id);
            }
        }

        self.generate_slow_path()
    }

    #[inline(always)]
    fn load_state(&self) -> State {
        State::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Try to claim new millisecond with sequence 0
    #[inline]
    pub(crate) fn try_claim_millisecond(
        &self,
        current: State,
        new_ts: i64,
    ) -> Result<Option<i64>, IdError> {
        if new_ts > Self::MAX_TIMESTAMP {
            return Err(IdError::TimestampOverflow { timestamp: new_ts });
        }
        let new_state = State::new(new_ts, 0);
        Ok(self
            .cas_state(current, new_state)
            .then(|| self.assemble_id(new_ts, 0)))
    }

    /// Try to increment sequence within current millisecond
    #[inline]
    pub(crate) fn try_increment_sequence(&self, current: State) -> Option<i64> {
        if current.sequence() >= Self::MAX_SEQUENCE {
            return None;
        }
        let new_seq = current.sequence() + 1;
        let new_state = State::new(current.timestamp(), new_seq);
        self.cas_state(current, new_state)
            .then(|| self.assemble_id(current.timestamp(), new_seq))
    }

    /// Atomic compare-and-swap on state
    #[inline(always)]
    pub(crate) fn cas_state(&self, expected: State, new: State) -> bool {
        self.state
            .compare_exchange_weak(expected.raw(), new.raw(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Slow path for contended generation, sequence exhaustion and clock regression
    #[cold]
    #[inline(never)]
    fn generate_slow_path(&self) -> Result<i64, IdError> {
        loop {
            let current = self.load_state();
            let now = self.now_ms();

            match now.cmp(&current.timestamp()) {
                cmp::Ordering::Greater => {
                    if let Some(id) = self.try_claim_millisecond(current, now)? {
                        return Ok(id);
                    }
                }
                cmp::Ordering::Equal => {
                    if let Some(id) = self.try_increment_sequence(current) {
                        return Ok(id);
                    }
                    if current.sequence() >= Self::MAX_SEQUENCE {
                        trace!(
                            timestamp = current.timestamp(),
                            "sequence exhausted, waiting for next millisecond"
                        );
                        self.wait_next_millis(current.timestamp());
                    }
                }
                cmp::Ordering::Less => self.clock_behind(current.timestamp(), now)?,
            }
        }
    }

    /// Apply the configured `ClockPolicy` to a clock that reads behind `last`
    #[cold]
    #[inline(never)]
    fn clock_behind(&self, last: i64, now: i64) -> Result<(), IdError> {
        let behind_ms = last.saturating_sub(now);
        let max_wait_ms = self.config.max_backward_wait_ms();

        if self.config.clock_policy() == ClockPolicy::Wait && (behind_ms as u64) <= max_wait_ms {
            warn!(last, now, behind_ms, "clock moved backwards, waiting for it to catch up");
            let max_wait = Duration::from_millis(max_wait_ms);
            if wait_for_clock(last, max_wait, || self.now_ms()).is_some() {
                return Ok(());
            }
        }

        warn!(last, now, behind_ms, "clock moved backwards, refusing to generate id");
        Err(IdError::ClockMovedBackwards { last, now })
    }
}

impl IdGenerator for Snowflake {
    #[inline]
    fn next_id(&self) -> Result<i64, IdError> {
        self.generate()
    }
}
