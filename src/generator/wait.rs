//! Wait strategies
//!
//! Spin-wait and short sleeps for waiting until the next millisecond,
//! plus the bounded wait used when the clock has stepped backward

use std::thread;
use std::time::{Duration, Instant};

use crate::config::SnowflakeConfig;

/// Longest single sleep while waiting out an exhausted millisecond.
/// The clock ticks in milliseconds, so a longer sleep only adds latency.
pub const SLEEP_STEP: Duration = Duration::from_millis(1);

/// Perform spin-wait loop, checking for timestamp advancement
///
/// Returns Some(new_ts) if timestamp advanced, None if spin loops exhausted
#[inline]
pub fn spin_wait<F>(from_timestamp: i64, config: &SnowflakeConfig, get_time: F) -> Option<i64>
where
    F: Fn() -> i64,
{
    if !config.spin_enabled() || config.spin_loops() == 0 {
        return None;
    }

    let yield_every = config.spin_yield_every();

    for i in 0..config.spin_loops() {
        let new_ts = get_time();
        if new_ts > from_timestamp {
            return Some(new_ts);
        }

        std::hint::spin_loop();

        if yield_every != 0 && i % yield_every == yield_every - 1 {
            thread::yield_now();
        }
    }

    None
}

/// Sleep in `SLEEP_STEP` increments, returning new timestamp once advanced
#[inline]
pub fn sleep_until_next_ms<F>(from_timestamp: i64, get_time: F) -> i64
where
    F: Fn() -> i64,
{
    loop {
        let new_ts = get_time();
        if new_ts > from_timestamp {
            return new_ts;
        }
        thread::sleep(SLEEP_STEP);
    }
}

/// Wait until `get_time` reaches `target`, giving up after `max_wait`
///
/// Returns the caught-up timestamp, or None once the deadline passes.
pub fn wait_for_clock<F>(target: i64, max_wait: Duration, get_time: F) -> Option<i64>
where
    F: Fn() -> i64,
{
    let deadline = Instant::now() + max_wait;
    loop {
        let now = get_time();
        if now >= target {
            return Some(now);
        }
        if Instant::now() >= deadline {
            return None;
        }
        thread::yield_now();
    }
}
