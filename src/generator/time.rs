//! Time sources for Snowflake generation
//!
//! Provides wall-clock time in milliseconds since the Unix epoch

use chrono::Utc;

/// A source of the current time in milliseconds since the Unix epoch.
///
/// The generator subtracts its configured epoch itself, so implementations
/// only report absolute time. Tests plug in a manually driven clock.
pub trait TimeSource: Send + Sync {
    fn unix_millis(&self) -> i64;
}

/// Wall clock backed by the system time.
///
/// The system clock can be stepped backward (NTP corrections, manual changes);
/// the generator detects that and applies its `ClockPolicy`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    #[inline(always)]
    fn unix_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    #[inline(always)]
    fn unix_millis(&self) -> i64 {
        (**self).unix_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    #[inline(always)]
    fn unix_millis(&self) -> i64 {
        (**self).unix_millis()
    }
}
