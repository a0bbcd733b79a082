//! Timestamp generation for ICE3X API authentication.
//!
//! Every signed request carries the Unix epoch time in milliseconds, both in
//! the `timestamp` header and inside the signed message.

use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing request timestamps.
///
/// Swap in a fixed implementation to make signatures reproducible in tests.
pub trait TimestampProvider: Send + Sync {
    /// Current time as Unix epoch milliseconds.
    fn timestamp_millis(&self) -> u64;
}

/// Reads the system clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimestampProvider for SystemClock {
    fn timestamp_millis(&self) -> u64 {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        u64::try_from(millis).unwrap_or(u64::MAX)
    }
}
