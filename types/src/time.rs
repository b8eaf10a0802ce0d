//! Millisecond timestamp used by feature proposals and transport envelopes.
//!
//! The transport carries envelope timestamps separately from the signed
//! payload; both are compared at millisecond precision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch (UTC).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampMs(u64);

impl TimestampMs {
    pub const EPOCH: Self = Self(0);

    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Current wall-clock time. A clock set before the epoch reads as zero.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Nanoseconds, as used by the Waku envelope timestamp field.
    pub fn as_nanos(&self) -> u128 {
        u128::from(self.0) * 1_000_000
    }

    /// Truncate a nanosecond value to millisecond precision.
    pub fn from_nanos(nanos: u128) -> Self {
        Self((nanos / 1_000_000) as u64)
    }
}

impl fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nanos_roundtrip_truncates() {
        let ts = TimestampMs::new(1_700_000_000_123);
        assert_eq!(TimestampMs::from_nanos(ts.as_nanos()), ts);
        assert_eq!(TimestampMs::from_nanos(ts.as_nanos() + 999_999), ts);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(TimestampMs::now().as_millis() > 1_577_836_800_000);
    }
}
