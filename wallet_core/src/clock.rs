use dirvote_types::TimestampMs;

/// Source of the instant bound into feature proposals.
pub trait Clock: Send + Sync {
    fn now(&self) -> TimestampMs;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimestampMs {
        TimestampMs::now()
    }
}
