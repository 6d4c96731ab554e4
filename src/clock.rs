//! Simulated time.
//!
//! All arrival and burst values are integers in an abstract time unit. The clock maps them
//! onto tokio durations and stamps events relative to the start of the run. Because it reads
//! `tokio::time::Instant`, tests running on a paused runtime observe exact simulated time.

use std::time::Duration;
use tokio::time::Instant;

const NANOS_PER_SEC: u128 = 1_000_000_000;

#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    started: Instant,
    unit: Duration,
}

impl SimClock {
    /// Starts a clock now, with `unit` as the length of one time unit.
    pub fn start(unit: Duration) -> Self {
        Self {
            started: Instant::now(),
            unit,
        }
    }

    /// Real duration of `units` time units, saturating at `Duration::MAX`.
    pub fn units(&self, units: u64) -> Duration {
        let nanos = self.unit.as_nanos().saturating_mul(u128::from(units));
        match u64::try_from(nanos / NANOS_PER_SEC) {
            Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
            Err(_) => Duration::MAX,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
