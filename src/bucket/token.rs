use std::time::Duration;

use crate::clock::{Clock, MonotonicClock};
use crate::error::BucketError;

use super::{AdmissionControl, BucketConfig, check_arrivals};

/// Continuous-refill bucket.
///
/// Admissions spend a credit balance that regenerates at `rate` units per
/// second of clock time. Refill happens lazily, right before each admission
/// decision, so there is no drain step to call. The balance starts empty
/// and is capped at capacity: unused time cannot be banked past it.
#[derive(Debug)]
pub struct TokenBucket<C = MonotonicClock> {
    config: BucketConfig,
    clock: C,
    credit: f64,
    last_updated: Duration,
    total_dropped: f64,
}

impl TokenBucket<MonotonicClock> {
    #[must_use]
    pub fn new(config: BucketConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> TokenBucket<C> {
    /// Build a bucket around an injected clock, e.g. a stepped clock for
    /// deterministic tests and simulation runs.
    pub fn with_clock(config: BucketConfig, clock: C) -> Self {
        let last_updated = clock.now();
        Self {
            config,
            clock,
            credit: 0.0,
            last_updated,
            total_dropped: 0.0,
        }
    }

    /// Fold elapsed clock time into the credit balance.
    ///
    /// Saturating subtraction clamps `elapsed` at zero, so a clock reading
    /// that went backwards can never shrink the balance.
    fn refill(&mut self) {
        let now = self.clock.now();
        let elapsed = now.checked_sub(self.last_updated).unwrap_or_default();
        self.credit = (self.credit + elapsed.as_secs_f64() * self.config.rate())
            .min(self.config.capacity());
        self.last_updated = now;
    }
}

impl<C: Clock> AdmissionControl for TokenBucket<C> {
    fn admit(&mut self, arrivals: f64) -> Result<f64, BucketError> {
        check_arrivals(arrivals)?;
        self.refill();
        let dropped = if arrivals <= self.credit {
            self.credit -= arrivals;
            0.0
        } else {
            let dropped = arrivals - self.credit;
            self.credit = 0.0;
            dropped
        };
        self.total_dropped += dropped;
        Ok(dropped)
    }

    fn level(&self) -> f64 {
        self.credit
    }

    fn total_dropped(&self) -> f64 {
        self.total_dropped
    }
}
