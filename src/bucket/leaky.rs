use crate::error::BucketError;

use super::{AdmissionControl, BucketConfig, Drain, check_arrivals};

/// Discrete-drain bucket.
///
/// Arrivals are admitted against the remaining room; the drain step removes
/// a fixed `rate` quantity per invocation, independent of wall-clock time.
/// The tick index, not elapsed time, is the unit of progress here.
#[derive(Debug)]
pub struct LeakyBucket {
    config: BucketConfig,
    level: f64,
    total_dropped: f64,
}

impl LeakyBucket {
    #[must_use]
    pub fn new(config: BucketConfig) -> Self {
        Self {
            config,
            level: 0.0,
            total_dropped: 0.0,
        }
    }
}

impl AdmissionControl for LeakyBucket {
    fn admit(&mut self, arrivals: f64) -> Result<f64, BucketError> {
        check_arrivals(arrivals)?;
        let room = self.config.capacity() - self.level;
        let admitted = arrivals.min(room);
        let dropped = arrivals - admitted;
        // min() keeps rounding from nudging the level past capacity.
        self.level = (self.level + admitted).min(self.config.capacity());
        self.total_dropped += dropped;
        Ok(dropped)
    }

    fn level(&self) -> f64 {
        self.level
    }

    fn total_dropped(&self) -> f64 {
        self.total_dropped
    }

    fn as_drainable(&mut self) -> Option<&mut dyn Drain> {
        Some(self)
    }
}

impl Drain for LeakyBucket {
    fn drain(&mut self) -> f64 {
        let leaked = self.level.min(self.config.rate());
        self.level -= leaked;
        leaked
    }
}

#[cfg(test)]
mod tests {
    use super::{AdmissionControl, BucketConfig, Drain, LeakyBucket};
    use crate::error::BucketError;

    fn bucket(capacity: f64, rate: f64) -> LeakyBucket {
        LeakyBucket::new(BucketConfig::new(capacity, rate).unwrap())
    }

    #[test]
    fn admits_then_drains_per_tick() {
        let mut bucket = bucket(20.0, 5.0);

        assert_eq!(bucket.admit(10.0).unwrap(), 0.0);
        assert_eq!(bucket.level(), 10.0);
        assert_eq!(bucket.drain(), 5.0);
        assert_eq!(bucket.level(), 5.0);

        assert_eq!(bucket.admit(10.0).unwrap(), 0.0);
        assert_eq!(bucket.level(), 15.0);
        assert_eq!(bucket.drain(), 5.0);
        assert_eq!(bucket.level(), 10.0);
    }

    #[test]
    fn overflow_is_dropped_and_counted() {
        let mut bucket = bucket(20.0, 5.0);
        assert_eq!(bucket.admit(15.0).unwrap(), 0.0);

        // Only 5 units of room left: the rest of the batch is dropped.
        assert_eq!(bucket.admit(10.0).unwrap(), 5.0);
        assert_eq!(bucket.level(), 20.0);
        assert_eq!(bucket.total_dropped(), 5.0);
    }

    #[test]
    fn zero_arrivals_change_nothing() {
        let mut bucket = bucket(20.0, 5.0);
        bucket.admit(7.0).unwrap();
        assert_eq!(bucket.admit(0.0).unwrap(), 0.0);
        assert_eq!(bucket.level(), 7.0);
        assert_eq!(bucket.total_dropped(), 0.0);
    }

    #[test]
    fn zero_capacity_drops_everything() {
        let mut bucket = bucket(0.0, 5.0);
        assert_eq!(bucket.admit(10.0).unwrap(), 10.0);
        assert_eq!(bucket.level(), 0.0);
        assert_eq!(bucket.total_dropped(), 10.0);
    }

    #[test]
    fn zero_rate_never_drains() {
        let mut bucket = bucket(20.0, 0.0);
        bucket.admit(12.0).unwrap();
        assert_eq!(bucket.drain(), 0.0);
        assert_eq!(bucket.level(), 12.0);
    }

    #[test]
    fn drain_saturates_at_empty() {
        let mut bucket = bucket(20.0, 5.0);
        bucket.admit(3.0).unwrap();
        assert_eq!(bucket.drain(), 3.0);
        assert_eq!(bucket.drain(), 0.0);
        assert_eq!(bucket.level(), 0.0);
    }

    #[test]
    fn negative_arrivals_are_rejected_without_mutation() {
        let mut bucket = bucket(20.0, 5.0);
        bucket.admit(4.0).unwrap();
        assert_eq!(
            bucket.admit(-1.0),
            Err(BucketError::InvalidArrivals { value: -1.0 })
        );
        assert_eq!(bucket.level(), 4.0);
        assert_eq!(bucket.total_dropped(), 0.0);
    }

    #[test]
    fn dropped_sum_matches_counter_over_a_sequence() {
        let mut bucket = bucket(10.0, 2.5);
        let mut sum = 0.0;
        for arrivals in [4.0, 0.0, 9.0, 1.5, 30.0, 0.25] {
            sum += bucket.admit(arrivals).unwrap();
            assert!(bucket.level() >= 0.0 && bucket.level() <= 10.0);
            bucket.drain();
            assert!(bucket.level() >= 0.0 && bucket.level() <= 10.0);
        }
        assert_eq!(bucket.total_dropped(), sum);
    }
}
