use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic elapsed-time source consumed by the continuous-refill bucket.
///
/// Implementations report time elapsed since an arbitrary fixed origin and
/// must never go backwards. The bucket clamps on its side anyway, so a
/// misbehaving source degrades to "no refill" instead of negative credit.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Production clock anchored to an `Instant` taken at construction.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock for tests and deterministic simulation runs.
///
/// Handles are cheap clones sharing one reading, so a driver can keep one
/// handle and give another to the bucket it steps.
#[derive(Clone, Debug, Default)]
pub struct SteppedClock {
    nanos: Arc<AtomicU64>,
}

impl SteppedClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, step: Duration) {
        self.nanos
            .fetch_add(step.as_nanos() as u64, Ordering::Relaxed);
    }
}

impl Clock for SteppedClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, MonotonicClock, SteppedClock};
    use std::time::Duration;

    #[test]
    fn stepped_clock_handles_share_one_reading() {
        let clock = SteppedClock::new();
        let handle = clock.clone();
        assert_eq!(handle.now(), Duration::ZERO);
        clock.advance(Duration::from_secs(3));
        assert_eq!(handle.now(), Duration::from_secs(3));
        handle.advance(Duration::from_millis(500));
        assert_eq!(clock.now(), Duration::from_millis(3500));
    }

    #[test]
    fn monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
