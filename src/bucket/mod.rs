//! Traffic-shaping buckets behind a uniform admission contract.
//!
//! Both disciplines account arrivals the same way: a batch is offered, what
//! fits is admitted, the excess is dropped and reported back to the caller.
//! They differ only in how buffered content goes away: the leaky bucket
//! drains a fixed quantity per explicit tick, the token bucket folds a
//! time-proportional refill into every admission decision.

mod leaky;
mod token;

pub use leaky::LeakyBucket;
pub use token::TokenBucket;

use crate::error::BucketError;

/// Immutable bucket parameters, validated at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BucketConfig {
    capacity: f64,
    rate: f64,
}

impl BucketConfig {
    /// Build a config from a capacity and a rate.
    ///
    /// `rate` means "units drained per drain call" for the leaky bucket and
    /// "units regenerated per second" for the token bucket.
    ///
    /// # Errors
    ///
    /// Returns an error when either value is negative or not finite.
    pub fn new(capacity: f64, rate: f64) -> Result<Self, BucketError> {
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(BucketError::InvalidConfig {
                field: "capacity",
                value: capacity,
            });
        }
        if !rate.is_finite() || rate < 0.0 {
            return Err(BucketError::InvalidConfig {
                field: "rate",
                value: rate,
            });
        }
        Ok(Self { capacity, rate })
    }

    #[must_use]
    pub const fn capacity(&self) -> f64 {
        self.capacity
    }

    #[must_use]
    pub const fn rate(&self) -> f64 {
        self.rate
    }
}

/// Uniform admission contract over both shaping disciplines.
///
/// A driver calls [`admit`](Self::admit) unconditionally and reaches the
/// explicit drain step, when the discipline has one, through
/// [`as_drainable`](Self::as_drainable) instead of branching on the
/// algorithm.
pub trait AdmissionControl {
    /// Offer a batch of arrivals and return how much of it was dropped.
    ///
    /// The returned value is `max(0, arrivals - available room or credit)`;
    /// overflowing the bucket is normal behavior, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when `arrivals` is negative or not finite. State is
    /// untouched in that case.
    fn admit(&mut self, arrivals: f64) -> Result<f64, BucketError>;

    /// Current buffered level (leaky) or credit balance (token).
    fn level(&self) -> f64;

    /// Running sum of every value `admit` has ever returned.
    fn total_dropped(&self) -> f64;

    /// Capability accessor for the explicit per-tick drain step.
    fn as_drainable(&mut self) -> Option<&mut dyn Drain> {
        None
    }
}

/// Explicit drain capability, exposed only by the discrete-drain discipline.
pub trait Drain {
    /// Remove up to one tick's worth of buffered content, returning the
    /// amount leaked.
    fn drain(&mut self) -> f64;
}

fn check_arrivals(arrivals: f64) -> Result<(), BucketError> {
    if !arrivals.is_finite() || arrivals < 0.0 {
        return Err(BucketError::InvalidArrivals { value: arrivals });
    }
    Ok(())
}
