use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::error::Error as ShaperError;
use crate::types::Algorithm;

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use serde::HumantimeDuration;

/// Resolved simulation parameters.
///
/// `capacity` and `rate` parameterize the bucket; the rest drives the tick
/// loop. Values are validated when built, so a `SimConfig` in hand is
/// always usable.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub algorithm: Algorithm,
    pub capacity: f64,
    pub rate: f64,
    pub arrival_rate: f64,
    pub total_packets: f64,
    pub tick: Duration,
    pub real_time: bool,
}

impl SimConfig {
    /// Load configuration from a file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be parsed, when
    /// environment overrides are invalid, or when the resulting values fail
    /// validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ShaperError::from)?;
        raw.apply_env_overrides().map_err(ShaperError::from)?;
        raw.validate_and_build()
    }
}
