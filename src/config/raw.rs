use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;
use crate::types::Algorithm;

use super::defaults::{
    default_algorithm, default_arrival_rate, default_capacity, default_rate, default_tick,
    default_total_packets,
};
use super::env::{env_duration, env_parse, env_string};
use super::{HumantimeDuration, SimConfig};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix("SHAPER")
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) bucket: RawBucket,
    #[serde(default)]
    pub(super) sim: RawSim,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawBucket {
    #[serde(default)]
    pub(super) algorithm: Option<String>,
    #[serde(default = "default_capacity")]
    pub(super) capacity: f64,
    #[serde(default = "default_rate")]
    pub(super) rate: f64,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawSim {
    #[serde(default = "default_arrival_rate")]
    pub(super) arrival_rate: f64,
    #[serde(default = "default_total_packets")]
    pub(super) total_packets: f64,
    #[serde(default = "default_tick")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) tick: Duration,
    #[serde(default)]
    pub(super) real_time: bool,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(algorithm) = env_string("SHAPER_ALGORITHM")? {
            self.bucket.algorithm = Some(algorithm);
        }
        if let Some(capacity) = env_parse::<f64>("SHAPER_CAPACITY")? {
            self.bucket.capacity = capacity;
        }
        if let Some(rate) = env_parse::<f64>("SHAPER_RATE")? {
            self.bucket.rate = rate;
        }
        if let Some(arrival_rate) = env_parse::<f64>("SHAPER_ARRIVAL_RATE")? {
            self.sim.arrival_rate = arrival_rate;
        }
        if let Some(total_packets) = env_parse::<f64>("SHAPER_TOTAL_PACKETS")? {
            self.sim.total_packets = total_packets;
        }
        if let Some(tick) = env_duration("SHAPER_TICK")? {
            self.sim.tick = tick;
        }
        if let Some(real_time) = env_parse::<bool>("SHAPER_REAL_TIME")? {
            self.sim.real_time = real_time;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<SimConfig> {
        let algorithm_src = self.bucket.algorithm.unwrap_or_else(default_algorithm);
        let algorithm = Algorithm::from_str(&algorithm_src).map_err(|err| {
            ConfigError::InvalidField {
                field: "bucket.algorithm",
                message: err,
            }
        })?;

        require_non_negative("bucket.capacity", self.bucket.capacity)?;
        require_non_negative("bucket.rate", self.bucket.rate)?;
        require_positive("sim.arrival_rate", self.sim.arrival_rate)?;
        require_positive("sim.total_packets", self.sim.total_packets)?;
        if self.sim.tick.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "sim.tick",
                message: "tick duration must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(SimConfig {
            algorithm,
            capacity: self.bucket.capacity,
            rate: self.bucket.rate,
            arrival_rate: self.sim.arrival_rate,
            total_packets: self.sim.total_packets,
            tick: self.sim.tick,
            real_time: self.sim.real_time,
        })
    }
}

fn require_non_negative(field: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidField {
            field,
            message: format!("expected a non-negative finite number, got {value}"),
        });
    }
    Ok(())
}

fn require_positive(field: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidField {
            field,
            message: format!("expected a positive finite number, got {value}"),
        });
    }
    Ok(())
}

impl Default for RawBucket {
    fn default() -> Self {
        Self {
            algorithm: Some(default_algorithm()),
            capacity: default_capacity(),
            rate: default_rate(),
        }
    }
}

impl Default for RawSim {
    fn default() -> Self {
        Self {
            arrival_rate: default_arrival_rate(),
            total_packets: default_total_packets(),
            tick: default_tick(),
            real_time: false,
        }
    }
}
