use std::path::PathBuf;

use shaper::Result;
use shaper::bucket::BucketConfig;
use shaper::config::SimConfig;
use shaper::error::{ConfigError, Error as ShaperError};
use shaper::sim::{Simulation, tick_count};
use shaper::telemetry::init_tracing;
use tokio::signal;
use tokio::time::sleep;
use tracing::info;

use super::cli::Cli;
use super::render;

const DEFAULT_CONFIG: &str = "shaper.toml";

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = SimConfig::from_env_and_file(&config_path)?;
    apply_cli_overrides(&mut config, &cli)?;

    let bucket = BucketConfig::new(config.capacity, config.rate).map_err(ShaperError::from)?;
    let mut sim = Simulation::new(config.algorithm, bucket, config.tick);

    info!(
        algorithm = %config.algorithm,
        capacity = config.capacity,
        rate = config.rate,
        arrival_rate = config.arrival_rate,
        "starting simulation"
    );

    let ticks = tick_count(config.total_packets, config.arrival_rate);
    let mut records = Vec::with_capacity(ticks as usize);
    for _ in 0..ticks {
        records.push(sim.step(config.arrival_rate)?);

        if config.real_time {
            tokio::select! {
                biased;
                _ = signal::ctrl_c() => {
                    info!("shutdown signal received, stopping simulation");
                    break;
                }
                _ = sleep(config.tick) => {}
            }
        }
    }

    let summary = sim.summary();
    if cli.json {
        for record in &records {
            println!("{}", render::to_json(record)?);
        }
        println!("{}", render::to_json(&summary)?);
    } else {
        print!("{}", render::table(&records));
        println!();
        print!("{}", render::summary(&summary));
    }

    Ok(())
}

fn apply_cli_overrides(config: &mut SimConfig, cli: &Cli) -> Result<()> {
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(capacity) = cli.capacity {
        require_non_negative("cli.capacity", capacity)?;
        config.capacity = capacity;
    }
    if let Some(rate) = cli.rate {
        require_non_negative("cli.rate", rate)?;
        config.rate = rate;
    }
    if let Some(arrival_rate) = cli.arrival_rate {
        require_positive("cli.arrival_rate", arrival_rate)?;
        config.arrival_rate = arrival_rate;
    }
    if let Some(total_packets) = cli.total_packets {
        require_positive("cli.total_packets", total_packets)?;
        config.total_packets = total_packets;
    }
    if let Some(tick) = cli.tick {
        if tick.is_zero() {
            return Err(ShaperError::from(ConfigError::InvalidField {
                field: "cli.tick",
                message: "tick duration must be greater than zero".to_string(),
            }));
        }
        config.tick = tick;
    }
    if cli.real_time {
        config.real_time = true;
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ShaperError::from(ConfigError::InvalidField {
            field,
            message: format!("expected a non-negative finite number, got {value}"),
        }));
    }
    Ok(())
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ShaperError::from(ConfigError::InvalidField {
            field,
            message: format!("expected a positive finite number, got {value}"),
        }));
    }
    Ok(())
}
