use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;
use shaper::types::Algorithm;

#[derive(Parser, Debug)]
#[command(author, version, about = "Traffic-shaping bucket simulator", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Shaping discipline: "leaky" or "token".
    #[arg(long)]
    pub algorithm: Option<Algorithm>,

    /// Bucket capacity in packets.
    #[arg(long)]
    pub capacity: Option<f64>,

    /// Drain rate (leaky, packets per tick) or refill rate (token,
    /// packets per second).
    #[arg(long)]
    pub rate: Option<f64>,

    /// Arrival batch size offered each tick.
    #[arg(long)]
    pub arrival_rate: Option<f64>,

    /// Total packet budget for the run.
    #[arg(long)]
    pub total_packets: Option<f64>,

    /// Simulated tick duration (e.g. "1s").
    #[arg(long, value_parser = parse_duration)]
    pub tick: Option<Duration>,

    /// Pace the run in real time, sleeping one tick between steps.
    #[arg(long, action = ArgAction::SetTrue)]
    pub real_time: bool,

    /// Emit records as JSON lines instead of a table.
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Use a JSON layer for logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "shaper=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
