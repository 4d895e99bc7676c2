#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod bucket;
pub mod clock;
pub mod config;
pub mod error;
pub mod sim;
pub mod telemetry;
pub mod types;

pub type Result<T> = std::result::Result<T, error::Error>;
