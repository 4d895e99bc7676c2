use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Bucket(#[from] BucketError),
    #[error("failed to encode record: {0}")]
    Encode(String),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum BucketError {
    #[error("invalid bucket {field}: expected a non-negative finite number, got {value}")]
    InvalidConfig { field: &'static str, value: f64 },
    #[error("invalid arrival batch: expected a non-negative finite number, got {value}")]
    InvalidArrivals { value: f64 },
}
