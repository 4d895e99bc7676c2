use std::time::Duration;

pub(super) fn default_algorithm() -> String {
    "leaky".to_string()
}

pub(super) const fn default_capacity() -> f64 {
    20.0
}

pub(super) const fn default_rate() -> f64 {
    5.0
}

pub(super) const fn default_arrival_rate() -> f64 {
    10.0
}

pub(super) const fn default_total_packets() -> f64 {
    100.0
}

pub(super) const fn default_tick() -> Duration {
    Duration::from_secs(1)
}
