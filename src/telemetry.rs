use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;

/// Install the global tracing subscriber.
///
/// The filter is picked from, in order: the explicit argument, `RUST_LOG`,
/// then a plain `info` fallback.
///
/// # Errors
///
/// Returns an error when the filter cannot be parsed, when a JSON layer is
/// requested without the `json-logs` feature, or when the global subscriber
/// is already set.
pub fn init_tracing(explicit_filter: Option<&str>, use_json: bool) -> Result<()> {
    let mut candidates = Vec::new();
    if let Some(filter) = explicit_filter {
        candidates.push(filter.to_string());
    }
    if let Ok(env) = std::env::var("RUST_LOG") {
        candidates.push(env);
    }
    candidates.push("info".to_string());

    let filter = candidates
        .into_iter()
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))?;

    #[cfg(feature = "json-logs")]
    if use_json {
        let subscriber = Registry::default().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .json()
                .flatten_event(true),
        );
        return tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::Telemetry(err.to_string()));
    }

    #[cfg(not(feature = "json-logs"))]
    if use_json {
        return Err(Error::Telemetry(
            "binary was built without the `json-logs` feature".to_string(),
        ));
    }

    let subscriber = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}
