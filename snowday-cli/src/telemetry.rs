//! Log subscriber installation for the `snowday` binary.
//!
//! Library crates log through the `log` facade; the fmt subscriber picks
//! those records up through its `tracing-log` bridge.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Environment variable holding an `EnvFilter` directive.
pub(crate) const LOG_ENV: &str = "SNOWDAY_LOG";

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback filter directive was rejected.
    #[error("invalid log filter {value:?}")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Filter used when `SNOWDAY_LOG` is unset or unparsable.
pub(crate) const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Install a compact stderr subscriber.
pub(crate) fn init(verbose: bool) -> Result<(), TelemetryError> {
    let level = default_level(verbose);
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|source| TelemetryError::EnvFilter {
            value: level.to_owned(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
