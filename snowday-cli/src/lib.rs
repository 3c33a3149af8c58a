//! Command-line interface for the Snowday predictor.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod predict;
mod render;
mod telemetry;

pub use error::CliError;
pub use telemetry::TelemetryError;

use predict::{PredictArgs, run_predict};

pub(crate) const ARG_REGION: &str = "region";
pub(crate) const ARG_PROFILES: &str = "profiles";
pub(crate) const ARG_THRESHOLDS: &str = "thresholds";
pub(crate) const ARG_GEOCODER_BASE_URL: &str = "geocoder-base-url";
pub(crate) const ARG_FORECAST_BASE_URL: &str = "forecast-base-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ENV_REGION: &str = "SNOWDAY_CMDS_PREDICT_REGION";

/// Profile table consulted when `--profiles` is not given.
pub(crate) const DEFAULT_PROFILES_PATH: &str = "school_trends.json";

/// Run the Snowday CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, when a
/// collaborator cannot be built, or when the prediction fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    telemetry::init(cli.verbose)?;
    match cli.command {
        Command::Predict(args) => run_predict(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "snowday",
    about = "Explainable snow-day predictions for US postal codes",
    version
)]
struct Cli {
    /// Log debug detail to stderr (overridden by `SNOWDAY_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Predict tomorrow's closure likelihood for a postal code.
    Predict(PredictArgs),
}

#[cfg(test)]
mod tests;
