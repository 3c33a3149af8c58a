//! Error types emitted by the Snowday CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use snowday_core::{PredictError, RegionIdError};
use snowday_data::{ProfileLoadError, ProviderBuildError};
use snowday_scorer::ThresholdsError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Errors emitted by the Snowday CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option was present but unusable.
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: String,
    },
    /// The region argument was blank.
    #[error(transparent)]
    InvalidRegion(#[from] RegionIdError),
    /// Installing the log subscriber failed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    /// Reading the scoring thresholds file failed.
    #[error("failed to read scoring thresholds at {path:?}: {source}")]
    ReadThresholds {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The scoring thresholds file was malformed or inconsistent.
    #[error("invalid scoring thresholds in {path:?}: {source}")]
    InvalidThresholds {
        path: Utf8PathBuf,
        #[source]
        source: ThresholdsError,
    },
    /// Loading the closure profile table failed.
    #[error(transparent)]
    LoadProfiles(#[from] ProfileLoadError),
    /// Constructing an HTTP collaborator failed.
    #[error("failed to build HTTP client for {base_url:?}: {source}")]
    BuildProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The prediction could not be produced.
    #[error("prediction failed: {source}")]
    Predict {
        #[from]
        source: PredictError,
    },
    /// Serialising the prediction failed.
    #[error("failed to serialise prediction: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the report failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
