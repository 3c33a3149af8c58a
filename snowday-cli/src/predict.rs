//! Predict command implementation for the Snowday CLI.

use std::io::{Read, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use snowday_core::{
    ForecastProvider, Geocoder, Prediction, PredictionRequest, Predictor, ProfileStore, RegionId,
};
use snowday_data::{
    DEFAULT_FORECAST_URL, DEFAULT_GEOCODER_URL, HttpForecastProvider, HttpGeocoder,
    HttpProviderConfig, JsonProfileStore,
};
use snowday_scorer::{RuleScorer, ScoringThresholds};
use tracing::debug;

use crate::render::{render_json, render_text};
use crate::{
    ARG_FORECAST_BASE_URL, ARG_FORMAT, ARG_GEOCODER_BASE_URL, ARG_PROFILES, ARG_REGION,
    ARG_THRESHOLDS, ARG_TIMEOUT_SECS, CliError, DEFAULT_PROFILES_PATH, ENV_REGION,
};

/// Output format for the prediction report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON prediction.
    Json,
}

/// CLI arguments for the `predict` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Predict whether schools in a postal code will close tomorrow \
                 because of snow. Combines the Open-Meteo forecast with an \
                 optional local closure profile table and explains every \
                 contribution to the score.",
    about = "Predict a snow day for a postal code"
)]
#[ortho_config(prefix = "SNOWDAY")]
pub(crate) struct PredictArgs {
    /// US postal code to predict for.
    #[arg(value_name = "zip")]
    #[serde(default)]
    pub(crate) region: Option<String>,
    /// Path to the closure profile table (`school_trends.json`).
    #[arg(long = ARG_PROFILES, value_name = "path")]
    #[serde(default)]
    pub(crate) profiles: Option<Utf8PathBuf>,
    /// Path to a JSON file overriding the scoring thresholds.
    #[arg(long = ARG_THRESHOLDS, value_name = "path")]
    #[serde(default)]
    pub(crate) thresholds: Option<Utf8PathBuf>,
    /// Base URL of the postal-code geocoder.
    #[arg(long = ARG_GEOCODER_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geocoder_base_url: Option<String>,
    /// Base URL of the Open-Meteo forecast service.
    #[arg(long = ARG_FORECAST_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) forecast_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Report format.
    #[arg(long = ARG_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl PredictArgs {
    pub(crate) fn into_config(self) -> Result<PredictConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PredictConfig::try_from(merged)
    }
}

/// Resolved `predict` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PredictConfig {
    /// Region to predict for.
    pub(crate) region: RegionId,
    /// Closure profile table; a missing file means no profiles.
    pub(crate) profiles: Utf8PathBuf,
    /// Optional scoring thresholds override.
    pub(crate) thresholds: Option<Utf8PathBuf>,
    pub(crate) geocoder_base_url: String,
    pub(crate) forecast_base_url: String,
    /// Request timeout; `None` keeps the provider default.
    pub(crate) timeout: Option<Duration>,
    pub(crate) format: OutputFormat,
}

impl PredictConfig {
    fn http_config(&self, base_url: &str) -> HttpProviderConfig {
        let config = HttpProviderConfig::new(base_url);
        match self.timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

impl TryFrom<PredictArgs> for PredictConfig {
    type Error = CliError;

    fn try_from(args: PredictArgs) -> Result<Self, Self::Error> {
        let raw_region = args.region.ok_or(CliError::MissingArgument {
            field: ARG_REGION,
            env: ENV_REGION,
        })?;
        let region = RegionId::new(raw_region)?;

        let timeout = match args.timeout_secs {
            Some(0) => {
                return Err(CliError::InvalidArgument {
                    field: ARG_TIMEOUT_SECS,
                    reason: "must be at least one second".to_owned(),
                });
            }
            other => other.map(Duration::from_secs),
        };

        Ok(Self {
            region,
            profiles: args
                .profiles
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PROFILES_PATH)),
            thresholds: args.thresholds,
            geocoder_base_url: args
                .geocoder_base_url
                .unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_owned()),
            forecast_base_url: args
                .forecast_base_url
                .unwrap_or_else(|| DEFAULT_FORECAST_URL.to_owned()),
            timeout,
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Predictor over boxed collaborators so tests can substitute stubs.
pub(crate) type CliPredictor = Predictor<
    Box<dyn Geocoder>,
    Box<dyn ForecastProvider>,
    Box<dyn ProfileStore>,
    RuleScorer,
>;

/// Builds the predictor for the current invocation.
pub(super) trait PredictorBuilder {
    fn build(&self, config: &PredictConfig) -> Result<CliPredictor, CliError>;
}

pub(super) struct DefaultPredictorBuilder;

impl PredictorBuilder for DefaultPredictorBuilder {
    fn build(&self, config: &PredictConfig) -> Result<CliPredictor, CliError> {
        let scorer = load_scorer(config.thresholds.as_deref())?;
        let profiles = JsonProfileStore::load_or_empty(&config.profiles)?;
        debug!(
            "loaded {} closure profiles from {}",
            profiles.len(),
            profiles.origin()
        );
        let geocoder: Box<dyn Geocoder> = Box::new(
            HttpGeocoder::with_config(&config.http_config(&config.geocoder_base_url)).map_err(
                |source| CliError::BuildProvider {
                    base_url: config.geocoder_base_url.clone(),
                    source,
                },
            )?,
        );
        let forecasts: Box<dyn ForecastProvider> = Box::new(
            HttpForecastProvider::with_config(&config.http_config(&config.forecast_base_url))
                .map_err(|source| CliError::BuildProvider {
                    base_url: config.forecast_base_url.clone(),
                    source,
                })?,
        );
        let profiles: Box<dyn ProfileStore> = Box::new(profiles);
        Ok(Predictor::new(geocoder, forecasts, profiles, scorer))
    }
}

/// Build the rule scorer, applying a thresholds override when configured.
pub(super) fn load_scorer(path: Option<&Utf8Path>) -> Result<RuleScorer, CliError> {
    let Some(path) = path else {
        return Ok(RuleScorer::default());
    };
    let json = read_utf8(path).map_err(|source| CliError::ReadThresholds {
        path: path.to_path_buf(),
        source,
    })?;
    let thresholds =
        ScoringThresholds::from_json(&json).map_err(|source| CliError::InvalidThresholds {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("loaded scoring thresholds from {path}");
    RuleScorer::new(thresholds).map_err(|source| CliError::InvalidThresholds {
        path: path.to_path_buf(),
        source,
    })
}

fn read_utf8(path: &Utf8Path) -> std::io::Result<String> {
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

pub(super) fn run_predict(args: PredictArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPredictorBuilder;
    run_predict_with(args, &builder, &mut stdout)
}

pub(super) fn run_predict_with(
    args: PredictArgs,
    builder: &dyn PredictorBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let prediction = execute_predict(&config, builder)?;
    write_prediction(writer, &prediction, config.format)
}

fn execute_predict(
    config: &PredictConfig,
    builder: &dyn PredictorBuilder,
) -> Result<Prediction, CliError> {
    let predictor = builder.build(config)?;
    let request = PredictionRequest::new(config.region.clone());
    Ok(predictor.predict(&request)?)
}

fn write_prediction(
    writer: &mut dyn Write,
    prediction: &Prediction,
    format: OutputFormat,
) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Text => render_text(prediction),
        OutputFormat::Json => render_json(prediction).map_err(CliError::SerialiseOutput)?,
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
