//! Test helpers for building predictions and on-disk CLI inputs.

use camino::{Utf8Path, Utf8PathBuf};
use snowday_core::test_support::{StubForecastProvider, StubGeocoder};
use snowday_core::{
    CurrentConditions, DailyForecast, Forecast, ForecastProvider, Geocoder, Location,
    PredictionRequest, Predictor, ProfileStore, RegionId,
};
use snowday_data::JsonProfileStore;
use std::fs;

use crate::predict::{CliPredictor, PredictConfig, PredictorBuilder, load_scorer};
use super::*;

pub(super) const BURLINGTON_PROFILE: &str = r#"{
    "05401": {
        "closure_inch_threshold": 4,
        "historical_closure_weight": 3,
        "bias_when_snow_overnight": 1
    }
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace")
}

pub(super) fn burlington() -> Location {
    Location::new(44.4759, -73.2121, "Burlington, VT").expect("valid location")
}

/// Tomorrow's forecast in inches, optionally with snow falling now.
pub(super) fn snow_forecast(inches: f64, active_code: Option<u16>) -> Forecast {
    Forecast {
        current: active_code.map(|code| CurrentConditions {
            temperature: Some(24.0),
            wind_speed: Some(12.0),
            condition_code: Some(code),
        }),
        tomorrow: DailyForecast {
            date: Some("2026-01-15".to_owned()),
            snowfall: Some(inches),
            ..DailyForecast::default()
        },
    }
}

/// Builds predictors from stub network collaborators while still loading
/// profiles and thresholds through the configured paths.
#[derive(Debug, Clone)]
pub(super) struct StubPredictorBuilder {
    pub(super) geocoder: StubGeocoder,
    pub(super) forecasts: StubForecastProvider,
}

impl StubPredictorBuilder {
    pub(super) fn snowing(inches: f64) -> Self {
        Self {
            geocoder: StubGeocoder::Found(burlington()),
            forecasts: StubForecastProvider::Success(snow_forecast(inches, None)),
        }
    }
}

impl PredictorBuilder for StubPredictorBuilder {
    fn build(&self, config: &PredictConfig) -> Result<CliPredictor, CliError> {
        let scorer = load_scorer(config.thresholds.as_deref())?;
        let profiles: Box<dyn ProfileStore> =
            Box::new(JsonProfileStore::load_or_empty(&config.profiles)?);
        let geocoder: Box<dyn Geocoder> = Box::new(self.geocoder.clone());
        let forecasts: Box<dyn ForecastProvider> = Box::new(self.forecasts.clone());
        Ok(Predictor::new(geocoder, forecasts, profiles, scorer))
    }
}

/// Run a prediction for 05401 against stubs, without going through clap.
pub(super) fn predict_burlington(
    forecast: Forecast,
    profiles: &str,
) -> snowday_core::Prediction {
    let store: Box<dyn ProfileStore> =
        Box::new(JsonProfileStore::from_json("test", profiles).expect("valid profile table"));
    let geocoder: Box<dyn Geocoder> = Box::new(StubGeocoder::Found(burlington()));
    let forecasts: Box<dyn ForecastProvider> = Box::new(StubForecastProvider::Success(forecast));
    let predictor: CliPredictor =
        Predictor::new(geocoder, forecasts, store, snowday_scorer::RuleScorer::default());
    let region = RegionId::new("05401").expect("valid region");
    predictor
        .predict(&PredictionRequest::new(region))
        .expect("prediction succeeds")
}
