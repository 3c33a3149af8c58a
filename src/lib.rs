//! Facade crate for the Snowday closure predictor.
//!
//! This crate re-exports the core domain types and exposes the rule-based
//! scorer and the HTTP-backed collaborators behind feature flags.

#![forbid(unsafe_code)]

pub use snowday_core::{
    ClosureProfile, CurrentConditions, DailyForecast, FetchError, Forecast, ForecastProvider,
    Geocoder, Location, MemoryProfileStore, PredictError, Prediction, PredictionRequest,
    Predictor, ProfileStore, ProfileStoreError, RawProfile, Reason, RegionId, RuleKind,
    ScoreReport, Scorer, SignalBundle, SnowUnit, Snowfall, Verdict, VerdictBands,
};

#[cfg(feature = "scorer")]
pub use snowday_scorer::{RuleScorer, ScoringThresholds, ThresholdsError};

#[cfg(feature = "http")]
pub use snowday_data::{
    HttpForecastProvider, HttpGeocoder, HttpProviderConfig, JsonProfileStore, ProfileLoadError,
    ProviderBuildError,
};
