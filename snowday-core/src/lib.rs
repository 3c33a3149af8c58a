//! Core domain types for the Snowday engine.
//!
//! The crate holds everything a prediction needs that is independent of any
//! particular data source:
//! - region identifiers and resolved locations,
//! - normalised forecasts with explicit snowfall units,
//! - local closure profiles,
//! - the signal aggregator that folds those inputs into a [`SignalBundle`],
//! - the collaborator traits ([`Geocoder`], [`ForecastProvider`],
//!   [`ProfileStore`], [`Scorer`]) and the [`Predictor`] pipeline joining them.
//!
//! Constructors normalise or reject invalid input early so scoring never has to
//! handle non-finite or negative measurements.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod fetch;
pub mod forecast;
pub mod location;
pub mod predict;
pub mod profile;
pub mod region;
pub mod scorer;
pub mod signals;
pub mod verdict;

#[doc(hidden)]
pub mod test_support;

pub use fetch::FetchError;
pub use forecast::{CurrentConditions, DailyForecast, Forecast, ForecastProvider, SnowUnit, Snowfall};
pub use location::{Geocoder, Location, LocationError};
pub use predict::{PredictError, Prediction, PredictionRequest, Predictor};
pub use profile::{ClosureProfile, MemoryProfileStore, ProfileStore, ProfileStoreError, RawProfile};
pub use region::{RegionId, RegionIdError};
pub use scorer::{Reason, RuleKind, ScoreReport, Scorer};
pub use signals::SignalBundle;
pub use verdict::{Verdict, VerdictBands};
