//! The prediction pipeline: resolve, fetch, aggregate, score, classify.
//!
//! [`Predictor`] owns one of each collaborator and runs a single prediction
//! per call. The profile lookup runs on a scoped thread alongside the
//! geocode and forecast chain; both must finish before aggregation.

use std::{panic, thread};

use log::{debug, info};
use thiserror::Error;

use crate::{
    FetchError, Forecast, ForecastProvider, Geocoder, Location, ProfileStore, ProfileStoreError,
    RegionId, ScoreReport, Scorer, SignalBundle, Verdict,
};

/// Input to [`Predictor::predict`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictionRequest {
    /// Region to predict for.
    pub region: RegionId,
}

impl PredictionRequest {
    /// Construct a request for `region`.
    #[must_use]
    pub const fn new(region: RegionId) -> Self {
        Self { region }
    }
}

/// Everything produced by one prediction, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prediction {
    /// Region the prediction is for.
    pub region: RegionId,
    /// Resolved location of the region.
    pub location: Location,
    /// Forecast the signals were drawn from.
    pub forecast: Forecast,
    /// Normalised scoring inputs.
    pub signals: SignalBundle,
    /// Score and reasons.
    pub report: ScoreReport,
    /// Verdict band for the score.
    pub verdict: Verdict,
}

/// Errors returned by [`Predictor::predict`].
///
/// Every variant is terminal for the attempt; nothing is retried.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The geocoder does not know the region.
    #[error("no location found for region {region}")]
    RegionNotFound {
        /// Region that failed to resolve.
        region: RegionId,
    },
    /// Coordinate resolution failed.
    #[error("failed to resolve region {region}")]
    Geocode {
        /// Region being resolved.
        region: RegionId,
        /// Underlying failure.
        #[source]
        source: FetchError,
    },
    /// The forecast could not be retrieved.
    #[error("failed to fetch the forecast for {location}")]
    Forecast {
        /// Display name of the location.
        location: String,
        /// Underlying failure.
        #[source]
        source: FetchError,
    },
    /// The profile store could not be consulted.
    #[error("failed to look up the closure profile for region {region}")]
    Profile {
        /// Region being looked up.
        region: RegionId,
        /// Underlying failure.
        #[source]
        source: ProfileStoreError,
    },
}

/// Runs predictions against a fixed set of collaborators.
///
/// # Examples
/// ```
/// use snowday_core::{
///     DailyForecast, FetchError, Forecast, ForecastProvider, Geocoder, Location,
///     MemoryProfileStore, PredictionRequest, Predictor, Reason, RegionId, RuleKind,
///     ScoreReport, Scorer, SignalBundle, Verdict,
/// };
///
/// struct Here;
/// impl Geocoder for Here {
///     fn locate(&self, _region: &RegionId) -> Result<Option<Location>, FetchError> {
///         Ok(Location::new(44.48, -73.21, "Burlington, VT").ok())
///     }
/// }
///
/// struct Calm;
/// impl ForecastProvider for Calm {
///     fn forecast(&self, _location: &Location) -> Result<Forecast, FetchError> {
///         Ok(Forecast::default())
///     }
/// }
///
/// struct Zero;
/// impl Scorer for Zero {
///     fn score(&self, _bundle: &SignalBundle) -> ScoreReport {
///         ScoreReport::new(0, vec![Reason::new(RuleKind::Snowfall, 0, "no snow")])
///     }
/// }
///
/// let predictor = Predictor::new(Here, Calm, MemoryProfileStore::new(), Zero);
/// let request = PredictionRequest::new(RegionId::new("05401")?);
/// let prediction = predictor.predict(&request)?;
/// assert_eq!(prediction.verdict, Verdict::Unlikely);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Predictor<G, F, P, S> {
    geocoder: G,
    forecasts: F,
    profiles: P,
    scorer: S,
}

impl<G, F, P, S> Predictor<G, F, P, S>
where
    G: Geocoder,
    F: ForecastProvider,
    P: ProfileStore,
    S: Scorer,
{
    /// Assemble a predictor from its collaborators.
    pub const fn new(geocoder: G, forecasts: F, profiles: P, scorer: S) -> Self {
        Self {
            geocoder,
            forecasts,
            profiles,
            scorer,
        }
    }

    /// Borrow the scorer.
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Run one prediction.
    ///
    /// # Errors
    /// Returns [`PredictError::RegionNotFound`] when the geocoder has no
    /// location for the region, and the other variants when a collaborator
    /// fails. No partial prediction is produced.
    pub fn predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError> {
        let region = &request.region;
        let (located, profile) = thread::scope(|scope| {
            let lookup = scope.spawn(|| self.profiles.lookup(region));
            let located = self.locate_and_fetch(region);
            let profile = lookup
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload));
            (located, profile)
        });
        let (location, forecast) = located?;
        let profile = profile.map_err(|source| PredictError::Profile {
            region: region.clone(),
            source,
        })?;
        if profile.is_none() {
            debug!("no closure profile stored for region {region}");
        }

        let signals = SignalBundle::aggregate(&forecast, profile.as_ref());
        let report = self.scorer.score(&signals);
        let verdict = self.scorer.classify(report.total());
        info!(
            "predicted {verdict} for region {region} ({}) with score {}",
            location.display_name(),
            report.total()
        );

        Ok(Prediction {
            region: region.clone(),
            location,
            forecast,
            signals,
            report,
            verdict,
        })
    }

    fn locate_and_fetch(&self, region: &RegionId) -> Result<(Location, Forecast), PredictError> {
        let location = self
            .geocoder
            .locate(region)
            .map_err(|source| PredictError::Geocode {
                region: region.clone(),
                source,
            })?
            .ok_or_else(|| PredictError::RegionNotFound {
                region: region.clone(),
            })?;
        debug!(
            "resolved region {region} to {} ({:.4}, {:.4})",
            location.display_name(),
            location.latitude(),
            location.longitude()
        );
        let forecast =
            self.forecasts
                .forecast(&location)
                .map_err(|source| PredictError::Forecast {
                    location: location.display_name().to_owned(),
                    source,
                })?;
        Ok((location, forecast))
    }
}
