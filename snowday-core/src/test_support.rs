//! Test-only collaborators with canned responses, used by unit and
//! behaviour tests across the workspace.

use crate::{
    FetchError, Forecast, ForecastProvider, Geocoder, Location, Reason, RegionId, RuleKind,
    ScoreReport, Scorer, SignalBundle,
};

/// `Geocoder` returning a fixed outcome for every region.
#[derive(Debug, Clone)]
pub enum StubGeocoder {
    /// Resolve every region to this location.
    Found(Location),
    /// Report every region as unknown.
    Unknown,
    /// Fail every lookup with this error.
    Failure(FetchError),
}

impl Geocoder for StubGeocoder {
    fn locate(&self, _region: &RegionId) -> Result<Option<Location>, FetchError> {
        match self {
            Self::Found(location) => Ok(Some(location.clone())),
            Self::Unknown => Ok(None),
            Self::Failure(err) => Err(err.clone()),
        }
    }
}

/// `ForecastProvider` returning a fixed outcome for every location.
#[derive(Debug, Clone)]
pub enum StubForecastProvider {
    /// Return this forecast.
    Success(Forecast),
    /// Fail with this error.
    Failure(FetchError),
}

impl ForecastProvider for StubForecastProvider {
    fn forecast(&self, _location: &Location) -> Result<Forecast, FetchError> {
        match self {
            Self::Success(forecast) => Ok(forecast.clone()),
            Self::Failure(err) => Err(err.clone()),
        }
    }
}

/// `Scorer` returning the same total for every bundle.
#[derive(Debug, Copy, Clone, Default)]
pub struct FixedScorer {
    total: u32,
}

impl FixedScorer {
    /// Construct a scorer that always reports `total`.
    #[must_use]
    pub const fn new(total: u32) -> Self {
        Self { total }
    }
}

impl Scorer for FixedScorer {
    fn score(&self, _bundle: &SignalBundle) -> ScoreReport {
        let contribution = i32::try_from(self.total).unwrap_or(i32::MAX);
        ScoreReport::new(
            self.total,
            vec![Reason::new(
                RuleKind::Snowfall,
                contribution,
                format!("fixed score → +{}", self.total),
            )],
        )
    }
}
