//! Behaviour tests for the prediction pipeline using stub collaborators.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use snowday_core::test_support::{FixedScorer, StubForecastProvider, StubGeocoder};
use snowday_core::{
    DailyForecast, FetchError, Forecast, Location, MemoryProfileStore, PredictError, Prediction,
    PredictionRequest, Predictor, RawProfile, RegionId,
};
use std::cell::RefCell;

struct PredictionWorld {
    geocoder: RefCell<Option<StubGeocoder>>,
    forecasts: RefCell<Option<StubForecastProvider>>,
    profiles: RefCell<MemoryProfileStore>,
    outcome: RefCell<Option<Result<Prediction, PredictError>>>,
}

#[fixture]
fn world() -> PredictionWorld {
    PredictionWorld {
        geocoder: RefCell::new(None),
        forecasts: RefCell::new(None),
        profiles: RefCell::new(MemoryProfileStore::new()),
        outcome: RefCell::new(None),
    }
}

fn region(raw: &str) -> RegionId {
    RegionId::new(raw.trim_matches('"')).expect("valid region")
}

#[given("a geocoder that resolves every region to Burlington")]
fn given_burlington(world: &PredictionWorld) {
    let location = Location::new(44.48, -73.21, "Burlington, VT").expect("valid location");
    world.geocoder.replace(Some(StubGeocoder::Found(location)));
}

#[given("a geocoder that knows no regions")]
fn given_unknown(world: &PredictionWorld) {
    world.geocoder.replace(Some(StubGeocoder::Unknown));
}

#[given("a forecast of {inches:f64} inches of snow")]
fn given_snow(world: &PredictionWorld, inches: f64) {
    let forecast = Forecast {
        current: None,
        tomorrow: DailyForecast {
            snowfall: Some(inches),
            ..DailyForecast::default()
        },
    };
    world
        .forecasts
        .replace(Some(StubForecastProvider::Success(forecast)));
}

#[given("a forecast service that times out")]
fn given_timeout(world: &PredictionWorld) {
    world
        .forecasts
        .replace(Some(StubForecastProvider::Failure(FetchError::Timeout {
            url: "https://forecast.test/v1/forecast".to_owned(),
            timeout_secs: 10,
        })));
}

#[given("a stored profile for region {code}")]
fn given_profile(world: &PredictionWorld, code: String) {
    world.profiles.borrow_mut().insert(
        region(&code),
        RawProfile {
            closure_snow_threshold: Some(3.0),
            historical_closure_weight: Some(4.0),
            ..RawProfile::default()
        },
    );
}

#[when("I predict for region {code}")]
fn when_predict(world: &PredictionWorld, code: String) {
    let geocoder = world.geocoder.borrow_mut().take().expect("geocoder set");
    let forecasts = world.forecasts.borrow_mut().take().expect("forecasts set");
    let profiles = world.profiles.replace(MemoryProfileStore::new());
    let predictor = Predictor::new(geocoder, forecasts, profiles, FixedScorer::new(6));
    let outcome = predictor.predict(&PredictionRequest::new(region(&code)));
    world.outcome.replace(Some(outcome));
}

#[then("the prediction succeeds with verdict {label}")]
fn then_verdict(world: &PredictionWorld, label: String) {
    let outcome = world.outcome.borrow();
    let Some(Ok(prediction)) = outcome.as_ref() else {
        panic!("expected a successful prediction, got {outcome:?}");
    };
    assert_eq!(prediction.verdict.label(), label.trim_matches('"'));
}

#[then("the signals carry the stored profile")]
fn then_profile(world: &PredictionWorld) {
    let outcome = world.outcome.borrow();
    let Some(Ok(prediction)) = outcome.as_ref() else {
        panic!("expected a successful prediction");
    };
    let profile = prediction.signals.profile().expect("profile attached");
    assert_eq!(profile.closure_snow_threshold(), 3.0);
}

#[then("the signals carry no profile")]
fn then_no_profile(world: &PredictionWorld) {
    let outcome = world.outcome.borrow();
    let Some(Ok(prediction)) = outcome.as_ref() else {
        panic!("expected a successful prediction");
    };
    assert!(prediction.signals.profile().is_none());
}

#[then("the prediction fails because the region was not found")]
fn then_not_found(world: &PredictionWorld) {
    let outcome = world.outcome.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(PredictError::RegionNotFound { .. }))
    ));
}

#[then("the prediction fails while fetching the forecast")]
fn then_forecast_failed(world: &PredictionWorld) {
    let outcome = world.outcome.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(PredictError::Forecast {
            source: FetchError::Timeout { .. },
            ..
        }))
    ));
}

#[scenario(path = "tests/features/prediction.feature", index = 0)]
fn known_region_with_profile(world: PredictionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/prediction.feature", index = 1)]
fn unknown_region(world: PredictionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/prediction.feature", index = 2)]
fn forecast_failure(world: PredictionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/prediction.feature", index = 3)]
fn region_without_profile(world: PredictionWorld) {
    let _ = world;
}
