//! Signal aggregation: folding a forecast and an optional profile into the
//! normalised inputs the scorer consumes.

use log::{debug, warn};

use crate::{ClosureProfile, Forecast, RawProfile, Snowfall};

/// Normalised scoring inputs for a single prediction.
///
/// Snowfall and precipitation are always finite and non-negative. The bundle
/// is built once per prediction and never mutated by scoring.
///
/// # Examples
/// ```
/// use snowday_core::{ClosureProfile, SignalBundle, Snowfall};
///
/// let bundle = SignalBundle::new(Snowfall::inches_of(4.0), 6.0)
///     .with_condition_code(73)
///     .with_min_temperature(20.0)
///     .with_profile(ClosureProfile::new(3.0, 3.0));
/// assert_eq!(bundle.condition_code(), Some(73));
/// assert_eq!(bundle.precipitation(), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "SignalFields")
)]
pub struct SignalBundle {
    snowfall: Snowfall,
    condition_code: Option<u16>,
    min_temperature: Option<f64>,
    precipitation: f64,
    profile: Option<ClosureProfile>,
}

/// Wire shape of [`SignalBundle`]; decoding reuses the builder so the
/// bundle's invariants hold.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SignalFields {
    snowfall: Snowfall,
    condition_code: Option<u16>,
    min_temperature: Option<f64>,
    precipitation: f64,
    profile: Option<ClosureProfile>,
}

#[cfg(feature = "serde")]
impl From<SignalFields> for SignalBundle {
    fn from(fields: SignalFields) -> Self {
        let mut bundle = Self::new(fields.snowfall, fields.precipitation);
        bundle.condition_code = fields.condition_code;
        if let Some(low) = fields.min_temperature {
            bundle = bundle.with_min_temperature(low);
        }
        bundle.profile = fields.profile;
        bundle
    }
}

impl SignalBundle {
    /// Construct a bundle with no current conditions, temperature or profile.
    ///
    /// Non-finite or negative precipitation becomes `0.0`.
    #[must_use]
    pub fn new(snowfall: Snowfall, precipitation: f64) -> Self {
        Self {
            snowfall,
            condition_code: None,
            min_temperature: None,
            precipitation: non_negative(precipitation),
            profile: None,
        }
    }

    /// Attach the WMO code of current conditions.
    #[must_use]
    pub fn with_condition_code(mut self, code: u16) -> Self {
        self.condition_code = Some(code);
        self
    }

    /// Attach tomorrow's low in °F. Non-finite values are ignored.
    #[must_use]
    pub fn with_min_temperature(mut self, temperature: f64) -> Self {
        self.min_temperature = Some(temperature).filter(|value| value.is_finite());
        self
    }

    /// Attach the region's closure profile.
    #[must_use]
    pub fn with_profile(mut self, profile: ClosureProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Build a bundle from a forecast and the region's stored profile.
    ///
    /// Missing or invalid snowfall and precipitation default to zero; a
    /// missing temperature or condition code stays absent. Aggregation never
    /// fails.
    #[must_use]
    pub fn aggregate(forecast: &Forecast, profile: Option<&RawProfile>) -> Self {
        let tomorrow = &forecast.tomorrow;
        let snowfall = Snowfall::new(
            measurement("snowfall", tomorrow.snowfall),
            tomorrow.snowfall_unit,
        );
        let precipitation = measurement("precipitation", tomorrow.precipitation_mm);

        let mut bundle = Self::new(snowfall, precipitation);
        if let Some(code) = forecast
            .current
            .as_ref()
            .and_then(|current| current.condition_code)
        {
            bundle = bundle.with_condition_code(code);
        }
        if let Some(low) = tomorrow.temperature_min_f {
            bundle = bundle.with_min_temperature(low);
        }
        if let Some(raw) = profile {
            bundle = bundle.with_profile(ClosureProfile::from_raw(raw));
        }

        debug!(
            "aggregated signals: snowfall={} precipitation={:.1}mm code={:?} low={:?} profile={}",
            bundle.snowfall,
            bundle.precipitation,
            bundle.condition_code,
            bundle.min_temperature,
            bundle.profile.is_some()
        );
        bundle
    }

    /// Forecast snowfall for tomorrow.
    #[must_use]
    pub const fn snowfall(&self) -> Snowfall {
        self.snowfall
    }

    /// WMO code of current conditions, if reported.
    #[must_use]
    pub const fn condition_code(&self) -> Option<u16> {
        self.condition_code
    }

    /// Tomorrow's low in °F, if reported.
    #[must_use]
    pub const fn min_temperature(&self) -> Option<f64> {
        self.min_temperature
    }

    /// Tomorrow's precipitation total in millimetres.
    #[must_use]
    pub const fn precipitation(&self) -> f64 {
        self.precipitation
    }

    /// The region's closure profile, if one exists.
    #[must_use]
    pub const fn profile(&self) -> Option<&ClosureProfile> {
        self.profile.as_ref()
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn measurement(name: &str, value: Option<f64>) -> f64 {
    match value {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        Some(value) => {
            warn!("discarding invalid {name} value {value}; treating as 0");
            0.0
        }
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CurrentConditions, DailyForecast, SnowUnit};
    use rstest::{fixture, rstest};

    #[fixture]
    fn forecast() -> Forecast {
        Forecast {
            current: Some(CurrentConditions {
                temperature: Some(24.0),
                wind_speed: Some(8.0),
                condition_code: Some(73),
            }),
            tomorrow: DailyForecast {
                date: Some("2026-01-15".to_owned()),
                snowfall: Some(10.16),
                snowfall_unit: SnowUnit::Centimetres,
                precipitation_mm: Some(7.5),
                temperature_min_f: Some(18.0),
                temperature_max_f: Some(29.0),
            },
        }
    }

    #[rstest]
    fn aggregates_every_signal(forecast: Forecast) {
        let raw = RawProfile {
            closure_snow_threshold: Some(3.0),
            historical_closure_weight: Some(4.0),
            ..RawProfile::default()
        };
        let bundle = SignalBundle::aggregate(&forecast, Some(&raw));

        assert!((bundle.snowfall().inches() - 4.0).abs() < 1e-9);
        assert_eq!(bundle.snowfall().unit(), SnowUnit::Centimetres);
        assert_eq!(bundle.precipitation(), 7.5);
        assert_eq!(bundle.condition_code(), Some(73));
        assert_eq!(bundle.min_temperature(), Some(18.0));
        let profile = bundle.profile().expect("profile attached");
        assert_eq!(profile.closure_snow_threshold(), 3.0);
    }

    #[rstest]
    fn missing_values_default_or_stay_absent() {
        let bundle = SignalBundle::aggregate(&Forecast::default(), None);

        assert_eq!(bundle.snowfall().amount(), 0.0);
        assert_eq!(bundle.precipitation(), 0.0);
        assert!(bundle.condition_code().is_none());
        assert!(bundle.min_temperature().is_none());
        assert!(bundle.profile().is_none());
    }

    #[rstest]
    #[case(Some(-3.0))]
    #[case(Some(f64::NAN))]
    #[case(Some(f64::INFINITY))]
    #[case(None)]
    fn invalid_measurements_become_zero(mut forecast: Forecast, #[case] value: Option<f64>) {
        forecast.tomorrow.snowfall = value;
        forecast.tomorrow.precipitation_mm = value;
        let bundle = SignalBundle::aggregate(&forecast, None);

        assert_eq!(bundle.snowfall().amount(), 0.0);
        assert_eq!(bundle.precipitation(), 0.0);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn decoding_restores_invariants() {
        let json = r#"{
            "snowfall": {"amount": -4.0, "unit": "inches"},
            "condition_code": 73,
            "min_temperature": 12.0,
            "precipitation": -7.0,
            "profile": {"closure_snow_threshold": 3.0, "historical_closure_weight": 99.0}
        }"#;
        let bundle: SignalBundle = serde_json::from_str(json).expect("decodes");

        assert_eq!(bundle.snowfall().amount(), 0.0);
        assert_eq!(bundle.precipitation(), 0.0);
        assert_eq!(bundle.condition_code(), Some(73));
        assert_eq!(bundle.min_temperature(), Some(12.0));
        let profile = bundle.profile().expect("profile decoded");
        assert_eq!(profile.historical_closure_weight(), 5.0);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn round_trip_keeps_an_unmet_threshold() {
        let bundle = SignalBundle::new(Snowfall::inches_of(2.0), 1.0)
            .with_profile(ClosureProfile::new(f64::NAN, 2.0).with_overnight_bias(1.0));
        let json = serde_json::to_string(&bundle).expect("encodes");
        let decoded: SignalBundle = serde_json::from_str(&json).expect("decodes");
        assert_eq!(decoded, bundle);
    }

    #[rstest]
    fn non_finite_temperature_is_absent(mut forecast: Forecast) {
        forecast.tomorrow.temperature_min_f = Some(f64::NAN);
        let bundle = SignalBundle::aggregate(&forecast, None);
        assert!(bundle.min_temperature().is_none());
    }
}
