//! Open-Meteo forecast response types.
//!
//! Deserialisation types for the `/v1/forecast` endpoint when queried with
//! `current_weather=true` and the daily snowfall, precipitation and
//! temperature aggregates. Daily series are index-aligned with `daily.time`;
//! index 0 is today.
//!
//! See: <https://open-meteo.com/en/docs>

use log::warn;
use serde::Deserialize;
use snowday_core::{CurrentConditions, DailyForecast, FetchError, Forecast, SnowUnit};

/// Offset of "tomorrow" in the daily series.
pub(crate) const TOMORROW: usize = 1;

const MILLIMETRES_PER_INCH: f64 = 25.4;

/// Forecast response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    /// Conditions at request time.
    pub current_weather: Option<CurrentWeather>,
    /// Units of the daily series.
    #[serde(default)]
    pub daily_units: DailyUnits,
    /// Daily aggregates.
    pub daily: Option<Daily>,
}

/// The `current_weather` block.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeather {
    pub temperature: Option<f64>,
    pub windspeed: Option<f64>,
    pub weathercode: Option<f64>,
}

/// Unit symbols reported for each daily series.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DailyUnits {
    pub snowfall_sum: Option<String>,
    pub precipitation_sum: Option<String>,
    pub temperature_2m_min: Option<String>,
    pub temperature_2m_max: Option<String>,
}

/// Daily series; `null` entries mark missing values.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Daily {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub snowfall_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
}

impl ForecastResponse {
    /// Normalise the response into the engine's units.
    ///
    /// # Errors
    /// Returns [`FetchError::ParseError`] when the daily block is missing or
    /// has no entry for tomorrow.
    pub(crate) fn into_forecast(self) -> Result<Forecast, FetchError> {
        let daily = self.daily.ok_or_else(|| FetchError::ParseError {
            message: "forecast response has no daily block".to_owned(),
        })?;
        if daily.time.len() <= TOMORROW {
            return Err(FetchError::ParseError {
                message: format!(
                    "forecast response has {} daily entries; tomorrow needs at least {}",
                    daily.time.len(),
                    TOMORROW + 1
                ),
            });
        }
        let units = self.daily_units;

        let snowfall_unit = match units.snowfall_sum.as_deref() {
            Some(symbol) => SnowUnit::from_symbol(symbol).unwrap_or_else(|| {
                warn!("unknown snowfall unit {symbol:?}; assuming centimetres");
                SnowUnit::Centimetres
            }),
            None => SnowUnit::Centimetres,
        };
        let precipitation_mm = at(&daily.precipitation_sum)
            .map(|value| precipitation_to_mm(value, units.precipitation_sum.as_deref()));
        let temperature_min_f = at(&daily.temperature_2m_min)
            .map(|value| temperature_to_f(value, units.temperature_2m_min.as_deref()));
        let temperature_max_f = at(&daily.temperature_2m_max)
            .map(|value| temperature_to_f(value, units.temperature_2m_max.as_deref()));

        let tomorrow = DailyForecast {
            date: daily.time.get(TOMORROW).cloned(),
            snowfall: at(&daily.snowfall_sum),
            snowfall_unit,
            precipitation_mm,
            temperature_min_f,
            temperature_max_f,
        };
        let current = self.current_weather.map(|weather| CurrentConditions {
            temperature: weather.temperature,
            wind_speed: weather.windspeed,
            condition_code: weather.weathercode.and_then(weather_code),
        });
        Ok(Forecast { current, tomorrow })
    }
}

fn at(series: &[Option<f64>]) -> Option<f64> {
    series.get(TOMORROW).copied().flatten()
}

fn precipitation_to_mm(value: f64, unit: Option<&str>) -> f64 {
    match unit.map(str::trim) {
        Some("inch" | "in") => value * MILLIMETRES_PER_INCH,
        Some("mm") | None => value,
        Some(other) => {
            warn!("unknown precipitation unit {other:?}; assuming millimetres");
            value
        }
    }
}

fn temperature_to_f(value: f64, unit: Option<&str>) -> f64 {
    match unit.map(str::trim) {
        Some("°C" | "C") => value * 9.0 / 5.0 + 32.0,
        Some("°F" | "F") | None => value,
        Some(other) => {
            warn!("unknown temperature unit {other:?}; assuming Fahrenheit");
            value
        }
    }
}

fn weather_code(raw: f64) -> Option<u16> {
    let valid = raw.is_finite() && raw.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(&raw);
    if !valid {
        warn!("discarding weather code {raw}");
        return None;
    }
    // Integral and in range, checked above.
    Some(raw as u16)
}
