//! HTTP-based `ForecastProvider` using Open-Meteo's forecast API.
//!
//! The provider asks for two days of daily aggregates in Fahrenheit and
//! millimetres together with current conditions, and normalises tomorrow's
//! entry into a [`Forecast`]. Snowfall keeps the unit Open-Meteo reports in
//! `daily_units`.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use snowday_core::{ForecastProvider, Location};
//! use snowday_data::{HttpForecastProvider, HttpProviderConfig};
//!
//! let config = HttpProviderConfig::new("https://api.open-meteo.com")
//!     .with_timeout(Duration::from_secs(5));
//! let provider = HttpForecastProvider::with_config(&config)?;
//! let location = Location::new(44.48, -73.21, "Burlington, VT")?;
//! let forecast = provider.forecast(&location)?;
//! println!("{:?}", forecast.tomorrow.snowfall);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use snowday_core::{FetchError, Forecast, ForecastProvider, Location};
use url::Url;

use crate::http::{HttpProviderConfig, JsonFetcher, ProviderBuildError};
use crate::open_meteo::{ForecastResponse, TOMORROW};

/// Default Open-Meteo endpoint.
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";

const DAILY_FIELDS: &str = "snowfall_sum,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// HTTP-backed [`ForecastProvider`] for Open-Meteo.
#[derive(Debug)]
pub struct HttpForecastProvider {
    fetcher: JsonFetcher,
}

impl HttpForecastProvider {
    /// Create a provider for [`DEFAULT_FORECAST_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(&HttpProviderConfig::new(DEFAULT_FORECAST_URL))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: &HttpProviderConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            fetcher: JsonFetcher::new(config)?,
        })
    }

    /// Build the forecast URL for `location`.
    fn build_forecast_url(&self, location: &Location) -> Url {
        let mut url = self.fetcher.endpoint(["v1", "forecast"]);
        let forecast_days = (TOMORROW + 1).to_string();
        url.query_pairs_mut()
            .append_pair("latitude", &location.latitude().to_string())
            .append_pair("longitude", &location.longitude().to_string())
            .append_pair("daily", DAILY_FIELDS)
            .append_pair("current_weather", "true")
            .append_pair("temperature_unit", "fahrenheit")
            .append_pair("precipitation_unit", "mm")
            .append_pair("timezone", "auto")
            .append_pair("forecast_days", &forecast_days);
        url
    }
}

impl ForecastProvider for HttpForecastProvider {
    /// Fetch the forecast for `location`.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime should be
    /// multi-threaded; a `current_thread` caller falls back to the provider's
    /// own runtime and blocks the caller while the request runs.
    fn forecast(&self, location: &Location) -> Result<Forecast, FetchError> {
        let url = self.build_forecast_url(location);
        let response = self
            .fetcher
            .get_json::<ForecastResponse>(&url)?
            .ok_or_else(|| FetchError::HttpError {
                url: url.to_string(),
                status: 404,
                message: "forecast endpoint not found".to_owned(),
            })?;
        response.into_forecast()
    }
}
