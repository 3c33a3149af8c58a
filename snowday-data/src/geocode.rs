//! Postal-code geocoding against a Zippopotam-compatible service.
//!
//! The service answers `GET {base}/{postal code}` with the places sharing the
//! code; the first place wins. Coordinates arrive as decimal strings.
//!
//! # Example
//!
//! ```no_run
//! use snowday_core::{Geocoder, RegionId};
//! use snowday_data::HttpGeocoder;
//!
//! let geocoder = HttpGeocoder::new()?;
//! let region = RegionId::new("05401")?;
//! if let Some(location) = geocoder.locate(&region)? {
//!     println!("{}", location.display_name());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use log::debug;
use serde::Deserialize;
use snowday_core::{FetchError, Geocoder, Location, RegionId};

use crate::http::{HttpProviderConfig, JsonFetcher, ProviderBuildError};

/// Default geocoding endpoint for US ZIP codes.
pub const DEFAULT_GEOCODER_URL: &str = "https://api.zippopotam.us/us";

/// Response body for a postal code lookup.
#[derive(Debug, Deserialize)]
pub(crate) struct PostalCodeResponse {
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(rename = "place name")]
    name: String,
    #[serde(rename = "state abbreviation", default)]
    state: Option<String>,
    latitude: String,
    longitude: String,
}

impl PostalCodeResponse {
    /// Convert the first place into a [`Location`].
    pub(crate) fn into_location(self) -> Result<Option<Location>, FetchError> {
        let Some(place) = self.places.into_iter().next() else {
            return Ok(None);
        };
        let latitude = parse_coordinate("latitude", &place.latitude)?;
        let longitude = parse_coordinate("longitude", &place.longitude)?;
        let display_name = match place.state.as_deref().map(str::trim) {
            Some(state) if !state.is_empty() => format!("{}, {state}", place.name),
            _ => place.name,
        };
        Location::new(latitude, longitude, display_name)
            .map(Some)
            .map_err(|err| FetchError::ParseError {
                message: err.to_string(),
            })
    }
}

fn parse_coordinate(field: &str, raw: &str) -> Result<f64, FetchError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| FetchError::ParseError {
            message: format!("{field} {raw:?} is not a number: {err}"),
        })
}

/// HTTP-backed [`Geocoder`] for postal codes.
///
/// An unknown postal code (HTTP 404 or an empty place list) resolves to
/// `Ok(None)`.
#[derive(Debug)]
pub struct HttpGeocoder {
    fetcher: JsonFetcher,
}

impl HttpGeocoder {
    /// Create a geocoder for [`DEFAULT_GEOCODER_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(&HttpProviderConfig::new(DEFAULT_GEOCODER_URL))
    }

    /// Create a geocoder with explicit configuration.
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
}

impl Geocoder for HttpGeocoder {
    fn locate(&self, region: &RegionId) -> Result<Option<Location>, FetchError> {
        let url = self.fetcher.endpoint([region.as_str()]);
        let Some(response) = self.fetcher.get_json::<PostalCodeResponse>(&url)? else {
            return Ok(None);
        };
        let location = response.into_location()?;
        if location.is_none() {
            debug!("{url} listed no places for region {region}");
        }
        Ok(location)
    }
}
