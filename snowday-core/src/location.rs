//! Resolved locations and the coordinate-resolution collaborator.

use thiserror::Error;

use crate::{FetchError, RegionId};

/// Coordinates and display name for a region.
///
/// # Examples
///
/// ```
/// use snowday_core::Location;
///
/// # fn main() -> Result<(), snowday_core::LocationError> {
/// let location = Location::new(38.78, -77.23, "Springfield, VA")?;
/// assert_eq!(location.display_name(), "Springfield, VA");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "LocationFields")
)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    display_name: String,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct LocationFields {
    latitude: f64,
    longitude: f64,
    display_name: String,
}

#[cfg(feature = "serde")]
impl TryFrom<LocationFields> for Location {
    type Error = LocationError;

    fn try_from(fields: LocationFields) -> Result<Self, Self::Error> {
        Self::new(fields.latitude, fields.longitude, fields.display_name)
    }
}

/// Errors returned by [`Location::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    /// Latitude or longitude was non-finite or outside the valid range.
    #[error("coordinates ({latitude}, {longitude}) are outside the valid range")]
    OutOfRange {
        /// Supplied latitude.
        latitude: f64,
        /// Supplied longitude.
        longitude: f64,
    },
}

impl Location {
    /// Validates and constructs a [`Location`].
    ///
    /// # Errors
    /// Returns [`LocationError::OutOfRange`] when the latitude is outside
    /// `-90.0..=90.0`, the longitude is outside `-180.0..=180.0`, or either is
    /// not finite.
    pub fn new(
        latitude: f64,
        longitude: f64,
        display_name: impl Into<String>,
    ) -> Result<Self, LocationError> {
        let valid_latitude = (-90.0..=90.0).contains(&latitude);
        let valid_longitude = (-180.0..=180.0).contains(&longitude);
        if !(valid_latitude && valid_longitude) {
            return Err(LocationError::OutOfRange {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            display_name: display_name.into(),
        })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Human-readable place name, e.g. `"Burlington, VT"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Resolve a region identifier to coordinates.
///
/// Implementations return `Ok(None)` when the identifier is unknown; that is a
/// resolution failure for the caller to report, not a transport error.
/// Geocoders must be `Send + Sync` so a prediction can run lookups on worker
/// threads.
///
/// # Examples
///
/// ```
/// use snowday_core::{FetchError, Geocoder, Location, RegionId};
///
/// struct SingleTown;
///
/// impl Geocoder for SingleTown {
///     fn locate(&self, region: &RegionId) -> Result<Option<Location>, FetchError> {
///         if region.as_str() != "05401" {
///             return Ok(None);
///         }
///         Location::new(44.48, -73.21, "Burlington, VT")
///             .map(Some)
///             .map_err(|err| FetchError::ParseError { message: err.to_string() })
///     }
/// }
///
/// let region = RegionId::new("05401")?;
/// assert!(SingleTown.locate(&region)?.is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Geocoder: Send + Sync {
    /// Return the location for `region`, or `None` when it is unknown.
    fn locate(&self, region: &RegionId) -> Result<Option<Location>, FetchError>;
}

impl<T: Geocoder + ?Sized> Geocoder for Box<T> {
    fn locate(&self, region: &RegionId) -> Result<Option<Location>, FetchError> {
        (**self).locate(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_boundary_coordinates(#[case] latitude: f64, #[case] longitude: f64) {
        assert!(Location::new(latitude, longitude, "Edge").is_ok());
    }

    #[rstest]
    #[case(90.1, 0.0)]
    #[case(0.0, -180.5)]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn rejects_out_of_range_coordinates(#[case] latitude: f64, #[case] longitude: f64) {
        let result = Location::new(latitude, longitude, "Nowhere");
        assert!(matches!(result, Err(LocationError::OutOfRange { .. })));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn decoding_rejects_out_of_range_coordinates() {
        let result = serde_json::from_str::<Location>(
            r#"{"latitude": 123.0, "longitude": 0.0, "display_name": "Nowhere"}"#,
        );
        assert!(result.is_err());
    }
}
