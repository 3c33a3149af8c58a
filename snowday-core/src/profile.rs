//! Local closure profiles: hand-curated per-region adjustments.
//!
//! A [`RawProfile`] mirrors a record as authored in the profile table, with
//! every field optional. [`ClosureProfile::from_raw`] normalises it into the
//! read-only shape the scorer consumes.

use std::collections::HashMap;

use thiserror::Error;

use crate::RegionId;

/// A profile record as stored, before normalisation.
///
/// Fields hold `None` when the author omitted them or wrote something that
/// is not a number.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawProfile {
    /// Snowfall in inches at or above which local closures are expected.
    pub closure_snow_threshold: Option<f64>,
    /// How reliably the region closes once the threshold is met, `0..=5`.
    pub historical_closure_weight: Option<f64>,
    /// Flat nudge applied when some snow is forecast below the threshold.
    pub overnight_snow_bias: Option<f64>,
    /// Low temperature in °F at or below which a cold closure is likely.
    pub closure_cold_threshold: Option<f64>,
}

/// Normalised, read-only closure profile for one region.
///
/// # Examples
/// ```
/// use snowday_core::ClosureProfile;
///
/// let profile = ClosureProfile::new(3.0, 7.5).with_overnight_bias(1.4);
/// assert_eq!(profile.historical_closure_weight(), 5.0);
/// assert_eq!(profile.overnight_snow_bias(), Some(1.4));
/// ```
///
/// Decoding goes through [`ClosureProfile::from_raw`], so a decoded profile
/// is normalised the same way as a stored one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawProfile")
)]
pub struct ClosureProfile {
    closure_snow_threshold: f64,
    historical_closure_weight: f64,
    overnight_snow_bias: Option<f64>,
    closure_cold_threshold: Option<f64>,
}

impl ClosureProfile {
    /// Upper bound of the historical closure weight scale.
    pub const MAX_HISTORICAL_WEIGHT: f64 = 5.0;

    /// Build a profile from a snowfall threshold (inches) and a historical
    /// weight.
    ///
    /// The weight is clamped into `0.0..=5.0`; a non-finite weight becomes
    /// `0.0`. A non-finite or missing threshold is stored as `f64::INFINITY`
    /// so the threshold can never be met.
    #[must_use]
    pub fn new(closure_snow_threshold: f64, historical_closure_weight: f64) -> Self {
        let threshold = if closure_snow_threshold.is_nan() {
            f64::INFINITY
        } else {
            closure_snow_threshold
        };
        let weight = if historical_closure_weight.is_finite() {
            historical_closure_weight.clamp(0.0, Self::MAX_HISTORICAL_WEIGHT)
        } else {
            0.0
        };
        Self {
            closure_snow_threshold: threshold,
            historical_closure_weight: weight,
            overnight_snow_bias: None,
            closure_cold_threshold: None,
        }
    }

    /// Add an overnight snow bias while returning `self` for chaining.
    ///
    /// Non-finite values are ignored.
    #[must_use]
    pub fn with_overnight_bias(mut self, bias: f64) -> Self {
        self.overnight_snow_bias = Some(bias).filter(|value| value.is_finite());
        self
    }

    /// Add a cold-closure temperature threshold (°F) while returning `self`.
    ///
    /// Non-finite values are ignored.
    #[must_use]
    pub fn with_cold_threshold(mut self, threshold: f64) -> Self {
        self.closure_cold_threshold = Some(threshold).filter(|value| value.is_finite());
        self
    }

    /// Normalise a stored record.
    #[must_use]
    pub fn from_raw(raw: &RawProfile) -> Self {
        let mut profile = Self::new(
            raw.closure_snow_threshold.unwrap_or(f64::INFINITY),
            raw.historical_closure_weight.unwrap_or(0.0),
        );
        if let Some(bias) = raw.overnight_snow_bias {
            profile = profile.with_overnight_bias(bias);
        }
        if let Some(threshold) = raw.closure_cold_threshold {
            profile = profile.with_cold_threshold(threshold);
        }
        profile
    }

    /// Snowfall threshold in inches.
    #[must_use]
    pub const fn closure_snow_threshold(&self) -> f64 {
        self.closure_snow_threshold
    }

    /// Historical closure weight in `0.0..=5.0`.
    #[must_use]
    pub const fn historical_closure_weight(&self) -> f64 {
        self.historical_closure_weight
    }

    /// Overnight snow bias, if configured.
    #[must_use]
    pub const fn overnight_snow_bias(&self) -> Option<f64> {
        self.overnight_snow_bias
    }

    /// Cold-closure threshold in °F, if configured.
    #[must_use]
    pub const fn closure_cold_threshold(&self) -> Option<f64> {
        self.closure_cold_threshold
    }
}

impl From<RawProfile> for ClosureProfile {
    fn from(raw: RawProfile) -> Self {
        Self::from_raw(&raw)
    }
}

/// Errors from [`ProfileStore::lookup`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileStoreError {
    /// The backing table could not be consulted.
    #[error("profile store {store} is unavailable: {message}")]
    Unavailable {
        /// Name of the store, e.g. a file path or URL.
        store: String,
        /// Description of the failure.
        message: String,
    },
}

/// Look up the closure profile for a region.
///
/// Lookups are exact-key; a missing region is the normal `Ok(None)` case and
/// there is no fallback to neighbouring regions.
pub trait ProfileStore: Send + Sync {
    /// Return the stored profile for `region`, if any.
    fn lookup(&self, region: &RegionId) -> Result<Option<RawProfile>, ProfileStoreError>;
}

impl<T: ProfileStore + ?Sized> ProfileStore for Box<T> {
    fn lookup(&self, region: &RegionId) -> Result<Option<RawProfile>, ProfileStoreError> {
        (**self).lookup(region)
    }
}

/// In-memory [`ProfileStore`] backed by a hash map.
///
/// # Examples
/// ```
/// use snowday_core::{MemoryProfileStore, ProfileStore, RawProfile, RegionId};
///
/// let region = RegionId::new("22153").expect("valid region");
/// let store = MemoryProfileStore::new().with_profile(region.clone(), RawProfile::default());
/// assert!(store.lookup(&region).expect("lookup").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: HashMap<RegionId, RawProfile>,
}

impl MemoryProfileStore {
    /// Construct an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the profile for `region`, returning the replaced
    /// profile.
    pub fn insert(&mut self, region: RegionId, profile: RawProfile) -> Option<RawProfile> {
        self.profiles.insert(region, profile)
    }

    /// Insert a profile while returning `self` for chaining.
    #[must_use]
    pub fn with_profile(mut self, region: RegionId, profile: RawProfile) -> Self {
        self.insert(region, profile);
        self
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Report whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<(RegionId, RawProfile)> for MemoryProfileStore {
    fn from_iter<I: IntoIterator<Item = (RegionId, RawProfile)>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn lookup(&self, region: &RegionId) -> Result<Option<RawProfile>, ProfileStoreError> {
        Ok(self.profiles.get(region).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-1.0, 0.0)]
    #[case(2.5, 2.5)]
    #[case(9.0, 5.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    fn weight_is_clamped(#[case] weight: f64, #[case] expected: f64) {
        let profile = ClosureProfile::new(4.0, weight);
        assert_eq!(profile.historical_closure_weight(), expected);
    }

    #[rstest]
    fn missing_threshold_can_never_be_met() {
        let profile = ClosureProfile::from_raw(&RawProfile {
            historical_closure_weight: Some(3.0),
            ..RawProfile::default()
        });
        assert!(profile.closure_snow_threshold().is_infinite());
        assert!(profile.overnight_snow_bias().is_none());
        assert!(profile.closure_cold_threshold().is_none());
    }

    #[rstest]
    fn from_raw_keeps_optional_fields() {
        let profile = ClosureProfile::from_raw(&RawProfile {
            closure_snow_threshold: Some(3.0),
            historical_closure_weight: Some(4.0),
            overnight_snow_bias: Some(1.4),
            closure_cold_threshold: Some(5.0),
        });
        assert_eq!(profile.closure_snow_threshold(), 3.0);
        assert_eq!(profile.historical_closure_weight(), 4.0);
        assert_eq!(profile.overnight_snow_bias(), Some(1.4));
        assert_eq!(profile.closure_cold_threshold(), Some(5.0));
    }

    #[rstest]
    fn non_finite_optional_fields_are_dropped() {
        let profile = ClosureProfile::new(3.0, 1.0)
            .with_overnight_bias(f64::NAN)
            .with_cold_threshold(f64::NEG_INFINITY);
        assert!(profile.overnight_snow_bias().is_none());
        assert!(profile.closure_cold_threshold().is_none());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn decoding_clamps_the_weight() {
        let profile: ClosureProfile = serde_json::from_str(
            r#"{"closure_snow_threshold": null, "historical_closure_weight": 99.0}"#,
        )
        .expect("decodes");
        assert_eq!(profile.historical_closure_weight(), 5.0);
        assert!(profile.closure_snow_threshold().is_infinite());
    }

    #[rstest]
    fn memory_store_uses_exact_keys() {
        let region = RegionId::new("22153").expect("valid region");
        let neighbour = RegionId::new("22152").expect("valid region");
        let store: MemoryProfileStore = [(region.clone(), RawProfile::default())]
            .into_iter()
            .collect();

        assert!(store.lookup(&region).expect("lookup").is_some());
        assert!(store.lookup(&neighbour).expect("lookup").is_none());
        assert_eq!(store.len(), 1);
    }
}
