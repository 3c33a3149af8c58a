//! Closure profiles loaded from a JSON table keyed by postal code.
//!
//! The table is a single JSON object:
//!
//! ```json
//! {
//!   "05401": {
//!     "closure_inch_threshold": 4,
//!     "historical_closure_weight": 3,
//!     "bias_when_snow_overnight": 1,
//!     "closure_temp_threshold_f": -5
//!   }
//! }
//! ```
//!
//! Values may be numbers or numeric strings; anything else is treated as
//! missing. The newer field names (`closure_snow_threshold`,
//! `overnight_snow_bias`, `closure_cold_threshold`) are accepted as
//! alternatives.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use serde_json::{Map, Value};
use snowday_core::{MemoryProfileStore, ProfileStore, ProfileStoreError, RawProfile, RegionId};
use thiserror::Error;

use crate::fs::read_to_string;

const THRESHOLD_FIELDS: [&str; 2] = ["closure_inch_threshold", "closure_snow_threshold"];
const WEIGHT_FIELDS: [&str; 1] = ["historical_closure_weight"];
const BIAS_FIELDS: [&str; 2] = ["bias_when_snow_overnight", "overnight_snow_bias"];
const COLD_FIELDS: [&str; 2] = ["closure_temp_threshold_f", "closure_cold_threshold"];

/// Errors raised while loading a profile table.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    /// Reading the file failed.
    #[error("failed to read profile table {path}")]
    Read {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// The table was not valid JSON.
    #[error("failed to parse profile table {origin}")]
    Parse {
        /// Where the table came from.
        origin: String,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The table's top level was not an object keyed by postal code.
    #[error("profile table {origin} must be a JSON object keyed by postal code")]
    NotAnObject {
        /// Where the table came from.
        origin: String,
    },
}

/// [`ProfileStore`] over a JSON table loaded once at construction.
///
/// # Examples
/// ```
/// use snowday_core::{ProfileStore, RegionId};
/// use snowday_data::JsonProfileStore;
///
/// let store = JsonProfileStore::from_json(
///     "inline",
///     r#"{"05401": {"closure_inch_threshold": "4", "historical_closure_weight": 3}}"#,
/// )?;
/// let profile = store.lookup(&RegionId::new("05401")?)?.expect("profile stored");
/// assert_eq!(profile.closure_snow_threshold, Some(4.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    origin: String,
    profiles: MemoryProfileStore,
}

impl JsonProfileStore {
    /// Load the table at `path`.
    ///
    /// # Errors
    /// Returns [`ProfileLoadError`] when the file cannot be read or parsed.
    pub fn load(path: &Utf8Path) -> Result<Self, ProfileLoadError> {
        let json = read_to_string(path).map_err(|source| ProfileLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path.as_str(), &json)
    }

    /// Load the table at `path`, treating a missing file as an empty table.
    ///
    /// # Errors
    /// Returns [`ProfileLoadError`] when an existing file cannot be read or
    /// parsed.
    pub fn load_or_empty(path: &Utf8Path) -> Result<Self, ProfileLoadError> {
        match Self::load(path) {
            Err(ProfileLoadError::Read { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                debug!("profile table {path} not found; continuing without profiles");
                Ok(Self::empty(path.as_str()))
            }
            other => other,
        }
    }

    /// Parse a table from a JSON string. `origin` names the table in errors.
    ///
    /// # Errors
    /// Returns [`ProfileLoadError::Parse`] for malformed JSON and
    /// [`ProfileLoadError::NotAnObject`] when the top level is not an object.
    pub fn from_json(origin: impl Into<String>, json: &str) -> Result<Self, ProfileLoadError> {
        let origin = origin.into();
        let document: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(source) => return Err(ProfileLoadError::Parse { origin, source }),
        };
        let Value::Object(entries) = document else {
            return Err(ProfileLoadError::NotAnObject { origin });
        };

        let mut profiles = MemoryProfileStore::new();
        for (key, entry) in entries {
            let Ok(region) = RegionId::new(&key) else {
                warn!("skipping profile with a blank postal code in {origin}");
                continue;
            };
            let Value::Object(fields) = entry else {
                warn!("skipping profile {region} in {origin}: expected an object");
                continue;
            };
            if profiles
                .insert(region.clone(), raw_profile(&fields))
                .is_some()
            {
                warn!(
                    "profile key {key:?} in {origin} repeats postal code {region}; \
                     keeping the later entry"
                );
            }
        }
        debug!("loaded {} closure profiles from {origin}", profiles.len());
        Ok(Self { origin, profiles })
    }

    /// An empty table.
    #[must_use]
    pub fn empty(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            profiles: MemoryProfileStore::new(),
        }
    }

    /// Where the table came from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Report whether the table holds no profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for JsonProfileStore {
    fn lookup(&self, region: &RegionId) -> Result<Option<RawProfile>, ProfileStoreError> {
        self.profiles.lookup(region)
    }
}

fn raw_profile(fields: &Map<String, Value>) -> RawProfile {
    RawProfile {
        closure_snow_threshold: first_number(fields, &THRESHOLD_FIELDS),
        historical_closure_weight: first_number(fields, &WEIGHT_FIELDS),
        overnight_snow_bias: first_number(fields, &BIAS_FIELDS),
        closure_cold_threshold: first_number(fields, &COLD_FIELDS),
    }
}

fn first_number(fields: &Map<String, Value>, names: &[&str]) -> Option<f64> {
    names
        .iter()
        .find_map(|name| fields.get(*name).and_then(lenient_number))
}

/// Accept JSON numbers and numeric strings; reject everything else.
fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|parsed| parsed.is_finite())
}
