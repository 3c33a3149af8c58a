//! Error types raised while loading or validating scoring thresholds.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised by [`ScoringThresholds::validate`](crate::ScoringThresholds::validate)
/// and [`ScoringThresholds::from_json`](crate::ScoringThresholds::from_json).
#[derive(Debug, Error)]
pub enum ThresholdsError {
    /// The JSON document could not be decoded.
    #[error("failed to parse scoring thresholds")]
    Parse {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A threshold was NaN or infinite.
    #[error("threshold {field} must be finite, got {value}")]
    NonFinite {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// Snowfall tiers were not strictly increasing.
    #[error("snowfall tiers must satisfy light < moderate < heavy, got {light} / {moderate} / {heavy}")]
    UnorderedSnowfallTiers {
        /// Lower bound of the light tier, in inches.
        light: f64,
        /// Lower bound of the moderate tier, in inches.
        moderate: f64,
        /// Lower bound of the heavy tier, in inches.
        heavy: f64,
    },
    /// Temperature tiers were not strictly increasing.
    #[error("temperature tiers must satisfy bitter < cold, got {bitter} / {cold}")]
    UnorderedTemperatureTiers {
        /// Upper bound of the bitter tier, in °F.
        bitter: f64,
        /// Upper bound of the cold tier, in °F.
        cold: f64,
    },
    /// Precipitation tiers were not strictly increasing.
    #[error("precipitation tiers must satisfy moderate < high, got {moderate} / {high}")]
    UnorderedPrecipitationTiers {
        /// Lower bound of the moderate tier, in millimetres.
        moderate: f64,
        /// Lower bound of the high tier, in millimetres.
        high: f64,
    },
    /// The active-snow weather code range was inverted.
    #[error("active snow code range {min}..={max} is inverted")]
    InvertedCodeRange {
        /// First code of the range.
        min: u16,
        /// Last code of the range.
        max: u16,
    },
    /// The profile bonus bounds were inverted, negative or above the weight
    /// scale.
    #[error(
        "profile bonus range {min}..={max} and overnight cap {overnight_cap} must be ordered \
         and within 0..={limit}"
    )]
    InvalidProfileBonus {
        /// Smallest bonus.
        min: i32,
        /// Largest bonus.
        max: i32,
        /// Cap on the overnight bias.
        overnight_cap: i32,
        /// Largest value any bound may take.
        limit: i32,
    },
    /// Verdict bands were not strictly increasing.
    #[error("verdict bands must satisfy possible < very_likely, got {possible} / {very_likely}")]
    UnorderedVerdictBands {
        /// Lower bound of the possible band.
        possible: u32,
        /// Lower bound of the very likely band.
        very_likely: u32,
    },
}
