//! Tunable thresholds for the closure rules.
//!
//! Defaults reproduce the canonical rule set. Every field may be overridden
//! from JSON; omitted fields keep their defaults.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use snowday_core::VerdictBands;

use crate::ThresholdsError;

/// Lower bounds (inches) of the snowfall tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowfallTiers {
    /// Snowfall at or above this scores the heavy tier.
    pub heavy: f64,
    /// Snowfall at or above this scores the moderate tier.
    pub moderate: f64,
    /// Snowfall at or above this scores the light tier.
    pub light: f64,
}

impl Default for SnowfallTiers {
    fn default() -> Self {
        Self {
            heavy: 6.0,
            moderate: 3.0,
            light: 1.0,
        }
    }
}

/// Inclusive range of WMO codes counted as snow falling now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveSnowCodes {
    /// First snow code.
    pub min: u16,
    /// Last snow code.
    pub max: u16,
}

impl Default for ActiveSnowCodes {
    fn default() -> Self {
        Self { min: 71, max: 86 }
    }
}

impl ActiveSnowCodes {
    /// Report whether `code` falls inside the range.
    #[must_use]
    pub const fn contains(&self, code: u16) -> bool {
        code >= self.min && code <= self.max
    }
}

/// Upper bounds (°F) of the low-temperature tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureTiers {
    /// A low at or below this scores the bitter tier.
    pub bitter: f64,
    /// A low at or below this scores the cold tier.
    pub cold: f64,
}

impl Default for TemperatureTiers {
    fn default() -> Self {
        Self {
            bitter: 15.0,
            cold: 25.0,
        }
    }
}

/// Lower bounds (mm) of the precipitation tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecipitationTiers {
    /// Precipitation at or above this scores the high tier.
    pub high: f64,
    /// Precipitation at or above this scores the moderate tier.
    pub moderate: f64,
}

impl Default for PrecipitationTiers {
    fn default() -> Self {
        Self {
            high: 10.0,
            moderate: 3.0,
        }
    }
}

/// Bounds on what a closure profile may contribute.
///
/// Every bound lies in `0..=`[`ProfileBonus::LIMIT`], the historical closure
/// weight scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileBonus {
    /// Smallest bonus once the local snowfall threshold is met.
    pub min: i32,
    /// Largest bonus once the local snowfall threshold is met.
    pub max: i32,
    /// Cap on the overnight snow bias.
    pub overnight_cap: i32,
}

impl ProfileBonus {
    /// Largest value any profile bound may take.
    pub const LIMIT: i32 = 5;

    const fn in_range(value: i32) -> bool {
        value >= 0 && value <= Self::LIMIT
    }
}

impl Default for ProfileBonus {
    fn default() -> Self {
        Self {
            min: 1,
            max: 4,
            overnight_cap: 2,
        }
    }
}

/// Complete threshold configuration for [`RuleScorer`](crate::RuleScorer).
///
/// # Examples
/// ```
/// use snowday_scorer::ScoringThresholds;
///
/// let thresholds = ScoringThresholds::from_json(r#"{"snowfall": {"heavy": 8.0}}"#)?;
/// assert_eq!(thresholds.snowfall.heavy, 8.0);
/// assert_eq!(thresholds.snowfall.moderate, 3.0);
/// # Ok::<(), snowday_scorer::ThresholdsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    /// Snowfall tiers.
    pub snowfall: SnowfallTiers,
    /// Active-snow code range.
    pub active_snow: ActiveSnowCodes,
    /// Low-temperature tiers.
    pub temperature: TemperatureTiers,
    /// Precipitation tiers.
    pub precipitation: PrecipitationTiers,
    /// Profile contribution bounds.
    pub profile: ProfileBonus,
    /// Verdict band edges.
    pub verdict: VerdictBands,
}

impl ScoringThresholds {
    /// Decode thresholds from JSON and validate them.
    ///
    /// # Errors
    /// Returns [`ThresholdsError::Parse`] for malformed JSON and the other
    /// variants when [`ScoringThresholds::validate`] rejects the values.
    pub fn from_json(json: &str) -> Result<Self, ThresholdsError> {
        let thresholds: Self =
            serde_json::from_str(json).map_err(|source| ThresholdsError::Parse { source })?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check that every tier is finite and strictly ordered and that the
    /// profile bounds stay on the weight scale.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ThresholdsError> {
        let finite = [
            ("snowfall.heavy", self.snowfall.heavy),
            ("snowfall.moderate", self.snowfall.moderate),
            ("snowfall.light", self.snowfall.light),
            ("temperature.bitter", self.temperature.bitter),
            ("temperature.cold", self.temperature.cold),
            ("precipitation.high", self.precipitation.high),
            ("precipitation.moderate", self.precipitation.moderate),
        ];
        if let Some((field, value)) = finite.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(ThresholdsError::NonFinite { field, value });
        }

        let SnowfallTiers {
            heavy,
            moderate,
            light,
        } = self.snowfall;
        if !(light < moderate && moderate < heavy) {
            return Err(ThresholdsError::UnorderedSnowfallTiers {
                light,
                moderate,
                heavy,
            });
        }

        let TemperatureTiers { bitter, cold } = self.temperature;
        if bitter >= cold {
            return Err(ThresholdsError::UnorderedTemperatureTiers { bitter, cold });
        }

        let PrecipitationTiers {
            high,
            moderate: precip_moderate,
        } = self.precipitation;
        if precip_moderate >= high {
            return Err(ThresholdsError::UnorderedPrecipitationTiers {
                moderate: precip_moderate,
                high,
            });
        }

        let ActiveSnowCodes { min, max } = self.active_snow;
        if min > max {
            return Err(ThresholdsError::InvertedCodeRange { min, max });
        }

        let ProfileBonus {
            min: bonus_min,
            max: bonus_max,
            overnight_cap,
        } = self.profile;
        let bounded = [bonus_min, bonus_max, overnight_cap]
            .into_iter()
            .all(ProfileBonus::in_range);
        if !bounded || bonus_min > bonus_max {
            return Err(ThresholdsError::InvalidProfileBonus {
                min: bonus_min,
                max: bonus_max,
                overnight_cap,
                limit: ProfileBonus::LIMIT,
            });
        }

        let VerdictBands {
            very_likely,
            possible,
        } = self.verdict;
        if possible >= very_likely {
            return Err(ThresholdsError::UnorderedVerdictBands {
                possible,
                very_likely,
            });
        }
        Ok(())
    }
}
