//! The canonical closure rule set.
//!
//! Rules run in a fixed order and each appends exactly one [`Reason`], with
//! two exceptions: the active-snow and temperature rules stay silent when the
//! forecast did not report a condition code or a low, and the cold-threshold
//! rule only runs when a profile defines one and the low is known.
#![forbid(unsafe_code)]

use log::debug;
use snowday_core::{
    ClosureProfile, Reason, RuleKind, ScoreReport, Scorer, SignalBundle, Snowfall, SnowUnit,
    Verdict,
};

use crate::{ScoringThresholds, ThresholdsError};

const HEAVY_SNOW_POINTS: i32 = 5;
const MODERATE_SNOW_POINTS: i32 = 3;
const LIGHT_SNOW_POINTS: i32 = 1;
const ACTIVE_SNOW_POINTS: i32 = 2;
const BITTER_COLD_POINTS: i32 = 2;
const COLD_POINTS: i32 = 1;
const HIGH_PRECIPITATION_POINTS: i32 = 2;
const MODERATE_PRECIPITATION_POINTS: i32 = 1;
const LOCAL_COLD_POINTS: i32 = 1;

/// Rule-based [`Scorer`] over snowfall, conditions, temperature,
/// precipitation and the local closure profile.
///
/// # Examples
/// ```
/// use snowday_core::{Scorer, SignalBundle, Snowfall, Verdict};
/// use snowday_scorer::RuleScorer;
///
/// let bundle = SignalBundle::new(Snowfall::inches_of(6.0), 2.0).with_min_temperature(10.0);
/// let scorer = RuleScorer::default();
/// let report = scorer.score(&bundle);
/// assert_eq!(report.total(), 7);
/// assert_eq!(scorer.classify(report.total()), Verdict::Possible);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleScorer {
    thresholds: ScoringThresholds,
}

impl RuleScorer {
    /// Build a scorer from validated thresholds.
    ///
    /// # Errors
    /// Returns [`ThresholdsError`] when `thresholds` fail validation.
    pub fn new(thresholds: ScoringThresholds) -> Result<Self, ThresholdsError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn thresholds(&self) -> &ScoringThresholds {
        &self.thresholds
    }

    fn snowfall(&self, snow: Snowfall) -> Reason {
        let tiers = &self.thresholds.snowfall;
        let inches = snow.inches();
        let points = if inches >= tiers.heavy {
            HEAVY_SNOW_POINTS
        } else if inches >= tiers.moderate {
            MODERATE_SNOW_POINTS
        } else if inches >= tiers.light {
            LIGHT_SNOW_POINTS
        } else {
            0
        };
        let reported = match snow.unit() {
            SnowUnit::Inches => String::new(),
            unit => format!(" ({} {unit})", number(snow.amount())),
        };
        Reason::new(
            RuleKind::Snowfall,
            points,
            format!(
                "Forecasted snow: {} in{reported} → {}",
                number(inches),
                signed(points)
            ),
        )
    }

    fn active_snow(&self, code: u16) -> Reason {
        if self.thresholds.active_snow.contains(code) {
            Reason::new(
                RuleKind::ActiveSnow,
                ACTIVE_SNOW_POINTS,
                format!(
                    "Active snow now (weather code {code}) → {}",
                    signed(ACTIVE_SNOW_POINTS)
                ),
            )
        } else {
            Reason::new(
                RuleKind::ActiveSnow,
                0,
                format!("No active snow now (weather code {code}) → +0"),
            )
        }
    }

    fn temperature(&self, low: f64) -> Reason {
        let tiers = &self.thresholds.temperature;
        let points = if low <= tiers.bitter {
            BITTER_COLD_POINTS
        } else if low <= tiers.cold {
            COLD_POINTS
        } else {
            0
        };
        Reason::new(
            RuleKind::Temperature,
            points,
            format!("Tomorrow low {}°F → {}", number(low), signed(points)),
        )
    }

    fn precipitation(&self, millimetres: f64) -> Reason {
        let tiers = &self.thresholds.precipitation;
        let amount = number(millimetres);
        let (points, message) = if millimetres >= tiers.high {
            (
                HIGH_PRECIPITATION_POINTS,
                format!("High precip volume {amount} mm"),
            )
        } else if millimetres >= tiers.moderate {
            (
                MODERATE_PRECIPITATION_POINTS,
                format!("Moderate precip {amount} mm"),
            )
        } else {
            (0, format!("Precip {amount} mm"))
        };
        Reason::new(
            RuleKind::Precipitation,
            points,
            format!("{message} → {}", signed(points)),
        )
    }

    fn local_profile(&self, profile: &ClosureProfile, snow_inches: f64) -> Reason {
        let bonus = &self.thresholds.profile;
        let threshold = profile.closure_snow_threshold();
        if snow_inches >= threshold {
            let weight = profile.historical_closure_weight();
            let points = round_half_up(weight).clamp(bonus.min, bonus.max);
            return Reason::new(
                RuleKind::LocalProfile,
                points,
                format!(
                    "Local rule: forecast >= {} in and historical weight {} → {}",
                    number(threshold),
                    number(weight),
                    signed(points)
                ),
            );
        }
        match profile.overnight_snow_bias() {
            Some(bias) if snow_inches > 0.0 => {
                let points = round_half_up(bias).min(bonus.overnight_cap);
                Reason::new(
                    RuleKind::LocalProfile,
                    points,
                    format!("Local overnight bias → {}", signed(points)),
                )
            }
            _ => Reason::new(
                RuleKind::LocalProfile,
                0,
                "Local profile present but no threshold met → +0",
            ),
        }
    }

    fn local_cold(threshold: f64, low: f64) -> Reason {
        let (points, outcome) = if low <= threshold {
            (LOCAL_COLD_POINTS, "triggered")
        } else {
            (0, "not reached")
        };
        Reason::new(
            RuleKind::LocalCold,
            points,
            format!(
                "Local cold threshold {}°F {outcome} (tomorrow min {}) → {}",
                number(threshold),
                number(low),
                signed(points)
            ),
        )
    }
}

impl Scorer for RuleScorer {
    fn score(&self, bundle: &SignalBundle) -> ScoreReport {
        let snow = bundle.snowfall();
        let low = bundle.min_temperature();
        let mut reasons = Vec::with_capacity(6);

        reasons.push(self.snowfall(snow));
        if let Some(code) = bundle.condition_code() {
            reasons.push(self.active_snow(code));
        }
        if let Some(value) = low {
            reasons.push(self.temperature(value));
        }
        reasons.push(self.precipitation(bundle.precipitation()));
        match bundle.profile() {
            Some(profile) => {
                reasons.push(self.local_profile(profile, snow.inches()));
                if let (Some(threshold), Some(value)) = (profile.closure_cold_threshold(), low) {
                    reasons.push(Self::local_cold(threshold, value));
                }
            }
            None => reasons.push(Reason::new(
                RuleKind::LocalProfile,
                0,
                "No local profile found for this region → +0",
            )),
        }

        let sum = reasons
            .iter()
            .fold(0_i32, |acc, reason| acc.saturating_add(reason.contribution));
        let total = Self::sanitise(f64::from(sum));
        debug!("scored {total} from {} rules", reasons.len());
        ScoreReport::new(total, reasons)
    }

    fn classify(&self, total: u32) -> Verdict {
        self.thresholds.verdict.classify(total)
    }
}

/// Round to the nearest integer with ties towards positive infinity,
/// saturating at the `i32` range.
#[expect(
    clippy::float_arithmetic,
    reason = "half-up rounding shifts by one half before flooring"
)]
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the i32 range before the cast"
)]
pub(crate) fn round_half_up(value: f64) -> i32 {
    let rounded = (value + 0.5).floor();
    rounded.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Render a measurement with at most one decimal place, dropping a trailing
/// `.0`.
pub(crate) fn number(value: f64) -> String {
    let formatted = format!("{value:.1}");
    match formatted.strip_suffix(".0") {
        Some(whole) if whole == "-0" => "0".to_owned(),
        Some(whole) => whole.to_owned(),
        None => formatted,
    }
}

fn signed(points: i32) -> String {
    format!("{points:+}")
}
