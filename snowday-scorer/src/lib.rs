//! Rule-based closure scoring for Snowday predictions.
//!
//! [`RuleScorer`] implements the [`Scorer`](snowday_core::Scorer) trait over a
//! [`SignalBundle`](snowday_core::SignalBundle):
//! - **Snowfall tier**: +5 / +3 / +1 for at least 6 / 3 / 1 inches.
//! - **Active snow**: +2 while the current WMO code is a snow code (71–86).
//! - **Temperature tier**: +2 / +1 for a low at or below 15 / 25 °F.
//! - **Precipitation volume**: +2 / +1 for at least 10 / 3 mm.
//! - **Local profile**: a bonus from the region's historical closure weight
//!   once its snowfall threshold is met, otherwise a capped overnight bias.
//! - **Local cold threshold**: +1 when the low reaches the region's cold
//!   threshold.
//!
//! All thresholds live in [`ScoringThresholds`] and can be loaded from JSON.
//!
//! # Examples
//!
//! ```
//! use snowday_core::{ClosureProfile, Scorer, SignalBundle, Snowfall, Verdict};
//! use snowday_scorer::RuleScorer;
//!
//! let bundle = SignalBundle::new(Snowfall::inches_of(4.0), 12.0)
//!     .with_condition_code(75)
//!     .with_min_temperature(30.0)
//!     .with_profile(ClosureProfile::new(3.0, 4.0));
//! let scorer = RuleScorer::default();
//! let report = scorer.score(&bundle);
//! assert_eq!(report.total(), 11);
//! assert_eq!(scorer.classify(report.total()), Verdict::VeryLikely);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod rules;
mod thresholds;

pub use error::ThresholdsError;
pub use rules::RuleScorer;
pub use thresholds::{
    ActiveSnowCodes, PrecipitationTiers, ProfileBonus, ScoringThresholds, SnowfallTiers,
    TemperatureTiers,
};
