//! Score a signal bundle and explain the result.
//!
//! The `Scorer` trait turns a [`SignalBundle`] into a [`ScoreReport`]: a
//! non-negative integer total plus one [`Reason`] per evaluated rule.

use std::fmt;

use crate::{SignalBundle, Verdict, VerdictBands};

/// The rule a [`Reason`] was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RuleKind {
    /// Forecast snowfall tier.
    Snowfall,
    /// Snow falling at evaluation time.
    ActiveSnow,
    /// Tomorrow's low temperature tier.
    Temperature,
    /// Liquid-equivalent precipitation volume.
    Precipitation,
    /// The region's closure threshold or overnight bias.
    LocalProfile,
    /// The region's cold-closure threshold.
    LocalCold,
}

/// One explanation line: which rule fired and what it contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reason {
    /// Rule that produced this reason.
    pub rule: RuleKind,
    /// Points contributed to the total; may be zero.
    pub contribution: i32,
    /// Human-readable explanation.
    pub message: String,
}

impl Reason {
    /// Construct a reason.
    #[must_use]
    pub fn new(rule: RuleKind, contribution: i32, message: impl Into<String>) -> Self {
        Self {
            rule,
            contribution,
            message: message.into(),
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A score with its explanations, in rule evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreReport {
    total: u32,
    reasons: Vec<Reason>,
}

impl ScoreReport {
    /// Construct a report.
    #[must_use]
    pub const fn new(total: u32, reasons: Vec<Reason>) -> Self {
        Self { total, reasons }
    }

    /// Final non-negative score.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Reasons in evaluation order.
    #[must_use]
    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    /// Reason messages in evaluation order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.reasons.iter().map(|reason| reason.message.as_str())
    }
}

/// Calculate a closure likelihood score for a signal bundle.
///
/// Implementations must be pure and deterministic: the same bundle always
/// yields the same report, and scoring never fails. They must be thread-safe
/// (`Send` + `Sync`).
///
/// Implementations must:
/// - Return a non-negative integer total.
/// - Append exactly one reason for every rule they evaluate, including rules
///   that contribute nothing.
///
/// Use [`Scorer::sanitise`] to turn a raw sum into a valid total.
///
/// # Examples
///
/// ```rust
/// use snowday_core::{Reason, RuleKind, ScoreReport, Scorer, SignalBundle, Snowfall, Verdict};
///
/// struct InchCounter;
///
/// impl Scorer for InchCounter {
///     fn score(&self, bundle: &SignalBundle) -> ScoreReport {
///         let inches = bundle.snowfall().inches();
///         let total = Self::sanitise(inches);
///         ScoreReport::new(total, vec![Reason::new(RuleKind::Snowfall, 0, "counted inches")])
///     }
/// }
///
/// let report = InchCounter.score(&SignalBundle::new(Snowfall::inches_of(9.0), 0.0));
/// assert_eq!(report.total(), 9);
/// assert_eq!(InchCounter.classify(report.total()), Verdict::VeryLikely);
/// ```
pub trait Scorer: Send + Sync {
    /// Score `bundle`.
    fn score(&self, bundle: &SignalBundle) -> ScoreReport;

    /// Map a total onto a verdict band.
    ///
    /// Defaults to [`VerdictBands::default`].
    fn classify(&self, total: u32) -> Verdict {
        VerdictBands::default().classify(total)
    }

    /// Clamp and round a raw sum.
    ///
    /// Returns `0` for non-finite or negative values and rounds half-up
    /// otherwise.
    fn sanitise(raw: f64) -> u32
    where
        Self: Sized,
    {
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }
        // Saturating float-to-int cast.
        (raw + 0.5).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Nothing;

    impl Scorer for Nothing {
        fn score(&self, _bundle: &SignalBundle) -> ScoreReport {
            ScoreReport::default()
        }
    }

    #[rstest]
    #[case(f64::NAN, 0)]
    #[case(f64::NEG_INFINITY, 0)]
    #[case(-3.0, 0)]
    #[case(0.0, 0)]
    #[case(2.4, 2)]
    #[case(2.5, 3)]
    #[case(11.0, 11)]
    fn sanitise_rounds_half_up(#[case] raw: f64, #[case] expected: u32) {
        assert_eq!(Nothing::sanitise(raw), expected);
    }

    #[rstest]
    fn report_exposes_messages_in_order() {
        let report = ScoreReport::new(
            3,
            vec![
                Reason::new(RuleKind::Snowfall, 3, "first"),
                Reason::new(RuleKind::Precipitation, 0, "second"),
            ],
        );
        assert_eq!(report.messages().collect::<Vec<_>>(), ["first", "second"]);
        assert_eq!(report.total(), 3);
    }

    #[rstest]
    fn default_classification_uses_standard_bands() {
        assert_eq!(Nothing.classify(5), Verdict::Possible);
    }
}
