//! Verdict bands: mapping a score onto one of three outcomes.

use std::fmt;

/// Outcome band for a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Verdict {
    /// Closure is expected.
    VeryLikely,
    /// Closure is a coin toss.
    Possible,
    /// School is likely open.
    Unlikely,
}

impl Verdict {
    /// Short lower-case label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLikely => "very likely",
            Self::Possible => "possible",
            Self::Unlikely => "unlikely",
        }
    }

    /// Headline shown to the user.
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            Self::VeryLikely => "Very likely: Snow day expected",
            Self::Possible => "Possible: Snow day 50/50",
            Self::Unlikely => "Unlikely: School likely open",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower score bounds of the two upper verdict bands.
///
/// # Examples
/// ```
/// use snowday_core::{Verdict, VerdictBands};
///
/// let bands = VerdictBands::default();
/// assert_eq!(bands.classify(8), Verdict::VeryLikely);
/// assert_eq!(bands.classify(7), Verdict::Possible);
/// assert_eq!(bands.classify(4), Verdict::Unlikely);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct VerdictBands {
    /// Scores at or above this are [`Verdict::VeryLikely`].
    pub very_likely: u32,
    /// Scores at or above this, and below `very_likely`, are
    /// [`Verdict::Possible`].
    pub possible: u32,
}

impl Default for VerdictBands {
    fn default() -> Self {
        Self {
            very_likely: 8,
            possible: 5,
        }
    }
}

impl VerdictBands {
    /// Classify a score.
    #[must_use]
    pub const fn classify(&self, score: u32) -> Verdict {
        if score >= self.very_likely {
            Verdict::VeryLikely
        } else if score >= self.possible {
            Verdict::Possible
        } else {
            Verdict::Unlikely
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Verdict::Unlikely)]
    #[case(4, Verdict::Unlikely)]
    #[case(5, Verdict::Possible)]
    #[case(7, Verdict::Possible)]
    #[case(8, Verdict::VeryLikely)]
    #[case(15, Verdict::VeryLikely)]
    fn default_bands(#[case] score: u32, #[case] expected: Verdict) {
        assert_eq!(VerdictBands::default().classify(score), expected);
    }

    #[rstest]
    fn custom_bands_move_the_edges() {
        let bands = VerdictBands {
            very_likely: 10,
            possible: 3,
        };
        assert_eq!(bands.classify(3), Verdict::Possible);
        assert_eq!(bands.classify(9), Verdict::Possible);
        assert_eq!(bands.classify(10), Verdict::VeryLikely);
    }

    #[rstest]
    fn headline_matches_band() {
        assert_eq!(Verdict::Possible.headline(), "Possible: Snow day 50/50");
        assert_eq!(Verdict::VeryLikely.to_string(), "very likely");
    }
}
