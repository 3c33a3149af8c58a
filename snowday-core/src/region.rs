//! Region identifiers: the postal codes every lookup is keyed by.

use std::fmt;

use thiserror::Error;

/// A trimmed, non-empty postal code.
///
/// The identifier is used verbatim as the key for coordinate resolution and
/// profile lookup; no normalisation beyond trimming is applied.
///
/// # Examples
///
/// ```
/// use snowday_core::RegionId;
///
/// # fn main() -> Result<(), snowday_core::RegionIdError> {
/// let region = RegionId::new("  22153 ")?;
/// assert_eq!(region.as_str(), "22153");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct RegionId(String);

/// Errors returned by [`RegionId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionIdError {
    /// The identifier was empty after trimming.
    #[error("a region identifier (postal code) is required")]
    Empty,
}

impl RegionId {
    /// Validates and constructs a [`RegionId`].
    ///
    /// # Errors
    /// Returns [`RegionIdError::Empty`] when `raw` is empty or whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RegionIdError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RegionIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RegionId {
    type Error = RegionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RegionId> for String {
    fn from(value: RegionId) -> Self {
        value.0
    }
}
