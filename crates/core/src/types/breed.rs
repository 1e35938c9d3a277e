//! Breed name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`BreedName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BreedNameError {
    /// The input is empty or only whitespace.
    #[error("Breed name is required")]
    Empty,
}

/// A normalized dog breed name.
///
/// Breed names are compared case-insensitively and without surrounding
/// whitespace, so parsing trims the input and lowercases it. The upstream
/// catalog keys are already lowercase, which makes a parsed name directly
/// comparable against catalog entries.
///
/// ## Examples
///
/// ```
/// use breedbook_core::BreedName;
///
/// let name = BreedName::parse("  BullDog ").unwrap();
/// assert_eq!(name.as_str(), "bulldog");
///
/// assert!(BreedName::parse("").is_err());
/// assert!(BreedName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct BreedName(String);

impl BreedName {
    /// Parse and normalize a `BreedName` from caller input.
    ///
    /// # Errors
    ///
    /// Returns [`BreedNameError::Empty`] if the input is empty after trimming.
    pub fn parse(s: &str) -> Result<Self, BreedNameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(BreedNameError::Empty);
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// Returns the breed name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `BreedName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BreedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BreedName {
    type Err = BreedNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for BreedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
