//! Immutable capture of the breed catalog.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::BreedName;

/// One timestamped capture of every breed name known upstream.
///
/// Names are sorted alphabetically and deduplicated on construction. A
/// snapshot is never modified after it is built; a refresh produces a new
/// snapshot that replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    breeds: Vec<String>,
    captured_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Build a snapshot from upstream breed names captured at `captured_at`.
    #[must_use]
    pub fn new<I>(breeds: I, captured_at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut breeds: Vec<String> = breeds.into_iter().collect();
        breeds.sort_unstable();
        breeds.dedup();

        Self {
            breeds,
            captured_at,
        }
    }

    /// Sorted breed names.
    #[must_use]
    pub fn breeds(&self) -> &[String] {
        &self.breeds
    }

    /// When the snapshot was captured.
    #[must_use]
    pub const fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Whether the catalog lists `breed`.
    #[must_use]
    pub fn contains(&self, breed: &BreedName) -> bool {
        self.breeds
            .binary_search_by(|candidate| candidate.as_str().cmp(breed.as_str()))
            .is_ok()
    }

    /// Number of breeds in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    /// Whether the snapshot holds no breeds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }
}
