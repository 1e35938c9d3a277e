//! Caller-facing error taxonomy for the breed services.

use std::fmt;

use breedbook_core::BreedNameError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the catalog, image, and favorites services.
///
/// Upstream transport errors never cross this boundary as-is; each service
/// maps them into one of the upstream variants here.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Caller input was empty or malformed; no I/O was attempted.
    #[error("{0}")]
    Validation(#[from] BreedNameError),

    /// The breed is not in the live catalog, or upstream has no images for it.
    #[error("Breed '{0}' not found")]
    BreedNotFound(String),

    /// Removal of a breed that is not a favorite.
    #[error("Breed '{0}' is not in favorites")]
    NotInFavorites(String),

    /// The upstream API did not answer in time.
    #[error("Timeout connecting to Dog CEO API")]
    UpstreamTimeout,

    /// The upstream API answered but reported a non-success status.
    #[error("Dog CEO API returned an unsuccessful response: {0}")]
    UpstreamBadResponse(String),

    /// Any other upstream failure.
    #[error("Error fetching data from Dog CEO API: {0}")]
    UpstreamUnavailable(String),

    /// The favorites record could not be written.
    #[error("Failed to save favorites: {0}")]
    Persistence(String),
}

/// Stable identifier for each [`ServiceError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    ValidationError,
    BreedNotFound,
    NotInFavorites,
    UpstreamTimeout,
    UpstreamBadResponse,
    UpstreamUnavailable,
    PersistenceError,
}

impl ErrorKind {
    /// The identifier as it appears in API error bodies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "ValidationError",
            Self::BreedNotFound => "BreedNotFound",
            Self::NotInFavorites => "NotInFavorites",
            Self::UpstreamTimeout => "UpstreamTimeout",
            Self::UpstreamBadResponse => "UpstreamBadResponse",
            Self::UpstreamUnavailable => "UpstreamUnavailable",
            Self::PersistenceError => "PersistenceError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ServiceError {
    /// The stable kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::BreedNotFound(_) => ErrorKind::BreedNotFound,
            Self::NotInFavorites(_) => ErrorKind::NotInFavorites,
            Self::UpstreamTimeout => ErrorKind::UpstreamTimeout,
            Self::UpstreamBadResponse(_) => ErrorKind::UpstreamBadResponse,
            Self::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            Self::Persistence(_) => ErrorKind::PersistenceError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = ServiceError::from(BreedNameError::Empty);
        assert_eq!(err.to_string(), "Breed name is required");
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn test_kinds_are_stable() {
        assert_eq!(
            ServiceError::BreedNotFound("unicorn".to_string()).kind(),
            ErrorKind::BreedNotFound
        );
        assert_eq!(
            ServiceError::NotInFavorites("pug".to_string()).kind(),
            ErrorKind::NotInFavorites
        );
        assert_eq!(ServiceError::UpstreamTimeout.kind(), ErrorKind::UpstreamTimeout);
        assert_eq!(
            ServiceError::Persistence("disk full".to_string()).kind(),
            ErrorKind::PersistenceError
        );
    }

    #[test]
    fn test_kind_display_matches_serialization() {
        for kind in [
            ErrorKind::ValidationError,
            ErrorKind::UpstreamBadResponse,
            ErrorKind::UpstreamUnavailable,
        ] {
            let json = serde_json::to_string(&kind).unwrap_or_default();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn test_messages_name_the_breed() {
        assert_eq!(
            ServiceError::BreedNotFound("unicorn".to_string()).to_string(),
            "Breed 'unicorn' not found"
        );
        assert_eq!(
            ServiceError::NotInFavorites("pug".to_string()).to_string(),
            "Breed 'pug' is not in favorites"
        );
    }
}
