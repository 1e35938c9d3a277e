//! Sample image lookup for a single breed.

use breedbook_core::BreedName;
use tracing::{instrument, warn};

use crate::dogceo::{DogCeoClient, DogCeoError};

use super::ServiceError;

/// Number of images returned per lookup.
pub const SAMPLE_SIZE: u8 = 3;

/// Fetches a fresh random sample of image URLs on every call.
#[derive(Clone)]
pub struct ImageLookup {
    client: DogCeoClient,
}

impl ImageLookup {
    #[must_use]
    pub const fn new(client: DogCeoClient) -> Self {
        Self { client }
    }

    /// Image URLs for `breed`.
    ///
    /// # Errors
    ///
    /// - `ValidationError` for blank input, before any request is made
    /// - `BreedNotFound` when upstream answers 404
    /// - `UpstreamTimeout` when upstream does not answer in time
    /// - `UpstreamUnavailable` for every other failure
    #[instrument(skip(self))]
    pub async fn get_images(&self, breed: &str) -> Result<Vec<String>, ServiceError> {
        let breed = BreedName::parse(breed)?;

        self.client
            .random_breed_images(&breed, SAMPLE_SIZE)
            .await
            .map_err(|err| {
                warn!(breed = %breed, error = %err, "Breed image lookup failed");
                map_image_error(breed, &err)
            })
    }
}

fn map_image_error(breed: BreedName, err: &DogCeoError) -> ServiceError {
    if err.is_not_found() {
        return ServiceError::BreedNotFound(breed.into_inner());
    }

    match err {
        DogCeoError::Timeout => ServiceError::UpstreamTimeout,
        _ => ServiceError::UpstreamUnavailable(err.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::DogApiConfig;
    use crate::services::ErrorKind;
    use crate::testing::{StubDogApi, StubMode, unreachable_base_url};

    fn lookup_for(base_url: url::Url, timeout: Duration) -> ImageLookup {
        ImageLookup::new(DogCeoClient::new(&DogApiConfig { base_url, timeout }).unwrap())
    }

    #[tokio::test]
    async fn test_get_images_returns_sample() {
        let stub = StubDogApi::start(&["bulldog"]).await;
        let lookup = lookup_for(stub.base_url(), Duration::from_secs(5));

        let images = lookup.get_images("bulldog").await.unwrap();
        assert_eq!(images.len(), usize::from(SAMPLE_SIZE));
    }

    #[tokio::test]
    async fn test_get_images_normalizes_name() {
        let stub = StubDogApi::start(&["bulldog"]).await;
        let lookup = lookup_for(stub.base_url(), Duration::from_secs(5));

        let images = lookup.get_images("  BULLDOG ").await.unwrap();
        assert!(images.iter().all(|u| u.contains("/bulldog/")));
    }

    #[tokio::test]
    async fn test_blank_breed_fails_before_any_request() {
        let stub = StubDogApi::start(&["bulldog"]).await;
        let lookup = lookup_for(stub.base_url(), Duration::from_secs(5));

        for input in ["", "   "] {
            let err = lookup.get_images(input).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValidationError);
        }
        assert_eq!(stub.image_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_breed_is_not_found() {
        let stub = StubDogApi::start(&["bulldog"]).await;
        let lookup = lookup_for(stub.base_url(), Duration::from_secs(5));

        let err = lookup.get_images("unicorn").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BreedNotFound);
        assert_eq!(err.to_string(), "Breed 'unicorn' not found");
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let stub = StubDogApi::start(&["bulldog"]).await;
        stub.set_mode(StubMode::ErrorStatus);
        let lookup = lookup_for(stub.base_url(), Duration::from_secs(5));

        let err = lookup.get_images("bulldog").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
    }

    #[tokio::test]
    async fn test_timeout() {
        let stub = StubDogApi::start(&["bulldog"]).await;
        stub.set_mode(StubMode::Slow(Duration::from_millis(500)));
        let lookup = lookup_for(stub.base_url(), Duration::from_millis(50));

        let err = lookup.get_images("bulldog").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamTimeout);
    }

    #[tokio::test]
    async fn test_unreachable_is_unavailable() {
        let lookup = lookup_for(unreachable_base_url(), Duration::from_secs(5));

        let err = lookup.get_images("bulldog").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
    }

    #[tokio::test]
    async fn test_images_are_not_cached() {
        let stub = StubDogApi::start(&["bulldog"]).await;
        let lookup = lookup_for(stub.base_url(), Duration::from_secs(5));

        lookup.get_images("bulldog").await.unwrap();
        lookup.get_images("bulldog").await.unwrap();
        assert_eq!(stub.image_calls(), 2);
    }
}
