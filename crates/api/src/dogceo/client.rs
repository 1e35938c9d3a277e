//! dog.ceo API client implementation.

use std::sync::Arc;

use breedbook_core::BreedName;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::DogApiConfig;

use super::DogCeoError;
use super::types::{ApiEnvelope, BreedListing, ImageUrls};

// =============================================================================
// DogCeoClient
// =============================================================================

/// Client for the dog.ceo REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct DogCeoClient {
    inner: Arc<DogCeoClientInner>,
}

struct DogCeoClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl DogCeoClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(config: &DogApiConfig) -> Result<Self, DogCeoError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(DogCeoClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Full URL for an API path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// Execute a GET and unwrap the `{ status, message }` envelope.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DogCeoError> {
        let url = self.endpoint(path);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = %status,
                url = %url,
                "dog.ceo API returned non-success HTTP status"
            );
            return Err(DogCeoError::Status(status));
        }

        let body = response.text().await?;
        let envelope: ApiEnvelope = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse dog.ceo response"
            );
            DogCeoError::from(e)
        })?;

        if !envelope.is_success() {
            tracing::warn!(
                api_status = %envelope.status,
                url = %url,
                "dog.ceo API reported unsuccessful status"
            );
            return Err(DogCeoError::ApiStatus(envelope.status));
        }

        Ok(serde_json::from_value(envelope.message)?)
    }

    // =========================================================================
    // Breed Methods
    // =========================================================================

    /// Fetch every top-level breed name, in the order the API returns them.
    ///
    /// # Errors
    ///
    /// Returns an error on timeout, transport failure, a non-2xx status,
    /// or a non-"success" envelope.
    #[instrument(skip(self))]
    pub async fn list_all_breeds(&self) -> Result<Vec<String>, DogCeoError> {
        let listing: BreedListing = self.get("breeds/list/all").await?;
        debug!(count = listing.len(), "Fetched breed listing");
        Ok(listing.into_keys().collect())
    }

    /// Fetch `count` random image URLs for one breed.
    ///
    /// # Errors
    ///
    /// Returns `DogCeoError::Status(404)` for an unknown breed, plus the same
    /// failures as [`Self::list_all_breeds`].
    #[instrument(skip(self), fields(breed = %breed))]
    pub async fn random_breed_images(
        &self,
        breed: &BreedName,
        count: u8,
    ) -> Result<Vec<String>, DogCeoError> {
        let path = format!(
            "breed/{}/images/random/{count}",
            urlencoding::encode(breed.as_str())
        );
        let urls: ImageUrls = self.get(&path).await?;
        debug!(count = urls.len(), "Fetched breed images");
        Ok(urls)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{StubDogApi, StubMode, unreachable_base_url};

    fn client_for(base_url: url::Url, timeout: Duration) -> DogCeoClient {
        DogCeoClient::new(&DogApiConfig { base_url, timeout }).unwrap()
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client = client_for(
            url::Url::parse("https://dog.ceo/api/").unwrap(),
            Duration::from_secs(1),
        );
        assert_eq!(
            client.endpoint("breeds/list/all"),
            "https://dog.ceo/api/breeds/list/all"
        );
        assert_eq!(
            client.endpoint("/breed/husky/images/random/3"),
            "https://dog.ceo/api/breed/husky/images/random/3"
        );
    }

    #[tokio::test]
    async fn test_list_all_breeds_returns_keys() {
        let stub = StubDogApi::start(&["retriever", "bulldog", "husky"]).await;
        let client = client_for(stub.base_url(), Duration::from_secs(5));

        let breeds = client.list_all_breeds().await.unwrap();
        assert_eq!(breeds, ["bulldog", "husky", "retriever"]);
        assert_eq!(stub.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_list_all_breeds_error_status() {
        let stub = StubDogApi::start(&["bulldog"]).await;
        stub.set_mode(StubMode::ErrorStatus);
        let client = client_for(stub.base_url(), Duration::from_secs(5));

        let err = client.list_all_breeds().await.unwrap_err();
        assert!(matches!(err, DogCeoError::ApiStatus(ref s) if s == "error"));
    }

    #[tokio::test]
    async fn test_list_all_breeds_timeout() {
        let stub = StubDogApi::start(&["bulldog"]).await;
        stub.set_mode(StubMode::Slow(Duration::from_millis(500)));
        let client = client_for(stub.base_url(), Duration::from_millis(50));

        let err = client.list_all_breeds().await.unwrap_err();
        assert!(matches!(err, DogCeoError::Timeout));
    }

    #[tokio::test]
    async fn test_list_all_breeds_server_error() {
        let stub = StubDogApi::start(&["bulldog"]).await;
        stub.set_mode(StubMode::ServerError);
        let client = client_for(stub.base_url(), Duration::from_secs(5));

        let err = client.list_all_breeds().await.unwrap_err();
        assert!(matches!(err, DogCeoError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = client_for(unreachable_base_url(), Duration::from_secs(5));

        let err = client.list_all_breeds().await.unwrap_err();
        assert!(matches!(err, DogCeoError::Transport(_)));
    }

    #[tokio::test]
    async fn test_random_breed_images() {
        let stub = StubDogApi::start(&["husky"]).await;
        let client = client_for(stub.base_url(), Duration::from_secs(5));

        let breed = BreedName::parse("husky").unwrap();
        let urls = client.random_breed_images(&breed, 3).await.unwrap();
        assert_eq!(urls.len(), 3);
        assert!(urls.iter().all(|u| u.contains("/husky/")));
        assert_eq!(stub.image_calls(), 1);
    }

    #[tokio::test]
    async fn test_random_breed_images_unknown_breed_is_404() {
        let stub = StubDogApi::start(&["husky"]).await;
        let client = client_for(stub.base_url(), Duration::from_secs(5));

        let breed = BreedName::parse("unicorn").unwrap();
        let err = client.random_breed_images(&breed, 3).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
