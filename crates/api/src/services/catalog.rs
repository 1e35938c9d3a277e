//! Breed catalog cache.
//!
//! Holds at most one [`CatalogSnapshot`] in a `moka` cache with a fixed TTL.
//! `moka` coalesces concurrent initialisations for the same key, so callers
//! that find the snapshot missing or expired at the same moment share a
//! single upstream fetch and all receive its result.

use std::sync::Arc;

use breedbook_core::{BreedName, CatalogSnapshot, PageRequest, Paginated, paginate};
use chrono::Utc;
use moka::future::Cache;
use tracing::{debug, instrument, warn};

use crate::config::CatalogConfig;
use crate::dogceo::{DogCeoClient, DogCeoError};

use super::ServiceError;

/// Cache key for the catalog snapshot.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CatalogKey {
    AllBreeds,
}

/// TTL-bounded cache of the upstream breed list.
///
/// The only component that fetches the breed list from upstream.
#[derive(Clone)]
pub struct BreedCatalog {
    inner: Arc<BreedCatalogInner>,
}

struct BreedCatalogInner {
    client: DogCeoClient,
    cache: Cache<CatalogKey, Arc<CatalogSnapshot>>,
}

impl BreedCatalog {
    /// Create an empty catalog cache backed by `client`.
    #[must_use]
    pub fn new(client: DogCeoClient, config: &CatalogConfig) -> Self {
        let cache = Cache::builder().time_to_live(config.ttl).build();

        Self {
            inner: Arc::new(BreedCatalogInner { client, cache }),
        }
    }

    /// Current catalog snapshot, fetching a new one if absent or expired.
    ///
    /// A failed refresh is reported to every waiting caller; an expired
    /// snapshot is never served in its place.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamTimeout`, `UpstreamBadResponse`, or
    /// `UpstreamUnavailable` when the refresh fails.
    #[instrument(skip(self))]
    pub async fn get_catalog(&self) -> Result<Arc<CatalogSnapshot>, ServiceError> {
        if let Some(snapshot) = self.inner.cache.get(&CatalogKey::AllBreeds).await {
            debug!("Cache hit for breed catalog");
            return Ok(snapshot);
        }

        let client = self.inner.client.clone();
        self.inner
            .cache
            .try_get_with(CatalogKey::AllBreeds, async move {
                let breeds = client.list_all_breeds().await?;
                let snapshot = CatalogSnapshot::new(breeds, Utc::now());
                debug!(breeds = snapshot.len(), "Refreshed breed catalog");
                Ok::<_, DogCeoError>(Arc::new(snapshot))
            })
            .await
            .map_err(|err| {
                warn!(error = %err, "Breed catalog refresh failed");
                map_fetch_error(&err)
            })
    }

    /// One filtered page of the catalog.
    ///
    /// # Errors
    ///
    /// Fails only when the catalog itself cannot be fetched.
    pub async fn list_breeds(
        &self,
        request: &PageRequest,
    ) -> Result<Paginated<String>, ServiceError> {
        let snapshot = self.get_catalog().await?;
        Ok(paginate(snapshot.breeds(), request))
    }

    /// Whether the live catalog lists `breed`.
    ///
    /// # Errors
    ///
    /// Fails only when the catalog itself cannot be fetched.
    pub async fn contains(&self, breed: &BreedName) -> Result<bool, ServiceError> {
        Ok(self.get_catalog().await?.contains(breed))
    }

    /// Drop the cached snapshot so the next read refetches.
    pub fn invalidate(&self) {
        self.inner.cache.invalidate_all();
    }
}

/// Map a catalog fetch failure into the caller-facing taxonomy.
fn map_fetch_error(err: &DogCeoError) -> ServiceError {
    match err {
        DogCeoError::Timeout => ServiceError::UpstreamTimeout,
        DogCeoError::ApiStatus(status) => ServiceError::UpstreamBadResponse(status.clone()),
        DogCeoError::Status(_) | DogCeoError::Transport(_) | DogCeoError::Decode(_) => {
            ServiceError::UpstreamUnavailable(err.to_string())
        }
    }
}
