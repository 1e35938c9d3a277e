//! Application state shared across handlers.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::ApiConfig;
use crate::dogceo::{DogCeoClient, DogCeoError};
use crate::services::{BreedCatalog, FavoritesStore, ImageLookup};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the one breed
/// catalog cache of the process; the favorites store and image lookup
/// share its upstream client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    catalog: BreedCatalog,
    images: ImageLookup,
    favorites: FavoritesStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Nothing is fetched or read here; call
    /// [`Self::start_favorites_loading`] to warm the favorites store.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, DogCeoError> {
        let client = DogCeoClient::new(&config.dog_api)?;
        let catalog = BreedCatalog::new(client.clone(), &config.catalog);
        let images = ImageLookup::new(client);
        let favorites = FavoritesStore::new(catalog.clone(), &config.favorites);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                images,
                favorites,
            }),
        })
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the breed catalog cache.
    #[must_use]
    pub fn catalog(&self) -> &BreedCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the image lookup.
    #[must_use]
    pub fn images(&self) -> &ImageLookup {
        &self.inner.images
    }

    /// Get a reference to the favorites store.
    #[must_use]
    pub fn favorites(&self) -> &FavoritesStore {
        &self.inner.favorites
    }

    /// Load the persisted favorites in the background.
    ///
    /// Requests arriving before the load finishes wait for it on first use.
    pub fn start_favorites_loading(&self) -> JoinHandle<()> {
        self.inner.favorites.spawn_load()
    }
}
