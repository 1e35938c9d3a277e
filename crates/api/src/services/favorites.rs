//! Persisted set of favorite breeds.
//!
//! The set lives in memory behind one async mutex and is mirrored to a JSON
//! file holding an array of breed names. The mutex is held across the file
//! write, so writers are serialized and the in-memory set never runs ahead
//! of what has durably landed on disk.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use breedbook_core::BreedName;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::config::FavoritesConfig;

use super::{BreedCatalog, ServiceError};

/// Favorites store validated against the live breed catalog.
#[derive(Clone)]
pub struct FavoritesStore {
    inner: Arc<FavoritesInner>,
}

struct FavoritesInner {
    catalog: BreedCatalog,
    path: PathBuf,
    loaded: AtomicBool,
    state: Mutex<FavoritesState>,
}

#[derive(Default)]
struct FavoritesState {
    loaded: bool,
    breeds: BTreeSet<String>,
}

impl FavoritesStore {
    /// Create a store persisting to `config.path`.
    ///
    /// Nothing is read until [`Self::load_favorites`] runs or the first
    /// operation needs the set.
    #[must_use]
    pub fn new(catalog: BreedCatalog, config: &FavoritesConfig) -> Self {
        Self {
            inner: Arc::new(FavoritesInner {
                catalog,
                path: config.path.clone(),
                loaded: AtomicBool::new(false),
                state: Mutex::new(FavoritesState::default()),
            }),
        }
    }

    /// Load the persisted set in the background.
    pub fn spawn_load(&self) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move { store.load_favorites().await })
    }

    /// Load the persisted set if that has not happened yet.
    ///
    /// A missing or malformed record yields an empty set.
    pub async fn load_favorites(&self) {
        drop(self.lock_loaded().await);
    }

    /// Whether the persisted set has been read.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner.loaded.load(Ordering::Acquire)
    }

    /// Current favorites, sorted by name.
    pub async fn get_favorites(&self) -> Vec<String> {
        self.lock_loaded().await.breeds.iter().cloned().collect()
    }

    /// Whether `breed` is a favorite. Blank input is never a favorite.
    pub async fn is_favorite(&self, breed: &str) -> bool {
        let Ok(breed) = BreedName::parse(breed) else {
            return false;
        };
        self.lock_loaded().await.breeds.contains(breed.as_str())
    }

    /// Mark `breed` as a favorite.
    ///
    /// Adding a breed that is already a favorite succeeds without writing.
    ///
    /// # Errors
    ///
    /// - `ValidationError` for blank input
    /// - `BreedNotFound` if the live catalog does not list the breed
    /// - any catalog refresh failure
    /// - `PersistenceError` if the record cannot be written; the set is left unchanged
    #[instrument(skip(self))]
    pub async fn add_favorite(&self, breed: &str) -> Result<BreedName, ServiceError> {
        let breed = BreedName::parse(breed)?;

        if !self.inner.catalog.contains(&breed).await? {
            return Err(ServiceError::BreedNotFound(breed.into_inner()));
        }

        let mut state = self.lock_loaded().await;
        if state.breeds.contains(breed.as_str()) {
            info!(breed = %breed, "Breed is already in favorites");
            return Ok(breed);
        }

        state.breeds.insert(breed.as_str().to_owned());
        if let Err(err) = persist(&self.inner.path, &state.breeds).await {
            state.breeds.remove(breed.as_str());
            return Err(err);
        }

        info!(breed = %breed, total = state.breeds.len(), "Added breed to favorites");
        Ok(breed)
    }

    /// Unmark `breed` as a favorite.
    ///
    /// # Errors
    ///
    /// - `ValidationError` for blank input
    /// - `NotInFavorites` if the breed is not a favorite
    /// - `PersistenceError` if the record cannot be written; the set is left unchanged
    #[instrument(skip(self))]
    pub async fn remove_favorite(&self, breed: &str) -> Result<BreedName, ServiceError> {
        let breed = BreedName::parse(breed)?;

        let mut state = self.lock_loaded().await;
        if !state.breeds.remove(breed.as_str()) {
            return Err(ServiceError::NotInFavorites(breed.into_inner()));
        }

        if let Err(err) = persist(&self.inner.path, &state.breeds).await {
            state.breeds.insert(breed.as_str().to_owned());
            return Err(err);
        }

        info!(breed = %breed, total = state.breeds.len(), "Removed breed from favorites");
        Ok(breed)
    }

    /// Lock the set, reading the record first if this is the first access.
    async fn lock_loaded(&self) -> MutexGuard<'_, FavoritesState> {
        let mut state = self.inner.state.lock().await;
        if !state.loaded {
            state.breeds = read_favorites(&self.inner.path).await;
            state.loaded = true;
            self.inner.loaded.store(true, Ordering::Release);
        }
        state
    }
}

/// Read the record, treating anything unreadable as empty.
async fn read_favorites(path: &Path) -> BTreeSet<String> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == IoErrorKind::NotFound => {
            info!(path = %path.display(), "No favorites file found, starting with empty list");
            return BTreeSet::new();
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error loading favorites file");
            return BTreeSet::new();
        }
    };

    match serde_json::from_slice::<Vec<String>>(&bytes) {
        Ok(names) => {
            let breeds: BTreeSet<String> = names
                .iter()
                .filter_map(|name| BreedName::parse(name).ok())
                .map(BreedName::into_inner)
                .collect();
            info!(count = breeds.len(), "Loaded favorites from file");
            breeds
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Invalid favorites file format, starting with empty list"
            );
            BTreeSet::new()
        }
    }
}

/// Sibling path the record is staged at before being renamed into place.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("favorites"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomically replace the record with `breeds`.
async fn persist(path: &Path, breeds: &BTreeSet<String>) -> Result<(), ServiceError> {
    write_atomically(path, breeds).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "Error saving favorites file");
        ServiceError::Persistence(e.to_string())
    })
}

async fn write_atomically(path: &Path, breeds: &BTreeSet<String>) -> std::io::Result<()> {
    let json = serde_json::to_vec_pretty(breeds)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let staging = staging_path(path);
    let result = async {
        let mut file = tokio::fs::File::create(&staging).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&staging, path).await
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(&staging).await;
    }

    result
}
