//! Favorites route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use breedbook_core::BreedName;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Body of `POST /favorites`.
///
/// A missing `breed` is reported as a validation error by the store rather
/// than as a decode failure.
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub breed: Option<String>,
}

/// Confirmation returned by add and remove.
#[derive(Debug, Serialize)]
pub struct FavoriteChanged {
    pub message: &'static str,
    pub breed: String,
}

/// Membership answer for one breed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub breed: String,
    pub is_favorite: bool,
}

/// All favorites.
pub async fn index(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.favorites().get_favorites().await)
}

/// Add a favorite.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> Result<Json<FavoriteChanged>> {
    let Json(request) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let breed = state
        .favorites()
        .add_favorite(request.breed.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(FavoriteChanged {
        message: "Favorite added",
        breed: breed.into_inner(),
    }))
}

/// Whether one breed is a favorite.
pub async fn show(State(state): State<AppState>, Path(breed): Path<String>) -> Json<FavoriteStatus> {
    let is_favorite = state.favorites().is_favorite(&breed).await;

    Json(FavoriteStatus {
        breed: BreedName::parse(&breed)
            .map(BreedName::into_inner)
            .unwrap_or_default(),
        is_favorite,
    })
}

/// Remove a favorite.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(breed): Path<String>,
) -> Result<Json<FavoriteChanged>> {
    let breed = state.favorites().remove_favorite(&breed).await?;

    Ok(Json(FavoriteChanged {
        message: "Favorite removed",
        breed: breed.into_inner(),
    }))
}
