//! Breed catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use breedbook_core::{DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest, Paginated};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Query parameters for the breed listing.
///
/// Values are taken as raw strings so that junk or non-positive numbers
/// fall back to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct BreedsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl BreedsQuery {
    /// Normalize into a page request.
    #[must_use]
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(
            positive_or(self.page.as_deref(), DEFAULT_PAGE),
            positive_or(self.limit.as_deref(), DEFAULT_LIMIT),
            self.search.as_deref().unwrap_or_default(),
        )
    }
}

fn positive_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(default)
}

/// One page of the breed catalog.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<BreedsQuery>,
) -> Result<Json<Paginated<String>>> {
    let page = state.catalog().list_breeds(&query.to_page_request()).await?;
    Ok(Json(page))
}

/// Random sample images for one breed.
#[instrument(skip(state))]
pub async fn images(
    State(state): State<AppState>,
    Path(breed): Path<String>,
) -> Result<Json<Vec<String>>> {
    let urls = state.images().get_images(&breed).await?;
    Ok(Json(urls))
}
