//! In-process stand-in for the dog.ceo API.
//!
//! Compiled for unit tests and behind the `test-utils` feature so the
//! integration tests can drive the full service without network access.

#![allow(clippy::missing_panics_doc)]

use std::net::{Ipv4Addr, SocketAddr, TcpListener as StdTcpListener};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::task::JoinHandle;
use url::Url;

use crate::config::{ApiConfig, CatalogConfig, DogApiConfig, FavoritesConfig};

/// How the stub answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubMode {
    /// Answer like the real API.
    Healthy,
    /// HTTP 200 with `{"status": "error"}`.
    ErrorStatus,
    /// HTTP 500.
    ServerError,
    /// Answer like the real API after sleeping.
    Slow(Duration),
    /// Sleep, then answer with `{"status": "error"}`.
    SlowErrorStatus(Duration),
}

struct StubState {
    breeds: Mutex<Vec<String>>,
    mode: Mutex<StubMode>,
    list_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

impl StubState {
    fn mode(&self) -> StubMode {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn has_breed(&self, name: &str) -> bool {
        self.breeds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|b| b == name)
    }
}

/// A running stub server bound to an ephemeral localhost port.
///
/// The server task is aborted when the stub is dropped.
pub struct StubDogApi {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubDogApi {
    /// Start a stub that lists `breeds`.
    pub async fn start(breeds: &[&str]) -> Self {
        let state = Arc::new(StubState {
            breeds: Mutex::new(breeds.iter().map(ToString::to_string).collect()),
            mode: Mutex::new(StubMode::Healthy),
            list_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/breeds/list/all", get(list_all))
            .route("/breed/{breed}/images/random/{count}", get(random_images))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Root URL to hand to the client under test.
    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("stub URL is valid")
    }

    /// Change how subsequent requests are answered.
    pub fn set_mode(&self, mode: StubMode) {
        *self.state.mode.lock().unwrap_or_else(PoisonError::into_inner) = mode;
    }

    /// Replace the listed breeds.
    pub fn set_breeds(&self, breeds: &[&str]) {
        *self
            .state
            .breeds
            .lock()
            .unwrap_or_else(PoisonError::into_inner) =
            breeds.iter().map(ToString::to_string).collect();
    }

    /// Number of `/breeds/list/all` requests received.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.state.list_calls.load(Ordering::SeqCst)
    }

    /// Number of image requests received.
    #[must_use]
    pub fn image_calls(&self) -> usize {
        self.state.image_calls.load(Ordering::SeqCst)
    }
}

impl Drop for StubDogApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A localhost URL with nothing listening on it.
#[must_use]
pub fn unreachable_base_url() -> Url {
    let listener = StdTcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind probe listener");
    let addr = listener.local_addr().expect("probe listener address");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("probe URL is valid")
}

/// Service configuration pointed at `base_url`, persisting favorites to `favorites_path`.
#[must_use]
pub fn test_config(base_url: Url, favorites_path: PathBuf) -> ApiConfig {
    ApiConfig {
        host: Ipv4Addr::LOCALHOST.into(),
        port: 0,
        dog_api: DogApiConfig {
            base_url,
            timeout: Duration::from_secs(5),
        },
        catalog: CatalogConfig::default(),
        favorites: FavoritesConfig {
            path: favorites_path,
        },
        rate_limit_per_minute: 600,
        cors_allowed_origin: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn apply_mode(state: &StubState) -> Option<Response> {
    match state.mode() {
        StubMode::Healthy => None,
        StubMode::Slow(delay) => {
            tokio::time::sleep(delay).await;
            None
        }
        StubMode::ErrorStatus => Some(error_status()),
        StubMode::SlowErrorStatus(delay) => {
            tokio::time::sleep(delay).await;
            Some(error_status())
        }
        StubMode::ServerError => Some(StatusCode::INTERNAL_SERVER_ERROR.into_response()),
    }
}

fn error_status() -> Response {
    Json(json!({ "status": "error", "message": "Something went wrong" })).into_response()
}

async fn list_all(State(state): State<Arc<StubState>>) -> Response {
    state.list_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = apply_mode(&state).await {
        return response;
    }

    let message: serde_json::Map<String, serde_json::Value> = state
        .breeds
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .map(|b| (b.clone(), json!([])))
        .collect();

    Json(json!({ "status": "success", "message": message })).into_response()
}

async fn random_images(
    State(state): State<Arc<StubState>>,
    Path((breed, count)): Path<(String, usize)>,
) -> Response {
    state.image_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = apply_mode(&state).await {
        return response;
    }

    if !state.has_breed(&breed) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "error",
                "message": "Breed not found (main breed does not exist)",
                "code": 404
            })),
        )
            .into_response();
    }

    let urls: Vec<String> = (1..=count)
        .map(|i| format!("https://images.dog.ceo/breeds/{breed}/n{i:04}.jpg"))
        .collect();

    Json(json!({ "status": "success", "message": urls })).into_response()
}
