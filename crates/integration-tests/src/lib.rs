//! Integration tests for Breedbook.
//!
//! Each test boots the full router on an ephemeral localhost port, pointed
//! at an in-process dog.ceo stub and a throwaway favorites file, and drives
//! it over HTTP with `reqwest`. No network access or external services are
//! needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p breedbook-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use breedbook_api::config::ApiConfig;
use breedbook_api::routes;
use breedbook_api::state::AppState;
use breedbook_api::testing::{StubDogApi, test_config};
use reqwest::{Client, Response};
use tempfile::TempDir;
use tokio::task::JoinHandle;

pub use breedbook_api::testing::StubMode;

/// Breeds the stub lists unless a test asks for others.
pub const DEFAULT_BREEDS: &[&str] = &["bulldog", "husky", "retriever"];

/// A running service plus the stub and temp directory backing it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub stub: StubDogApi,
    pub favorites_path: PathBuf,
    _dir: TempDir,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a service over [`DEFAULT_BREEDS`] with default test settings.
    pub async fn new() -> Self {
        Self::builder().start().await
    }

    /// Start customising a context.
    #[must_use]
    pub fn builder() -> TestContextBuilder {
        TestContextBuilder::default()
    }

    /// Absolute URL for a service path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a service path.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// POST a JSON body to a service path.
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    /// DELETE a service path.
    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    /// Contents of the favorites file, or `None` if it does not exist.
    #[must_use]
    pub fn persisted_favorites(&self) -> Option<Vec<String>> {
        let bytes = std::fs::read(&self.favorites_path).ok()?;
        Some(serde_json::from_slice(&bytes).expect("favorites file is a JSON array of strings"))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Builder for [`TestContext`].
pub struct TestContextBuilder {
    breeds: Vec<String>,
    initial_favorites: Option<String>,
    load_favorites: bool,
    configure: Option<Box<dyn FnOnce(&mut ApiConfig) + Send>>,
}

impl Default for TestContextBuilder {
    fn default() -> Self {
        Self {
            breeds: DEFAULT_BREEDS.iter().map(ToString::to_string).collect(),
            initial_favorites: None,
            load_favorites: true,
            configure: None,
        }
    }
}

impl TestContextBuilder {
    /// Breeds the stub lists.
    #[must_use]
    pub fn breeds(mut self, breeds: &[&str]) -> Self {
        self.breeds = breeds.iter().map(ToString::to_string).collect();
        self
    }

    /// Raw contents written to the favorites file before startup.
    #[must_use]
    pub fn favorites_file(mut self, contents: impl Into<String>) -> Self {
        self.initial_favorites = Some(contents.into());
        self
    }

    /// Skip the startup favorites load, leaving it to the first request.
    #[must_use]
    pub fn without_startup_load(mut self) -> Self {
        self.load_favorites = false;
        self
    }

    /// Adjust the service configuration before startup.
    #[must_use]
    pub fn configure(mut self, f: impl FnOnce(&mut ApiConfig) + Send + 'static) -> Self {
        self.configure = Some(Box::new(f));
        self
    }

    /// Start the stub and the service.
    pub async fn start(self) -> TestContext {
        let breeds: Vec<&str> = self.breeds.iter().map(String::as_str).collect();
        let stub = StubDogApi::start(&breeds).await;

        let dir = TempDir::new().expect("create temp dir");
        let favorites_path = dir.path().join("favorites.json");
        if let Some(contents) = &self.initial_favorites {
            std::fs::write(&favorites_path, contents).expect("write favorites file");
        }

        let mut config = test_config(stub.base_url(), favorites_path.clone());
        if let Some(configure) = self.configure {
            configure(&mut config);
        }

        let state = AppState::new(config).expect("build app state");
        if self.load_favorites {
            state
                .start_favorites_loading()
                .await
                .expect("favorites load task");
        }

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind service listener");
        let addr = listener.local_addr().expect("service listener address");
        let app = routes::router(state);
        let server = tokio::spawn(async move {
            let _ = axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await;
        });

        TestContext {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            stub,
            favorites_path,
            _dir: dir,
            server,
        }
    }
}
