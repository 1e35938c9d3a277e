//! dog.ceo REST API client.
//!
//! # Architecture
//!
//! - Plain `reqwest` client with a fixed per-request timeout
//! - No caching and no retries here; callers decide what to cache
//! - Every response is wrapped in a `{ status, message }` envelope, and a
//!   non-"success" status is reported separately from transport failures
//!
//! # Endpoints
//!
//! - `GET /breeds/list/all` - every breed, keyed by name
//! - `GET /breed/{name}/images/random/{n}` - sample image URLs for one breed

mod client;
pub mod types;

pub use client::DogCeoClient;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the dog.ceo API.
///
/// Cloneable so one failed fetch can be handed to every caller waiting on it.
#[derive(Debug, Clone, Error)]
pub enum DogCeoError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx HTTP status.
    #[error("HTTP {0}")]
    Status(StatusCode),

    /// The envelope's `status` field was not "success".
    #[error("API reported status '{0}'")]
    ApiStatus(String),

    /// Connection, TLS, or other transport failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not the expected JSON shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl DogCeoError {
    /// Whether the server reported that the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status(status) if *status == StatusCode::NOT_FOUND)
    }
}

impl From<reqwest::Error> for DogCeoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DogCeoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
