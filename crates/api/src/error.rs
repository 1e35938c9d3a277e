//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`, and every error body has the shape
//! `{ "error": <kind>, "message": <text> }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{ErrorKind, ServiceError};

/// Application-level error type for the HTTP surface.
#[derive(Debug, Error)]
pub enum AppError {
    /// A service operation failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Request body could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err.kind() {
                ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
                ErrorKind::BreedNotFound | ErrorKind::NotInFavorites => StatusCode::NOT_FOUND,
                ErrorKind::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
                ErrorKind::UpstreamBadResponse | ErrorKind::UpstreamUnavailable => {
                    StatusCode::BAD_GATEWAY
                }
                ErrorKind::PersistenceError => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Stable identifier placed in the `error` field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Service(err) => err.kind().as_str(),
            Self::BadRequest(_) => ErrorKind::ValidationError.as_str(),
            Self::NotFound(_) => "NotFound",
        }
    }

    fn client_message(&self) -> String {
        match self {
            // Don't expose filesystem details to clients
            Self::Service(ServiceError::Persistence(_)) => "Failed to save favorites".to_string(),
            Self::Service(err) => err.to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::NotFound(path) => format!("No route for {path}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                kind = self.kind(),
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            error: self.kind(),
            message: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
