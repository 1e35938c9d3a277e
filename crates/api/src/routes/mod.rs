//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Liveness check
//! GET    /health/ready          - Readiness check (favorites loaded)
//!
//! # Breeds
//! GET    /breeds                - Paged, filtered catalog (?page&limit&search)
//! GET    /breeds/{breed}/images - Random sample images
//!
//! # Favorites
//! GET    /favorites             - All favorites
//! POST   /favorites             - Add a favorite ({"breed": ...})
//! GET    /favorites/{breed}     - Membership check
//! DELETE /favorites/{breed}     - Remove a favorite
//! ```

pub mod breeds;
pub mod favorites;
pub mod health;

use axum::{
    Router,
    http::{HeaderValue, Method, Uri, header},
    middleware::from_fn,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::{
    api_rate_limiter, make_request_span, record_response, request_id_middleware,
};
use crate::state::AppState;

/// Create the breed routes router.
pub fn breed_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(breeds::index))
        .route("/{breed}/images", get(breeds::images))
}

/// Create the favorites routes router.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::index).post(favorites::create))
        .route("/{breed}", get(favorites::show).delete(favorites::destroy))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/breeds", breed_routes())
        .nest("/favorites", favorite_routes())
}

/// Build the complete application: routes, health checks, and middleware.
///
/// Sentry layers are added by the binary. Rate limiting keys on the socket
/// peer address as a last resort, so serve with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn router(state: AppState) -> Router {
    let config = state.config();
    let limited = routes().layer(api_rate_limiter(config.rate_limit_per_minute));

    let mut app = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(limited)
        .fallback(not_found);

    if let Some(cors) = config.cors_allowed_origin.as_deref().and_then(cors_layer) {
        app = app.layer(cors);
    }

    app.layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(record_response),
        )
        .with_state(state)
}

/// CORS for a single browser origin.
fn cors_layer(origin: &str) -> Option<CorsLayer> {
    match HeaderValue::from_str(origin) {
        Ok(origin) => Some(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        ),
        Err(e) => {
            tracing::warn!(origin, error = %e, "Ignoring invalid CORS origin");
            None
        }
    }
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
