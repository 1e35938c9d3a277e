//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span, status and latency)
//! 3. Request ID (record on span, tag Sentry scope, echo header)
//! 4. CORS (only when an allowed origin is configured)
//! 5. Rate limiting (governor, per client IP; health checks exempt)

pub mod rate_limit;
pub mod request_id;
pub mod trace;

pub use rate_limit::{ClientIpKeyExtractor, RateLimiterLayer, api_rate_limiter};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use trace::{make_request_span, record_response};
