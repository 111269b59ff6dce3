//! HTTP API routes and handlers.
//!
//! This module contains all HTTP endpoint implementations organized by domain:
//! - `filter` - Inspect, replace, and reload the active filter
//! - `raddecs` - Evaluate raddecs against the active filter
//! - `health` - Service health checks
//! - `system` - Uptime and evaluation counters
//! - `error` - API error types
//! - `openapi` - OpenAPI specification generation

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub mod error;
pub mod filter;
pub mod health;
pub mod openapi;
pub mod raddecs;
pub mod system;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use openapi::get_openapi_json;

/// Creates the combined API router with all endpoints.
///
/// # Route Structure
///
/// ```text
/// /health                       - Health check
/// /api
/// ├── /filter                   - Active criteria (GET), replace (PUT)
/// ├── /filter/reload            - Re-read the filter parameter file
/// ├── /raddecs/evaluate         - Evaluate one raddec
/// ├── /raddecs/evaluate-batch   - Evaluate a batch of raddecs
/// ├── /system/status            - Uptime and counters
/// └── /openapi.json             - OpenAPI specification
/// ```
pub fn create_router(state: SharedState) -> Router {
    system::init_start_time();

    Router::new()
        .route("/health", get(health::health_check))
        .nest(
            "/api",
            Router::new()
                .route("/openapi.json", get(openapi::get_openapi_spec))
                .merge(filter::router())
                .merge(raddecs::router())
                .merge(system::router()),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::test_support::{get_json, test_router};
    use raddec_filter_core::RaddecFilter;

    #[tokio::test]
    async fn test_openapi_route() {
        let (status, body) = get_json(test_router(RaddecFilter::default()), "/api/openapi.json").await;
        assert_eq!(status, 200);
        assert_eq!(body["info"]["title"], "raddec-filter API");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) = get_json(test_router(RaddecFilter::default()), "/api/unknown").await;
        assert_eq!(status, 404);
    }
}
