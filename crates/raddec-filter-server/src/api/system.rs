//! System API endpoints.
//!
//! Provides the system status endpoint with uptime and evaluation counters.

use std::sync::OnceLock;
use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::SharedState;

/// Creates the system router.
pub fn router() -> Router<SharedState> {
    Router::new().route("/system/status", get(get_status))
}

/// System status response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "version": "0.1.0",
    "uptime_secs": 3600,
    "criteria": 2,
    "raddecs_evaluated": 120_000,
    "raddecs_passed": 8_400
}))]
pub struct SystemStatusResponse {
    /// Server version.
    #[schema(example = "0.1.0")]
    pub version: String,

    /// Server uptime in seconds.
    #[schema(example = 3600)]
    pub uptime_secs: u64,

    /// Number of configured filter criteria.
    #[schema(example = 2)]
    pub criteria: usize,

    /// Raddecs evaluated since startup.
    #[schema(example = 120_000)]
    pub raddecs_evaluated: u64,

    /// Raddecs that passed since startup.
    #[schema(example = 8_400)]
    pub raddecs_passed: u64,
}

// ============================================================================
// Static state for uptime tracking
// ============================================================================

static SERVER_START_TIME: OnceLock<Instant> = OnceLock::new();

/// Initialize the server start time. Call this once at startup.
pub fn init_start_time() {
    SERVER_START_TIME.get_or_init(Instant::now);
}

/// Get server uptime in seconds.
fn get_uptime_secs() -> u64 {
    SERVER_START_TIME
        .get()
        .map_or(0, |start| start.elapsed().as_secs())
}

// ============================================================================
// Handlers
// ============================================================================

/// Get system status.
#[utoipa::path(
    get,
    path = "/api/system/status",
    tag = "system",
    operation_id = "getSystemStatus",
    summary = "Get system status",
    description = "Returns the server version, uptime, number of configured criteria, \
        and how many raddecs have been evaluated and passed since startup.",
    responses(
        (status = 200, description = "System status retrieved", body = SystemStatusResponse)
    )
)]
pub async fn get_status(State(state): State<SharedState>) -> Json<SystemStatusResponse> {
    let filter = state.filter().await;

    Json(SystemStatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: get_uptime_secs(),
        criteria: filter.config().criterion_count(),
        raddecs_evaluated: state.stats().evaluated(),
        raddecs_passed: state.stats().passed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::get_json;
    use crate::api::create_router;
    use crate::state::AppState;
    use raddec_filter_core::RaddecFilter;

    #[tokio::test]
    async fn test_status_reports_counters() {
        let state = AppState::new(RaddecFilter::default(), None);
        state.stats().record(true);
        state.stats().record(false);

        let (status, body) = get_json(create_router(state), "/api/system/status").await;

        assert_eq!(status, 200);
        assert_eq!(body["raddecs_evaluated"], 2);
        assert_eq!(body["raddecs_passed"], 1);
        assert_eq!(body["criteria"], 0);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_uptime_after_init() {
        init_start_time();
        assert!(SERVER_START_TIME.get().is_some());
        assert!(get_uptime_secs() < 60);
    }
}
