//! Filter API endpoints.
//!
//! Reports which criteria the active filter observes and allows replacing it,
//! either from a request body or by re-reading the filter parameter file.
//! Replacements live in memory only.

use std::path::Path;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use raddec_filter_core::{Criterion, FilterConfig, RaddecFilter};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::state::SharedState;

/// Creates the filter router.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/filter", get(get_filter).put(replace_filter))
        .route("/filter/reload", post(reload_filter))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Active filter description.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "active_criteria": ["acceptedEvents", "minRSSI"],
    "source": "/etc/raddec-filter/filter.json"
}))]
pub struct FilterResponse {
    /// Configured criteria, in evaluation order.
    pub active_criteria: Vec<Criterion>,

    /// Filter parameter file used on startup and reload.
    #[schema(example = "/etc/raddec-filter/filter.json")]
    pub source: Option<String>,
}

impl FilterResponse {
    fn new(filter: &RaddecFilter, state: &SharedState) -> Self {
        Self {
            active_criteria: filter.active_criteria(),
            source: state.filter_path().map(|p| p.display().to_string()),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Get the active filter criteria.
#[utoipa::path(
    get,
    path = "/api/filter",
    tag = "filter",
    operation_id = "getFilter",
    summary = "Get active filter criteria",
    description = "Lists the criteria the active filter observes, in evaluation order. \
        Criteria are named by their parameter key.",
    responses(
        (status = 200, description = "Filter retrieved", body = FilterResponse)
    )
)]
pub async fn get_filter(State(state): State<SharedState>) -> Json<FilterResponse> {
    let filter = state.filter().await;
    Json(FilterResponse::new(&filter, &state))
}

/// Replace the active filter from parameters in the request body.
///
/// The body takes the same keys as a filter parameter file. Keys with the
/// wrong shape leave their criterion unconfigured rather than failing.
#[utoipa::path(
    put,
    path = "/api/filter",
    tag = "filter",
    operation_id = "replaceFilter",
    summary = "Replace the active filter",
    description = "Builds a new filter from the given parameters (acceptedTransmitterSignatures, \
        acceptedTransmitterIdTypes, acceptedReceiverSignatures, acceptedReceiverIdTypes, \
        acceptedEvents, minRSSI, maxRSSI). Malformed keys are ignored. The change is not persisted.",
    request_body(content = serde_json::Value, description = "Filter parameters"),
    responses(
        (status = 200, description = "Filter replaced", body = FilterResponse)
    )
)]
pub async fn replace_filter(
    State(state): State<SharedState>,
    Json(parameters): Json<serde_json::Value>,
) -> Json<FilterResponse> {
    let filter = state
        .replace_filter(RaddecFilter::from_parameters(&parameters))
        .await;
    info!(criteria = ?filter.active_criteria(), "Filter replaced");
    Json(FilterResponse::new(&filter, &state))
}

/// Re-read the filter parameter file.
#[utoipa::path(
    post,
    path = "/api/filter/reload",
    tag = "filter",
    operation_id = "reloadFilter",
    summary = "Reload filter from file",
    description = "Re-reads the filter parameter file the server was started with. \
        On any error the active filter is kept.",
    responses(
        (status = 200, description = "Filter reloaded", body = FilterResponse),
        (status = 404, description = "Filter parameter file not found", body = ErrorResponse),
        (status = 422, description = "File is not valid JSON or TOML", body = ErrorResponse),
        (status = 424, description = "No filter parameter file configured", body = ErrorResponse)
    )
)]
pub async fn reload_filter(State(state): State<SharedState>) -> ApiResult<Json<FilterResponse>> {
    let path = state
        .filter_path()
        .map(Path::to_path_buf)
        .ok_or_else(|| ApiError::FailedDependency {
            error_code: "no_filter_file".to_string(),
            message: "No filter parameter file is configured".to_string(),
            details: None,
        })?;

    let config = tokio::task::spawn_blocking({
        let path = path.clone();
        move || FilterConfig::load(&path)
    })
    .await
    .map_err(|err| ApiError::InternalError {
        error_code: "reload_failed".to_string(),
        message: "Filter reload task failed".to_string(),
        details: Some(err.to_string()),
    })??;

    let filter = state.replace_filter(RaddecFilter::new(config)).await;
    info!(path = %path.display(), criteria = ?filter.active_criteria(), "Filter reloaded");

    Ok(Json(FilterResponse::new(&filter, &state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use crate::api::test_support::{get_json, send_json, test_router};
    use crate::state::AppState;
    use axum::http::Method;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn test_get_filter_lists_criteria_in_order() {
        let filter = RaddecFilter::from_parameters(&json!({
            "maxRSSI": -30,
            "acceptedEvents": ["appearance"]
        }));
        let (status, body) = get_json(test_router(filter), "/api/filter").await;

        assert_eq!(status, 200);
        assert_eq!(body["active_criteria"], json!(["acceptedEvents", "maxRSSI"]));
        assert_eq!(body["source"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_replace_filter_ignores_malformed_keys() {
        let state = AppState::new(RaddecFilter::default(), None);
        let (status, body) = send_json(
            create_router(state.clone()),
            Method::PUT,
            "/api/filter",
            json!({ "minRSSI": -70, "maxRSSI": "-40", "acceptedColours": ["red"] }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["active_criteria"], json!(["minRSSI"]));
        assert!(state.filter().await.has_min_rssi());
    }

    #[tokio::test]
    async fn test_reload_without_file_fails() {
        let (status, body) = send_json(
            test_router(RaddecFilter::default()),
            Method::POST,
            "/api/filter/reload",
            json!({}),
        )
        .await;

        assert_eq!(status, 424);
        assert_eq!(body["error"], "no_filter_file");
    }

    #[tokio::test]
    async fn test_reload_reads_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "acceptedTransmitterIdTypes": [2] }}"#).unwrap();

        let state = AppState::new(RaddecFilter::default(), Some(file.path().to_path_buf()));
        let (status, body) = send_json(
            create_router(state.clone()),
            Method::POST,
            "/api/filter/reload",
            json!({}),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["active_criteria"], json!(["acceptedTransmitterIdTypes"]));
        assert!(state.filter().await.has_accepted_transmitter_id_types());
    }

    #[tokio::test]
    async fn test_reload_invalid_file_keeps_filter() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "minRSSI = = -70").unwrap();

        let initial = RaddecFilter::from_parameters(&json!({ "acceptedEvents": [] }));
        let state = AppState::new(initial, Some(file.path().to_path_buf()));
        let (status, body) = send_json(
            create_router(state.clone()),
            Method::POST,
            "/api/filter/reload",
            json!({}),
        )
        .await;

        assert_eq!(status, 422);
        assert_eq!(body["error"], "filter_file_invalid_toml");
        assert!(state.filter().await.has_accepted_events());
    }

    #[tokio::test]
    async fn test_reload_missing_file_keeps_filter() {
        let dir = tempfile::tempdir().unwrap();
        let initial = RaddecFilter::from_parameters(&json!({ "minRSSI": -80 }));
        let state = AppState::new(initial, Some(dir.path().join("gone.json")));
        let (status, body) = send_json(
            create_router(state.clone()),
            Method::POST,
            "/api/filter/reload",
            json!({}),
        )
        .await;

        assert_eq!(status, 404);
        assert_eq!(body["error"], "filter_file_not_found");
        assert!(state.filter().await.has_min_rssi());
    }
}
