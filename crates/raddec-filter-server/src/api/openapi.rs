//! OpenAPI specification generation for the raddec-filter API.
//!
//! The document is served at `/api/openapi.json` and written to disk by the
//! `gen-openapi` binary for client generation.

use axum::Json;
use raddec_filter_core::{Criterion, Raddec, RssiObservation};
use utoipa::OpenApi;

use super::error::ErrorResponse;
use super::filter::FilterResponse;
use super::health::HealthResponse;
use super::raddecs::{EvaluateBatchRequest, EvaluateBatchResponse, EvaluateResponse};
use super::system::SystemStatusResponse;

/// Serve the OpenAPI specification as JSON.
pub async fn get_openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Returns the OpenAPI specification as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized.
pub fn get_openapi_json() -> serde_json::Result<String> {
    ApiDoc::openapi().to_pretty_json()
}

/// Main OpenAPI document structure for raddec-filter.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "raddec-filter API",
        version = "0.1.0",
        description = r#"
# raddec-filter API

Accepts or rejects raddecs (radio decodings) for a downstream stage of a
presence-detection pipeline.

## Filter criteria

All configured criteria must pass. Unconfigured criteria never reject.

- **acceptedTransmitterSignatures**: raddec `signature` must be listed
- **acceptedTransmitterIdTypes**: raddec `transmitterIdType` must be listed
- **acceptedReceiverSignatures**: raddec `receiverSignature` must be listed
- **acceptedReceiverIdTypes**: strongest receiver's `receiverIdType` must be listed
- **acceptedEvents**: raddec must carry at least one listed event
- **minRSSI** / **maxRSSI**: inclusive bounds on the strongest receiver's RSSI

An empty list rejects every raddec. A raddec missing the field a criterion
needs is rejected by that criterion.
"#,
        license(name = "MIT")
    ),
    paths(
        super::health::health_check,
        super::filter::get_filter,
        super::filter::replace_filter,
        super::filter::reload_filter,
        super::raddecs::evaluate_raddec,
        super::raddecs::evaluate_batch,
        super::system::get_status,
    ),
    components(
        schemas(
            Criterion,
            Raddec,
            RssiObservation,
            ErrorResponse,
            FilterResponse,
            HealthResponse,
            EvaluateResponse,
            EvaluateBatchRequest,
            EvaluateBatchResponse,
            SystemStatusResponse,
        )
    ),
    tags(
        (name = "filter", description = "Inspect and replace the active filter"),
        (name = "raddecs", description = "Evaluate raddecs against the active filter"),
        (name = "system", description = "Health and status")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{send_json, test_router};
    use axum::http::{Method, StatusCode};
    use raddec_filter_core::RaddecFilter;
    use serde_json::json;

    #[test]
    fn test_openapi_lists_all_paths() {
        let doc: serde_json::Value = serde_json::from_str(&get_openapi_json().unwrap()).unwrap();
        let paths = doc["paths"].as_object().unwrap();

        for path in [
            "/health",
            "/api/filter",
            "/api/filter/reload",
            "/api/raddecs/evaluate",
            "/api/raddecs/evaluate-batch",
            "/api/system/status",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[tokio::test]
    async fn test_documented_operations_are_routed() {
        let doc: serde_json::Value = serde_json::from_str(&get_openapi_json().unwrap()).unwrap();
        let paths = doc["paths"].as_object().unwrap();

        for (path, operations) in paths {
            for method in operations.as_object().unwrap().keys() {
                let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes()).unwrap();
                let (status, _) =
                    send_json(test_router(RaddecFilter::default()), method.clone(), path, json!({}))
                        .await;
                assert_ne!(status, StatusCode::NOT_FOUND, "{method} {path} is not routed");
                assert_ne!(
                    status,
                    StatusCode::METHOD_NOT_ALLOWED,
                    "{method} {path} is not routed"
                );
            }
        }
    }

    #[test]
    fn test_openapi_includes_raddec_schema() {
        let doc: serde_json::Value = serde_json::from_str(&get_openapi_json().unwrap()).unwrap();
        assert!(doc["components"]["schemas"]["Raddec"].is_object());
        assert!(doc["components"]["schemas"]["Criterion"].is_object());
    }
}
