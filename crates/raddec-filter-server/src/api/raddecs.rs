//! Raddec evaluation API endpoints.
//!
//! Upstream pipeline stages POST raddecs here and receive accept/reject
//! verdicts from the active filter. Evaluation has no side effects beyond
//! the server's counters.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use raddec_filter_core::{Criterion, FilterDecision, Raddec};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::state::SharedState;

/// Maximum number of raddecs accepted in one batch request.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Creates the raddecs router.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/raddecs/evaluate", post(evaluate_raddec))
        .route("/raddecs/evaluate-batch", post(evaluate_batch))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Verdict for one raddec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "passing": false,
    "rejected_by": "minRSSI"
}))]
pub struct EvaluateResponse {
    /// Whether the raddec passes every configured criterion.
    #[schema(example = false)]
    pub passing: bool,

    /// First configured criterion the raddec failed.
    pub rejected_by: Option<Criterion>,
}

impl From<FilterDecision> for EvaluateResponse {
    fn from(decision: FilterDecision) -> Self {
        Self {
            passing: decision.is_pass(),
            rejected_by: decision.rejected_by(),
        }
    }
}

/// A batch of raddecs to evaluate.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EvaluateBatchRequest {
    /// Raddecs, evaluated independently.
    pub raddecs: Vec<Raddec>,
}

/// Verdicts for a batch, in request order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "results": [
        { "passing": true, "rejected_by": null },
        { "passing": false, "rejected_by": "acceptedEvents" }
    ],
    "passed": 1,
    "rejected": 1
}))]
pub struct EvaluateBatchResponse {
    /// One verdict per submitted raddec.
    pub results: Vec<EvaluateResponse>,

    /// Number of passing raddecs.
    #[schema(example = 1)]
    pub passed: usize,

    /// Number of rejected raddecs.
    #[schema(example = 1)]
    pub rejected: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Evaluate one raddec against the active filter.
#[utoipa::path(
    post,
    path = "/api/raddecs/evaluate",
    tag = "raddecs",
    operation_id = "evaluateRaddec",
    summary = "Evaluate a raddec",
    description = "Returns whether the raddec passes the active filter and, if not, \
        the first criterion it failed. Missing raddec fields fail the criteria that need them.",
    request_body = Raddec,
    responses(
        (status = 200, description = "Raddec evaluated", body = EvaluateResponse)
    )
)]
pub async fn evaluate_raddec(
    State(state): State<SharedState>,
    Json(raddec): Json<Raddec>,
) -> Json<EvaluateResponse> {
    let filter = state.filter().await;
    let decision = filter.evaluate(&raddec);
    state.stats().record(decision.is_pass());

    Json(decision.into())
}

/// Evaluate a batch of raddecs against the active filter.
#[utoipa::path(
    post,
    path = "/api/raddecs/evaluate-batch",
    tag = "raddecs",
    operation_id = "evaluateRaddecBatch",
    summary = "Evaluate a batch of raddecs",
    description = "Evaluates each raddec independently against one snapshot of the \
        active filter. Results are returned in request order.",
    request_body = EvaluateBatchRequest,
    responses(
        (status = 200, description = "Batch evaluated", body = EvaluateBatchResponse),
        (status = 400, description = "Batch exceeds the size limit", body = ErrorResponse)
    )
)]
pub async fn evaluate_batch(
    State(state): State<SharedState>,
    Json(request): Json<EvaluateBatchRequest>,
) -> ApiResult<Json<EvaluateBatchResponse>> {
    if request.raddecs.len() > MAX_BATCH_SIZE {
        return Err(ApiError::BadRequest {
            error_code: "batch_too_large".to_string(),
            message: format!(
                "Batch of {} raddecs exceeds the limit of {MAX_BATCH_SIZE}",
                request.raddecs.len()
            ),
        });
    }

    let filter = state.filter().await;
    let results: Vec<EvaluateResponse> = request
        .raddecs
        .iter()
        .map(|raddec| {
            let decision = filter.evaluate(raddec);
            state.stats().record(decision.is_pass());
            EvaluateResponse::from(decision)
        })
        .collect();

    let passed = results.iter().filter(|r| r.passing).count();
    let rejected = results.len() - passed;
    debug!(passed, rejected, "Evaluated raddec batch");

    Ok(Json(EvaluateBatchResponse {
        results,
        passed,
        rejected,
    }))
}
