use crate::infra::{evaluate_submission, AppState, EvaluationRejection};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use eligibility_ai::workflows::naturalization::{
    case_router, AuditSink, CaseRepository, CaseService, CaseSubmission, DecisionRecord,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_case_routes<R, A>(service: Arc<CaseService<R, A>>) -> axum::Router
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    case_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/evaluations",
            axum::routing::post(evaluation_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Dry-run endpoint: evaluates a submission without storing a case.
pub(crate) async fn evaluation_endpoint(
    Json(submission): Json<CaseSubmission>,
) -> Result<Json<DecisionRecord>, EvaluationRejection> {
    let (_case, decision) = evaluate_submission(submission)?;
    Ok(Json(decision))
}
