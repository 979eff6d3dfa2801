use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{CaseId, CaseSubmission};
use super::evaluation::consolidate::DocumentChecklist;
use super::repository::{AuditSink, CaseRepository, RepositoryError};
use super::service::{CaseService, CaseServiceError};

/// Router builder exposing HTTP endpoints for case intake, decision, and
/// consolidation.
pub fn case_router<R, A>(service: Arc<CaseService<R, A>>) -> Router
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    Router::new()
        .route("/api/v1/cases", post(submit_handler::<R, A>))
        .route("/api/v1/cases/:case_id", get(status_handler::<R, A>))
        .route(
            "/api/v1/cases/:case_id/decision",
            post(decide_handler::<R, A>),
        )
        .route(
            "/api/v1/cases/:case_id/consolidation",
            post(consolidate_handler::<R, A>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    axum::Json(submission): axum::Json<CaseSubmission>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(CaseServiceError::Intake(violation)) => {
            let payload = json!({
                "error": violation.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(CaseServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "case already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    let id = CaseId(case_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(&id, error),
    }
}

pub(crate) async fn decide_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    let id = CaseId(case_id);
    match service.decide(&id) {
        Ok(decision) => (StatusCode::OK, axum::Json(decision)).into_response(),
        Err(error) => error_response(&id, error),
    }
}

pub(crate) async fn consolidate_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Path(case_id): Path<String>,
    axum::Json(checklist): axum::Json<DocumentChecklist>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    let id = CaseId(case_id);
    match service.consolidate(&id, &checklist) {
        Ok(consolidated) => (StatusCode::OK, axum::Json(consolidated)).into_response(),
        Err(error) => error_response(&id, error),
    }
}

fn error_response(case_id: &CaseId, error: CaseServiceError) -> Response {
    match error {
        CaseServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "case_id": case_id.0,
                "error": "case not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        CaseServiceError::NotDecided(id) => {
            let payload = json!({
                "case_id": id.0,
                "error": "case has no decision to consolidate",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
