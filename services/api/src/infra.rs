use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

use eligibility_ai::config::AuditConfig;
use eligibility_ai::error::AppError;
use eligibility_ai::workflows::naturalization::audit::CsvAuditLog;
use eligibility_ai::workflows::naturalization::{
    AuditError, AuditSink, CaseAuditEntry, CaseFile, CaseId, CaseRecord, CaseRepository,
    CaseStatus, CaseSubmission, CatalogError, DecisionRecord, EligibilityEngine, IntakeGuard,
    IntakeViolation, ProcessKind, RepositoryError, RulesetCatalog,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCaseRepository {
    records: Arc<Mutex<HashMap<CaseId, CaseRecord>>>,
}

impl CaseRepository for InMemoryCaseRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.case.case_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.case.case_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.case.case_id) {
            guard.insert(record.case.case_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut pending: Vec<CaseRecord> = guard
            .values()
            .filter(|record| record.status == CaseStatus::Received)
            .cloned()
            .collect();
        pending.sort_by(|left, right| left.case.case_id.cmp(&right.case.case_id));
        pending.truncate(limit);
        Ok(pending)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditTrail {
    entries: Arc<Mutex<Vec<CaseAuditEntry>>>,
}

impl InMemoryAuditTrail {
    pub(crate) fn entries(&self) -> Vec<CaseAuditEntry> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditSink for InMemoryAuditTrail {
    fn record(&self, entry: CaseAuditEntry) -> Result<(), AuditError> {
        let mut guard = self.entries.lock().expect("audit mutex poisoned");
        guard.push(entry);
        Ok(())
    }
}

/// Audit sink for the HTTP service: a CSV export when the operator
/// configured a directory, the structured log otherwise.
pub(crate) enum ApiAuditSink {
    Csv(CsvAuditLog<std::fs::File>),
    Log,
}

impl AuditSink for ApiAuditSink {
    fn record(&self, entry: CaseAuditEntry) -> Result<(), AuditError> {
        match self {
            Self::Csv(log) => log.record(entry),
            Self::Log => {
                info!(
                    case_id = %entry.case_id.0,
                    process_kind = entry.process_kind.label(),
                    category = %entry.category,
                    confidence = entry.confidence,
                    score = entry.score,
                    "decision recorded"
                );
                Ok(())
            }
        }
    }
}

pub(crate) fn audit_sink(config: &AuditConfig) -> Result<ApiAuditSink, AppError> {
    match &config.export_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let log = CsvAuditLog::create(dir.join("decisions.csv")).map_err(audit_io_error)?;
            Ok(ApiAuditSink::Csv(log))
        }
        None => Ok(ApiAuditSink::Log),
    }
}

pub(crate) fn audit_io_error(error: AuditError) -> AppError {
    AppError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        error.to_string(),
    ))
}

/// Why a stateless evaluation could not produce a decision.
#[derive(Debug)]
pub(crate) enum EvaluationRejection {
    Intake(IntakeViolation),
    Catalog(CatalogError),
}

impl fmt::Display for EvaluationRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intake(violation) => write!(f, "{violation}"),
            Self::Catalog(error) => write!(f, "{error}"),
        }
    }
}

impl IntoResponse for EvaluationRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Runs intake and the eligibility engine over a submission without
/// persisting anything.
pub(crate) fn evaluate_submission(
    submission: CaseSubmission,
) -> Result<(CaseFile, DecisionRecord), EvaluationRejection> {
    let case = IntakeGuard::default()
        .case_from_submission(submission)
        .map_err(EvaluationRejection::Intake)?;
    let catalog = RulesetCatalog::standard();
    let engine = EligibilityEngine::new(catalog.ruleset(case.process_kind))
        .map_err(EvaluationRejection::Catalog)?;
    let decision = engine.evaluate(&case.corpus(), &case.facts);
    Ok((case, decision))
}

pub(crate) fn parse_kind(raw: &str) -> Result<ProcessKind, String> {
    match raw.trim().to_lowercase().as_str() {
        "definitiva" => Ok(ProcessKind::Definitiva),
        "ordinaria" | "ordinária" => Ok(ProcessKind::Ordinaria),
        "provisoria" | "provisória" => Ok(ProcessKind::Provisoria),
        other => Err(format!(
            "unknown process kind '{other}' (expected definitiva, ordinaria, or provisoria)"
        )),
    }
}
