use serde::{Deserialize, Serialize};

use super::domain::{CaseFile, CaseId, CaseStatus, ProcessKind};
use super::evaluation::consolidate::ConsolidatedDecision;
use super::evaluation::DecisionRecord;

/// Repository record holding the case file plus its decision lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case: CaseFile,
    pub status: CaseStatus,
    pub decision: Option<DecisionRecord>,
    pub consolidation: Option<ConsolidatedDecision>,
}

impl CaseRecord {
    pub fn category_label(&self) -> String {
        match &self.decision {
            Some(decision) => decision.category.label().to_owned(),
            None => "pending decision".to_owned(),
        }
    }

    pub fn status_view(&self) -> CaseStatusView {
        CaseStatusView {
            case_id: self.case.case_id.clone(),
            process_kind: self.case.process_kind,
            status: self.status.label(),
            category: self.category_label(),
            confidence: self.decision.as_ref().map(|decision| decision.confidence),
            score: self.decision.as_ref().map(|decision| decision.score),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait CaseRepository: Send + Sync {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError>;
    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<CaseRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing the audit drop each decision is reported to.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: CaseAuditEntry) -> Result<(), AuditError>;
}

/// One decided case as reported to the audit spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseAuditEntry {
    pub case_id: CaseId,
    pub process_kind: ProcessKind,
    pub category: String,
    pub confidence: f32,
    pub score: f32,
    pub diagnostics: Vec<String>,
}

/// Audit dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a case's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct CaseStatusView {
    pub case_id: CaseId,
    pub process_kind: ProcessKind,
    pub status: &'static str,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}
