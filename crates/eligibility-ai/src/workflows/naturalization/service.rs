use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::catalog::{CatalogError, RulesetCatalog};
use super::domain::{CaseId, CaseStatus, CaseSubmission, ProcessKind};
use super::evaluation::consolidate::{consolidate, ConsolidatedDecision, DocumentChecklist};
use super::evaluation::{DecisionRecord, EligibilityEngine};
use super::intake::{IntakeGuard, IntakePolicy, IntakeViolation};
use super::repository::{
    AuditError, AuditSink, CaseAuditEntry, CaseRecord, CaseRepository, RepositoryError,
};

/// Service composing the intake guard, repository, audit sink, and one
/// eligibility engine per process kind.
pub struct CaseService<R, A> {
    guard: Arc<IntakeGuard>,
    repository: Arc<R>,
    audit: Arc<A>,
    engines: Arc<Vec<EligibilityEngine>>,
}

static CASE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_case_id() -> CaseId {
    let id = CASE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CaseId(format!("NAT-{id:06}"))
}

impl<R, A> CaseService<R, A>
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    pub fn new(repository: Arc<R>, audit: Arc<A>) -> Result<Self, CatalogError> {
        Self::with_catalog(
            repository,
            audit,
            &RulesetCatalog::standard(),
            IntakePolicy::default(),
        )
    }

    pub fn with_catalog(
        repository: Arc<R>,
        audit: Arc<A>,
        catalog: &RulesetCatalog,
        policy: IntakePolicy,
    ) -> Result<Self, CatalogError> {
        let ordered = ProcessKind::ordered();
        let mut engines = Vec::with_capacity(ordered.len());
        for kind in ordered {
            engines.push(EligibilityEngine::new(catalog.ruleset(kind))?);
        }

        Ok(Self {
            guard: Arc::new(IntakeGuard::with_policy(policy)),
            repository,
            audit,
            engines: Arc::new(engines),
        })
    }

    fn engine(&self, kind: ProcessKind) -> &EligibilityEngine {
        self.engines
            .iter()
            .find(|engine| engine.ruleset().process_kind == kind)
            .unwrap_or(&self.engines[0])
    }

    /// Submit a new case, returning the repository-backed record. Ids are
    /// assigned here when the submission carries none.
    pub fn submit(&self, submission: CaseSubmission) -> Result<CaseRecord, CaseServiceError> {
        let mut case = self.guard.case_from_submission(submission)?;
        if case.case_id.0.is_empty() {
            case.case_id = next_case_id();
        }

        let record = CaseRecord {
            case,
            status: CaseStatus::Received,
            decision: None,
            consolidation: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Run the engine for a stored case, persist the decision, and report
    /// the audit trail to the sink.
    pub fn decide(&self, case_id: &CaseId) -> Result<DecisionRecord, CaseServiceError> {
        let mut record = self
            .repository
            .fetch(case_id)?
            .ok_or(RepositoryError::NotFound)?;

        let corpus = record.case.corpus();
        let decision = self
            .engine(record.case.process_kind)
            .evaluate(&corpus, &record.case.facts);

        record.status = CaseStatus::Decided;
        record.decision = Some(decision.clone());
        // A fresh decision invalidates any earlier consolidation.
        record.consolidation = None;

        let entry = CaseAuditEntry {
            case_id: record.case.case_id.clone(),
            process_kind: record.case.process_kind,
            category: decision.category.label().to_owned(),
            confidence: decision.confidence,
            score: decision.score,
            diagnostics: decision.diagnostics.clone(),
        };

        self.repository.update(record)?;
        self.audit.record(entry)?;

        Ok(decision)
    }

    /// Re-grade a decided case against the document checklist.
    pub fn consolidate(
        &self,
        case_id: &CaseId,
        checklist: &DocumentChecklist,
    ) -> Result<ConsolidatedDecision, CaseServiceError> {
        let mut record = self
            .repository
            .fetch(case_id)?
            .ok_or(RepositoryError::NotFound)?;

        let Some(decision) = record.decision.as_ref() else {
            return Err(CaseServiceError::NotDecided(case_id.clone()));
        };

        let consolidated = consolidate(decision, checklist);
        record.status = CaseStatus::Consolidated;
        record.consolidation = Some(consolidated.clone());
        self.repository.update(record)?;

        Ok(consolidated)
    }

    /// Fetch a case record for API responses.
    pub fn get(&self, case_id: &CaseId) -> Result<CaseRecord, CaseServiceError> {
        let record = self
            .repository
            .fetch(case_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Undecided cases for the worker feeding the engine.
    pub fn pending(&self, limit: usize) -> Result<Vec<CaseRecord>, CaseServiceError> {
        Ok(self.repository.pending(limit)?)
    }
}

/// Error raised by the case service.
#[derive(Debug, thiserror::Error)]
pub enum CaseServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
    #[error("case {0} has no decision to consolidate")]
    NotDecided(CaseId),
}
