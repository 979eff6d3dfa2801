use super::common::*;
use std::sync::Arc;

use crate::workflows::naturalization::domain::{CaseId, CaseStatus, ProcessKind};
use crate::workflows::naturalization::intake::IntakeViolation;
use crate::workflows::naturalization::repository::{AuditError, CaseRepository, RepositoryError};
use crate::workflows::naturalization::{CaseService, CaseServiceError};

#[test]
fn submit_assigns_ids_when_the_submission_carries_none() {
    let (service, _repository, _audit) = build_service();

    let first = service
        .submit(definitiva_submission())
        .expect("submission succeeds");
    let second = service
        .submit(ordinaria_submission())
        .expect("submission succeeds");

    assert!(
        first.case.case_id.0.starts_with("NAT-"),
        "generated id was {}",
        first.case.case_id.0
    );
    assert_eq!(first.case.case_id.0.len(), 10);
    assert_ne!(first.case.case_id, second.case.case_id);
    assert_eq!(first.status, CaseStatus::Received);
    assert!(first.decision.is_none());
    assert!(first.consolidation.is_none());
}

#[test]
fn submit_preserves_client_supplied_ids() {
    let (service, _repository, _audit) = build_service();

    let mut submission = provisoria_submission();
    submission.case_id = Some("MJ-2025-000321".to_string());
    let record = service.submit(submission).expect("submission succeeds");

    assert_eq!(record.case.case_id.0, "MJ-2025-000321");
}

#[test]
fn submit_rejects_intake_violations_before_touching_storage() {
    let (service, repository, _audit) = build_service();

    let mut submission = definitiva_submission();
    submission.documents[0].name = "   ".to_string();

    let error = service
        .submit(submission)
        .expect_err("blank names are rejected");
    assert!(matches!(
        error,
        CaseServiceError::Intake(IntakeViolation::BlankDocumentName)
    ));
    assert!(repository
        .pending(10)
        .expect("repository reachable")
        .is_empty());
}

#[test]
fn decide_persists_the_decision_and_reports_it_to_the_audit_sink() {
    let (service, repository, audit) = build_service();
    let record = service
        .submit(definitiva_submission())
        .expect("submission succeeds");

    let decision = service
        .decide(&record.case.case_id)
        .expect("decision succeeds");

    let stored = repository
        .fetch(&record.case.case_id)
        .expect("repository reachable")
        .expect("record stored");
    assert_eq!(stored.status, CaseStatus::Decided);
    assert_eq!(
        stored.decision.as_ref().map(|decision| decision.category),
        Some(decision.category)
    );

    let entries = audit.entries();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.case_id, record.case.case_id);
    assert_eq!(entry.process_kind, ProcessKind::Definitiva);
    assert_eq!(entry.category, "elegivel_alta_probabilidade");
    assert!(entry.diagnostics.is_empty());
}

#[test]
fn decide_rejects_unknown_case_ids() {
    let (service, _repository, audit) = build_service();

    let error = service
        .decide(&CaseId("NAT-999999".to_string()))
        .expect_err("unknown ids are rejected");
    assert!(matches!(
        error,
        CaseServiceError::Repository(RepositoryError::NotFound)
    ));
    assert!(audit.entries().is_empty());
}

#[test]
fn audit_failures_surface_after_the_decision_is_persisted() {
    let repository = Arc::new(MemoryRepository::default());
    let service = CaseService::new(repository.clone(), Arc::new(FailingAudit))
        .expect("standard catalog compiles");
    let record = service
        .submit(ordinaria_submission())
        .expect("submission succeeds");

    let error = service
        .decide(&record.case.case_id)
        .expect_err("audit outage surfaces");
    assert!(matches!(
        error,
        CaseServiceError::Audit(AuditError::Transport(_))
    ));

    let stored = repository
        .fetch(&record.case.case_id)
        .expect("repository reachable")
        .expect("record stored");
    assert_eq!(stored.status, CaseStatus::Decided);
    assert!(stored.decision.is_some());
}

#[test]
fn pending_lists_received_cases_in_id_order() {
    let (service, _repository, _audit) = build_service();

    for (id, submission) in [
        ("PEND-002", definitiva_submission()),
        ("PEND-001", ordinaria_submission()),
        ("PEND-003", provisoria_submission()),
    ] {
        let mut submission = submission;
        submission.case_id = Some(id.to_string());
        service.submit(submission).expect("submission succeeds");
    }
    service
        .decide(&CaseId("PEND-002".to_string()))
        .expect("decision succeeds");

    let pending = service.pending(10).expect("pending query succeeds");
    let ids: Vec<&str> = pending
        .iter()
        .map(|record| record.case.case_id.0.as_str())
        .collect();
    assert_eq!(ids, ["PEND-001", "PEND-003"]);

    let limited = service.pending(1).expect("pending query succeeds");
    assert_eq!(limited.len(), 1);
}

#[test]
fn status_views_carry_decision_metrics_once_decided() {
    let (service, _repository, _audit) = build_service();
    let record = service
        .submit(definitiva_submission())
        .expect("submission succeeds");

    let before = service
        .get(&record.case.case_id)
        .expect("record stored")
        .status_view();
    assert_eq!(before.status, "received");
    assert_eq!(before.category, "pending decision");
    assert!(before.confidence.is_none());
    assert!(before.score.is_none());

    service
        .decide(&record.case.case_id)
        .expect("decision succeeds");

    let after = service
        .get(&record.case.case_id)
        .expect("record stored")
        .status_view();
    assert_eq!(after.status, "decided");
    assert_eq!(after.category, "elegivel_alta_probabilidade");
    assert_eq!(after.confidence, Some(1.0));
    assert_eq!(after.score, Some(28.0));
}
