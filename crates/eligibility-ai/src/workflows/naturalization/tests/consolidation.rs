use super::common::*;
use crate::workflows::naturalization::domain::{CaseId, CaseStatus, EligibilityCategory};
use crate::workflows::naturalization::repository::{CaseRepository, RepositoryError};
use crate::workflows::naturalization::service::CaseServiceError;

#[test]
fn consolidation_requires_a_decision() {
    let (service, _repository, _audit) = build_service();
    let record = service
        .submit(definitiva_submission())
        .expect("submission succeeds");

    match service.consolidate(&record.case.case_id, &complete_checklist()) {
        Err(CaseServiceError::NotDecided(id)) => assert_eq!(id, record.case.case_id),
        other => panic!("expected undecided rejection, got {other:?}"),
    }
}

#[test]
fn unknown_cases_cannot_be_consolidated() {
    let (service, _repository, _audit) = build_service();

    match service.consolidate(&CaseId("missing".to_string()), &complete_checklist()) {
        Err(CaseServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn clean_checklists_keep_the_primary_category() {
    let (service, repository, _audit) = build_service();
    let record = service
        .submit(definitiva_submission())
        .expect("submission succeeds");
    let decision = service.decide(&record.case.case_id).expect("decision succeeds");

    let consolidated = service
        .consolidate(&record.case.case_id, &complete_checklist())
        .expect("consolidation succeeds");

    assert_eq!(consolidated.category, decision.category);
    assert!(consolidated.problems.is_empty());
    assert_eq!(consolidated.review_score, 100);
    assert!(consolidated.confidence <= decision.confidence);
    assert_eq!(
        consolidated.recommendation,
        "Documentação em ordem - decisão primária mantida"
    );

    let stored = repository
        .fetch(&record.case.case_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, CaseStatus::Consolidated);
    assert_eq!(stored.consolidation, Some(consolidated));
}

#[test]
fn checklist_problems_relabel_eligible_outcomes() {
    let (service, _repository, _audit) = build_service();
    let record = service
        .submit(definitiva_submission())
        .expect("submission succeeds");
    service.decide(&record.case.case_id).expect("decision succeeds");

    let consolidated = service
        .consolidate(&record.case.case_id, &incomplete_checklist())
        .expect("consolidation succeeds");

    // Missing document, failed download, 60% completeness, incomplete status.
    assert_eq!(consolidated.problems.len(), 4);
    assert_eq!(
        consolidated.category,
        EligibilityCategory::DeferredWithCaveats
    );
    assert!((consolidated.confidence - 0.6).abs() < 1e-6);
    assert_eq!(consolidated.review_score, 60);
    assert!(consolidated.recommendation.contains("4 problema(s)"));
}

#[test]
fn deciding_again_resets_the_consolidation() {
    let (service, repository, _audit) = build_service();
    let record = service
        .submit(ordinaria_submission())
        .expect("submission succeeds");
    service.decide(&record.case.case_id).expect("decision succeeds");
    service
        .consolidate(&record.case.case_id, &incomplete_checklist())
        .expect("consolidation succeeds");

    service
        .decide(&record.case.case_id)
        .expect("second decision succeeds");

    let stored = repository
        .fetch(&record.case.case_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, CaseStatus::Decided);
    assert!(stored.consolidation.is_none());
}
