//! Naturalization case intake, eligibility determination, and consolidation.
//!
//! The heart of this module is the [`EligibilityEngine`]: a pure, synchronous
//! evaluator that turns a case's evidence corpus and structured facts into an
//! auditable [`DecisionRecord`] under one of the three legal rulesets
//! (Definitiva, Ordinária, Provisória). Everything around it is plumbing:
//! intake validation, storage, audit export, and the HTTP surface.

pub mod audit;
pub mod catalog;
pub(crate) mod dates;
pub mod domain;
pub mod evaluation;
pub(crate) mod intake;
pub(crate) mod patterns;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    CatalogError, ConfidenceBonuses, CriterionGroup, CriterionKind, CriterionSpec, DateFact,
    DecisionThresholds, GateCheck, GateSpec, Ruleset, RulesetCatalog,
};
pub use domain::{
    CaseFile, CaseFormFields, CaseId, CaseStatus, CaseSubmission, EligibilityCategory,
    EvidenceCorpus, EvidenceDocument, ProcessKind, StructuredFacts,
};
pub use evaluation::consolidate::{ChecklistStatus, ConsolidatedDecision, DocumentChecklist};
pub use evaluation::{AggregateResult, CriterionResult, DecisionRecord, EligibilityEngine};
pub use intake::{IntakeGuard, IntakePolicy, IntakeViolation};
pub use patterns::PatternCompileError;
pub use repository::{
    AuditError, AuditSink, CaseAuditEntry, CaseRecord, CaseRepository, CaseStatusView,
    RepositoryError,
};
pub use router::case_router;
pub use service::{CaseService, CaseServiceError};
