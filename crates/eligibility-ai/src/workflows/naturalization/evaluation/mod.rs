//! Eligibility decision engine.
//!
//! Pure and synchronous: gates run first in declared order and short-circuit
//! into an automatic rejection; otherwise every configured criterion is
//! evaluated, aggregated, classified, and rendered into a `DecisionRecord`.
//! Identical `(corpus, facts, ruleset)` inputs always yield an identical
//! record, and one faulty criterion never aborts the case.

mod completeness;
mod criteria;
mod gates;
mod policy;
mod recommend;
mod scoring;

pub mod consolidate;

use super::catalog::{CatalogError, CriterionGroup, Ruleset};
use super::domain::{EligibilityCategory, EvidenceCorpus, StructuredFacts};
use criteria::CompiledCriterion;
use serde::{Deserialize, Serialize};

/// Compiled, validated ruleset ready to evaluate cases.
pub struct EligibilityEngine {
    ruleset: Ruleset,
    compiled: Vec<CompiledCriterion>,
}

impl EligibilityEngine {
    /// Validate the ruleset and compile its pattern tables. The only fallible
    /// step of the engine's lifetime; a constructed engine cannot fail.
    pub fn new(ruleset: &Ruleset) -> Result<Self, CatalogError> {
        ruleset.validate()?;
        let compiled = ruleset
            .criteria
            .iter()
            .map(CompiledCriterion::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            ruleset: ruleset.clone(),
            compiled,
        })
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Decide one case. Gates short-circuit; criteria are evaluated in
    /// catalog order so the diagnostic trail is reproducible.
    pub fn evaluate(&self, corpus: &EvidenceCorpus, facts: &StructuredFacts) -> DecisionRecord {
        for gate in &self.ruleset.gates {
            if let gates::GateOutcome::Failed { detail } = gates::run_gate(&gate.check, facts) {
                return DecisionRecord {
                    category: EligibilityCategory::AutomaticRejection,
                    confidence: gate.failure_confidence,
                    score: 0.0,
                    recommendation: recommend::advisory(
                        EligibilityCategory::AutomaticRejection,
                        &[],
                    ),
                    legal_grounds: vec![gate.legal_ground.to_owned()],
                    diagnostics: vec![format!("gate `{}` failed: {detail}", gate.id)],
                    criteria: Vec::new(),
                };
            }
        }

        let mut results = Vec::with_capacity(self.compiled.len());
        let mut diagnostics = Vec::new();
        for compiled in &self.compiled {
            let result = match criteria::evaluate_criterion(compiled, corpus, facts) {
                Ok(result) => result,
                Err(fault) => {
                    diagnostics.push(format!(
                        "criterion `{}` evaluation error: {fault}",
                        compiled.spec.id
                    ));
                    criteria::faulted_result(&compiled.spec, &fault)
                }
            };
            match compiled.spec.group {
                CriterionGroup::Mandatory if !result.met => {
                    diagnostics.push(format!(
                        "criterion `{}` unmet: {}",
                        result.criterion_id, result.note
                    ));
                }
                CriterionGroup::Disqualifying if result.met => {
                    diagnostics.push(format!(
                        "disqualifier `{}` triggered: {}",
                        result.criterion_id, result.note
                    ));
                }
                _ => {}
            }
            results.push(result);
        }

        let aggregate = scoring::aggregate(&self.compiled, &results);
        let category = policy::classify(&aggregate, &self.ruleset.thresholds);
        let confidence = policy::estimate_confidence(&aggregate, &self.ruleset.bonuses);

        let caveat_descriptions: Vec<&str> = aggregate
            .caveats
            .iter()
            .filter_map(|id| {
                self.compiled
                    .iter()
                    .find(|compiled| compiled.spec.id == *id)
                    .map(|compiled| compiled.spec.description)
            })
            .collect();
        let recommendation = recommend::advisory(category, &caveat_descriptions);
        let legal_grounds = recommend::collect_legal_grounds(&self.compiled, &results);

        DecisionRecord {
            category,
            confidence,
            score: aggregate.total_score,
            recommendation,
            legal_grounds,
            diagnostics,
            criteria: results,
        }
    }
}

/// Outcome of a single criterion, preserved verbatim for the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion_id: String,
    pub met: bool,
    pub signed_score: i32,
    pub matched_positive: Vec<String>,
    pub matched_negative: Vec<String>,
    pub note: String,
}

/// Counts and weighted score derived from the criterion results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_score: f32,
    pub met_mandatory: usize,
    pub unmet_mandatory: usize,
    /// Ids of mandatory criteria unmet solely for lack of the backing
    /// document. Always a subset of the unmet set.
    pub caveats: Vec<String>,
    pub disqualifier_count: usize,
    pub favorable_count: usize,
}

impl AggregateResult {
    /// Unmet mandatory criteria that are genuine failures, not pending
    /// documents.
    pub fn critical_unmet(&self) -> usize {
        self.unmet_mandatory.saturating_sub(self.caveats.len())
    }
}

/// Final decision for one case, a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub category: EligibilityCategory,
    pub confidence: f32,
    pub score: f32,
    pub recommendation: String,
    pub legal_grounds: Vec<String>,
    pub diagnostics: Vec<String>,
    pub criteria: Vec<CriterionResult>,
}
