//! Canonical ruleset catalog.
//!
//! All three naturalization rulesets are declared here as ordered in-code
//! tables, the single configuration source for the engine. Pattern fragments
//! are regex over the lower-cased evidence corpus; weights, thresholds and
//! confidence bonuses are the operative policy values and must not be
//! "corrected" without a legal review.

mod definitiva;
mod ordinaria;
mod provisoria;

use super::domain::{EligibilityCategory, ProcessKind};
use super::patterns::PatternCompileError;

/// Which aggregation group a criterion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionGroup {
    Mandatory,
    Favorable,
    Disqualifying,
}

/// Structured fact a date-range criterion reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFact {
    AgeAtProcessStart,
    ResidenceYearsAtProcessStart,
    CertificateAgeDays,
}

impl DateFact {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AgeAtProcessStart => "idade na data inicial do processo",
            Self::ResidenceYearsAtProcessStart => "tempo de residência na data inicial",
            Self::CertificateAgeDays => "idade da certidão em dias",
        }
    }
}

/// Pattern lists of one text criterion. `explicit_negation` fragments retract
/// every matched negative and force the criterion met; they encode certidão
/// phrasing like "não consta condenação" that would otherwise trip the plain
/// negative fragments.
#[derive(Debug, Clone)]
pub struct PatternRules {
    pub positive: Vec<&'static str>,
    pub negative: Vec<&'static str>,
    pub explicit_negation: Vec<&'static str>,
}

impl PatternRules {
    pub fn positive_only(positive: Vec<&'static str>) -> Self {
        Self {
            positive,
            negative: Vec::new(),
            explicit_negation: Vec::new(),
        }
    }
}

/// Evaluator dispatched per criterion.
#[derive(Debug, Clone)]
pub enum CriterionKind {
    Pattern(PatternRules),
    DateRange {
        fact: DateFact,
        min: Option<i64>,
        max: Option<i64>,
    },
    ExternalConfirmation {
        registry_key: &'static str,
        fallback: PatternRules,
    },
    DocumentPresence {
        document: &'static str,
        min_text_len: usize,
        content_negative: Vec<&'static str>,
    },
}

/// One criterion of a ruleset. Immutable after catalog construction.
#[derive(Debug, Clone)]
pub struct CriterionSpec {
    pub id: &'static str,
    pub description: &'static str,
    pub weight: f32,
    pub group: CriterionGroup,
    pub kind: CriterionKind,
    /// Unmet solely for lack of the backing document counts as a caveat
    /// instead of a critical gap.
    pub missing_is_caveat: bool,
    pub legal_ground: Option<&'static str>,
}

/// Data predicate a gate runs over the structured facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateCheck {
    AgeAtProcessStart { min: Option<i32>, max: Option<i32> },
    ResidenceFixedBeforeAge { max_age: i32 },
    RegistryConfirmationRequired { key: &'static str },
}

/// Sequential pre-condition; the first failure ends the evaluation with an
/// automatic rejection citing `legal_ground`.
#[derive(Debug, Clone)]
pub struct GateSpec {
    pub id: &'static str,
    pub description: &'static str,
    pub check: GateCheck,
    pub legal_ground: &'static str,
    pub failure_confidence: f32,
}

/// Score cut-offs of the tiered decision table, per ruleset.
#[derive(Debug, Clone)]
pub struct DecisionThresholds {
    pub high_min: f32,
    pub medium_min: f32,
    pub single_gap_high_min: f32,
    pub single_gap_medium_min: f32,
    pub single_gap_caveat_min: f32,
    pub double_gap_caveat_min: f32,
    pub double_gap_uncertain_min: f32,
    /// Category for a case whose only gaps are missing-document caveats.
    pub clean_caveat_category: EligibilityCategory,
}

impl DecisionThresholds {
    fn standard(clean_caveat_category: EligibilityCategory) -> Self {
        Self {
            high_min: 15.0,
            medium_min: 10.0,
            single_gap_high_min: 10.0,
            single_gap_medium_min: 8.0,
            single_gap_caveat_min: 5.0,
            double_gap_caveat_min: 8.0,
            double_gap_uncertain_min: 5.0,
            clean_caveat_category,
        }
    }
}

/// Additive adjustments applied to the attendance-ratio confidence.
#[derive(Debug, Clone)]
pub struct ConfidenceBonuses {
    pub favorable_evidence: f32,
    pub disqualifier_penalty: f32,
    pub zero_unmet: f32,
    pub strong_attendance: f32,
    pub minimum_attendance: f32,
}

impl ConfidenceBonuses {
    fn standard() -> Self {
        Self {
            favorable_evidence: 0.20,
            disqualifier_penalty: 0.20,
            zero_unmet: 0.25,
            strong_attendance: 0.15,
            minimum_attendance: 0.10,
        }
    }
}

/// Complete ordered configuration for one process kind.
#[derive(Debug, Clone)]
pub struct Ruleset {
    pub process_kind: ProcessKind,
    pub legal_basis: &'static str,
    pub gates: Vec<GateSpec>,
    pub criteria: Vec<CriterionSpec>,
    pub thresholds: DecisionThresholds,
    pub bonuses: ConfidenceBonuses,
}

impl Ruleset {
    /// Structural checks run before any pattern is compiled: weight signs per
    /// group, unique ids, non-empty trigger lists, gate confidences in range.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::BTreeSet::new();
        for criterion in &self.criteria {
            if !seen.insert(criterion.id) {
                return Err(CatalogError::DuplicateCriterion {
                    id: criterion.id.to_owned(),
                });
            }
            match criterion.group {
                CriterionGroup::Mandatory | CriterionGroup::Favorable => {
                    if criterion.weight <= 0.0 {
                        return Err(CatalogError::WeightSign {
                            criterion: criterion.id.to_owned(),
                            expected: "positive",
                            weight: criterion.weight,
                        });
                    }
                }
                CriterionGroup::Disqualifying => {
                    if criterion.weight >= 0.0 {
                        return Err(CatalogError::WeightSign {
                            criterion: criterion.id.to_owned(),
                            expected: "negative",
                            weight: criterion.weight,
                        });
                    }
                }
            }
            let trigger_list = match &criterion.kind {
                CriterionKind::Pattern(rules) => Some(&rules.positive),
                CriterionKind::ExternalConfirmation { fallback, .. } => Some(&fallback.positive),
                CriterionKind::DateRange { .. } | CriterionKind::DocumentPresence { .. } => None,
            };
            if let Some(list) = trigger_list {
                if list.is_empty() {
                    return Err(CatalogError::EmptyPatternList {
                        criterion: criterion.id.to_owned(),
                    });
                }
            }
        }
        for gate in &self.gates {
            if !(0.0..=1.0).contains(&gate.failure_confidence) {
                return Err(CatalogError::GateConfidence {
                    gate: gate.id.to_owned(),
                    value: gate.failure_confidence,
                });
            }
        }
        Ok(())
    }

    pub fn criteria_in_group(&self, group: CriterionGroup) -> impl Iterator<Item = &CriterionSpec> {
        self.criteria
            .iter()
            .filter(move |criterion| criterion.group == group)
    }
}

/// The three standard rulesets, indexed by process kind.
#[derive(Debug, Clone)]
pub struct RulesetCatalog {
    rulesets: [Ruleset; 3],
}

impl RulesetCatalog {
    pub fn standard() -> Self {
        Self {
            rulesets: [
                definitiva::ruleset(),
                ordinaria::ruleset(),
                provisoria::ruleset(),
            ],
        }
    }

    pub fn ruleset(&self, kind: ProcessKind) -> &Ruleset {
        let index = ProcessKind::ordered()
            .iter()
            .position(|candidate| *candidate == kind)
            .unwrap_or(0);
        &self.rulesets[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ruleset> {
        self.rulesets.iter()
    }
}

/// Configuration defect detected while building an engine. Fatal and
/// operator-facing; no case is evaluated against a broken ruleset.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("criterion `{criterion}` carries an invalid pattern: {source}")]
    InvalidPattern {
        criterion: String,
        #[source]
        source: PatternCompileError,
    },
    #[error("criterion `{criterion}` must carry a {expected} weight, found {weight}")]
    WeightSign {
        criterion: String,
        expected: &'static str,
        weight: f32,
    },
    #[error("duplicate criterion id `{id}`")]
    DuplicateCriterion { id: String },
    #[error("criterion `{criterion}` declares no trigger patterns")]
    EmptyPatternList { criterion: String },
    #[error("gate `{gate}` failure confidence {value} is outside [0, 1]")]
    GateConfidence { gate: String, value: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_passes_validation() {
        let catalog = RulesetCatalog::standard();
        for ruleset in catalog.iter() {
            ruleset
                .validate()
                .unwrap_or_else(|err| panic!("{:?}: {err}", ruleset.process_kind));
        }
    }

    #[test]
    fn catalog_indexes_by_process_kind() {
        let catalog = RulesetCatalog::standard();
        for kind in ProcessKind::ordered() {
            assert_eq!(catalog.ruleset(kind).process_kind, kind);
        }
    }

    #[test]
    fn every_ruleset_carries_gates_and_mandatory_criteria() {
        let catalog = RulesetCatalog::standard();
        for ruleset in catalog.iter() {
            assert!(!ruleset.gates.is_empty(), "{:?}", ruleset.process_kind);
            assert!(
                ruleset
                    .criteria_in_group(CriterionGroup::Mandatory)
                    .count()
                    >= 3,
                "{:?}",
                ruleset.process_kind
            );
        }
    }

    #[test]
    fn validation_rejects_wrong_disqualifier_sign() {
        let mut ruleset = definitiva::ruleset();
        for criterion in &mut ruleset.criteria {
            if criterion.group == CriterionGroup::Disqualifying {
                criterion.weight = 2.0;
            }
        }
        assert!(matches!(
            ruleset.validate(),
            Err(CatalogError::WeightSign { expected: "negative", .. })
        ));
    }

    #[test]
    fn validation_rejects_duplicate_ids() {
        let mut ruleset = ordinaria::ruleset();
        let clone = ruleset.criteria[0].clone();
        ruleset.criteria.push(clone);
        assert!(matches!(
            ruleset.validate(),
            Err(CatalogError::DuplicateCriterion { .. })
        ));
    }
}
