//! Per-criterion evaluation, dispatched on the declared kind.

use super::CriterionResult;
use crate::workflows::naturalization::catalog::{
    CatalogError, CriterionKind, CriterionSpec, DateFact, PatternRules,
};
use crate::workflows::naturalization::domain::{EvidenceCorpus, StructuredFacts};
use crate::workflows::naturalization::patterns::{CompiledPatternSet, CompiledPatterns};
use std::fmt;

/// Criterion with its pattern tables compiled, built once per engine.
pub(super) struct CompiledCriterion {
    pub spec: CriterionSpec,
    kind: CompiledKind,
}

enum CompiledKind {
    Pattern(CompiledPatternSet),
    DateRange {
        fact: DateFact,
        min: Option<i64>,
        max: Option<i64>,
    },
    ExternalConfirmation {
        registry_key: &'static str,
        fallback: CompiledPatternSet,
    },
    DocumentPresence {
        document: &'static str,
        min_text_len: usize,
        content_negative: CompiledPatterns,
    },
}

impl CompiledCriterion {
    pub(super) fn compile(spec: &CriterionSpec) -> Result<Self, CatalogError> {
        let compile_set = |rules: &PatternRules| {
            CompiledPatternSet::compile(&rules.positive, &rules.negative, &rules.explicit_negation)
                .map_err(|source| CatalogError::InvalidPattern {
                    criterion: spec.id.to_owned(),
                    source,
                })
        };

        let kind = match &spec.kind {
            CriterionKind::Pattern(rules) => CompiledKind::Pattern(compile_set(rules)?),
            CriterionKind::DateRange { fact, min, max } => CompiledKind::DateRange {
                fact: *fact,
                min: *min,
                max: *max,
            },
            CriterionKind::ExternalConfirmation {
                registry_key,
                fallback,
            } => CompiledKind::ExternalConfirmation {
                registry_key: *registry_key,
                fallback: compile_set(fallback)?,
            },
            CriterionKind::DocumentPresence {
                document,
                min_text_len,
                content_negative,
            } => CompiledKind::DocumentPresence {
                document: *document,
                min_text_len: *min_text_len,
                content_negative: CompiledPatterns::compile(content_negative).map_err(
                    |source| CatalogError::InvalidPattern {
                        criterion: spec.id.to_owned(),
                        source,
                    },
                )?,
            },
        };

        Ok(Self {
            spec: spec.clone(),
            kind,
        })
    }
}

/// Fault isolated to one criterion; the surrounding evaluation continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum CriterionFault {
    ImplausibleDates { detail: String },
}

impl fmt::Display for CriterionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImplausibleDates { detail } => write!(f, "implausible dates: {detail}"),
        }
    }
}

pub(super) fn evaluate_criterion(
    compiled: &CompiledCriterion,
    corpus: &EvidenceCorpus,
    facts: &StructuredFacts,
) -> Result<CriterionResult, CriterionFault> {
    let spec = &compiled.spec;
    match &compiled.kind {
        CompiledKind::Pattern(set) => Ok(evaluate_patterns(spec, set, corpus)),
        CompiledKind::DateRange { fact, min, max } => {
            evaluate_date_range(spec, *fact, *min, *max, facts)
        }
        CompiledKind::ExternalConfirmation {
            registry_key,
            fallback,
        } => match facts.registry_confirmation(registry_key) {
            Some(true) => Ok(CriterionResult {
                criterion_id: spec.id.to_owned(),
                met: true,
                signed_score: 1,
                matched_positive: Vec::new(),
                matched_negative: Vec::new(),
                note: format!("registry confirms `{registry_key}`"),
            }),
            Some(false) => Ok(CriterionResult {
                criterion_id: spec.id.to_owned(),
                met: false,
                signed_score: -1,
                matched_positive: Vec::new(),
                matched_negative: Vec::new(),
                note: format!("registry denies `{registry_key}`"),
            }),
            None => {
                let mut result = evaluate_patterns(spec, fallback, corpus);
                result.note = format!("no registry entry for `{registry_key}`; {}", result.note);
                Ok(result)
            }
        },
        CompiledKind::DocumentPresence {
            document,
            min_text_len,
            content_negative,
        } => Ok(evaluate_document_presence(
            spec,
            document,
            *min_text_len,
            content_negative,
            corpus,
        )),
    }
}

/// Result standing in for a criterion whose evaluation faulted.
pub(super) fn faulted_result(spec: &CriterionSpec, fault: &CriterionFault) -> CriterionResult {
    CriterionResult {
        criterion_id: spec.id.to_owned(),
        met: false,
        signed_score: 0,
        matched_positive: Vec::new(),
        matched_negative: Vec::new(),
        note: format!("evaluation error: {fault}"),
    }
}

fn evaluate_patterns(
    spec: &CriterionSpec,
    set: &CompiledPatternSet,
    corpus: &EvidenceCorpus,
) -> CriterionResult {
    let text = corpus.normalized_text();

    if corpus.is_empty() {
        return CriterionResult {
            criterion_id: spec.id.to_owned(),
            met: false,
            signed_score: 0,
            matched_positive: Vec::new(),
            matched_negative: Vec::new(),
            note: "no evidence found".to_owned(),
        };
    }

    let positives = set.positive.matches(text);
    let mut negatives = set.negative.matches(text);
    let negated_explicitly =
        !set.explicit_negation.is_empty() && !set.explicit_negation.matches(text).is_empty();

    let (met, note) = if negated_explicitly {
        let cleared = negatives.len();
        negatives.clear();
        (
            true,
            if cleared > 0 {
                format!("explicit negation retracts {cleared} negative match(es)")
            } else {
                "explicit negation present".to_owned()
            },
        )
    } else if !positives.is_empty() && negatives.is_empty() {
        (true, format!("{} positive match(es)", positives.len()))
    } else if positives.is_empty() && negatives.is_empty() {
        (false, "no matching evidence".to_owned())
    } else if positives.is_empty() {
        (false, format!("{} negative match(es)", negatives.len()))
    } else {
        (
            false,
            format!(
                "evidence on both sides: {} positive, {} negative",
                positives.len(),
                negatives.len()
            ),
        )
    };

    let signed_score = positives.len() as i32 - negatives.len() as i32;
    CriterionResult {
        criterion_id: spec.id.to_owned(),
        met,
        signed_score,
        matched_positive: positives.iter().map(|m| (*m).to_owned()).collect(),
        matched_negative: negatives.iter().map(|m| (*m).to_owned()).collect(),
        note,
    }
}

fn evaluate_date_range(
    spec: &CriterionSpec,
    fact: DateFact,
    min: Option<i64>,
    max: Option<i64>,
    facts: &StructuredFacts,
) -> Result<CriterionResult, CriterionFault> {
    let value = match fact {
        DateFact::AgeAtProcessStart => facts.age_at_process_start().map(i64::from),
        DateFact::ResidenceYearsAtProcessStart => {
            facts.residence_years_at_process_start().map(i64::from)
        }
        DateFact::CertificateAgeDays => facts.certificate_age_days(),
    };

    let Some(value) = value else {
        return Ok(CriterionResult {
            criterion_id: spec.id.to_owned(),
            met: false,
            signed_score: 0,
            matched_positive: Vec::new(),
            matched_negative: Vec::new(),
            note: format!("missing fact: {}", fact.label()),
        });
    };

    // A certificate emitted after the process start yields negative days and
    // remains a valid fresh certificate; negative ages never are.
    if value < 0 && fact != DateFact::CertificateAgeDays {
        return Err(CriterionFault::ImplausibleDates {
            detail: format!("{} computed as {value}", fact.label()),
        });
    }

    let below = min.map(|bound| value < bound).unwrap_or(false);
    let above = max.map(|bound| value > bound).unwrap_or(false);
    if below || above {
        Ok(CriterionResult {
            criterion_id: spec.id.to_owned(),
            met: false,
            signed_score: -1,
            matched_positive: Vec::new(),
            matched_negative: Vec::new(),
            note: format!("{} = {value}, outside the required range", fact.label()),
        })
    } else {
        Ok(CriterionResult {
            criterion_id: spec.id.to_owned(),
            met: true,
            signed_score: 1,
            matched_positive: Vec::new(),
            matched_negative: Vec::new(),
            note: format!("{} = {value}, within the required range", fact.label()),
        })
    }
}

fn evaluate_document_presence(
    spec: &CriterionSpec,
    document: &str,
    min_text_len: usize,
    content_negative: &CompiledPatterns,
    corpus: &EvidenceCorpus,
) -> CriterionResult {
    let Some(text) = corpus.document_text(document) else {
        return CriterionResult {
            criterion_id: spec.id.to_owned(),
            met: false,
            signed_score: 0,
            matched_positive: Vec::new(),
            matched_negative: Vec::new(),
            note: format!("document `{document}` missing"),
        };
    };

    let trimmed = text.trim();
    if trimmed.chars().count() < min_text_len {
        return CriterionResult {
            criterion_id: spec.id.to_owned(),
            met: false,
            signed_score: 0,
            matched_positive: Vec::new(),
            matched_negative: Vec::new(),
            note: format!("document `{document}` below the minimum text length"),
        };
    }

    let lowered = trimmed.to_lowercase();
    let contradictions = content_negative.matches(&lowered);
    if contradictions.is_empty() {
        CriterionResult {
            criterion_id: spec.id.to_owned(),
            met: true,
            signed_score: 1,
            matched_positive: Vec::new(),
            matched_negative: Vec::new(),
            note: format!("document `{document}` present and readable"),
        }
    } else {
        CriterionResult {
            criterion_id: spec.id.to_owned(),
            met: false,
            signed_score: -1,
            matched_positive: Vec::new(),
            matched_negative: contradictions.iter().map(|m| (*m).to_owned()).collect(),
            note: format!("document `{document}` contradicted by its own content"),
        }
    }
}
