//! Second decision pass once the document checklist arrives.
//!
//! The checklist is produced by an external collaborator that downloads
//! and validates the required attachments. Consolidation re-grades the
//! primary decision against it: each problem shaves a per-category
//! penalty off a per-category baseline, down to a floor, and any problem
//! at all relabels plain-eligible outcomes to deferral with caveats.

use super::DecisionRecord;
use crate::workflows::naturalization::domain::EligibilityCategory;
use serde::{Deserialize, Serialize};

/// Terminal status reported by the checklist collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    Complete,
    Incomplete,
}

/// Download/validation status for the attachments of one case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChecklist {
    #[serde(default)]
    pub missing_documents: Vec<String>,
    #[serde(default)]
    pub failed_downloads: Vec<String>,
    #[serde(default)]
    pub completeness_pct: Option<u8>,
    #[serde(default)]
    pub status: Option<ChecklistStatus>,
}

impl DocumentChecklist {
    /// Every deviation from a fully resolved checklist, one message per
    /// problem. An unreported status counts as a problem; an unreported
    /// percentage does not.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for document in &self.missing_documents {
            problems.push(format!("Documento faltante: {document}"));
        }
        for document in &self.failed_downloads {
            problems.push(format!("Falha no download: {document}"));
        }
        if let Some(pct) = self.completeness_pct {
            if pct < 100 {
                problems.push(format!(
                    "Percentual de documentos: {pct}% (deveria ser 100%)"
                ));
            }
        }
        match self.status {
            Some(ChecklistStatus::Complete) => {}
            Some(ChecklistStatus::Incomplete) => problems.push(
                "Status dos documentos: incompleto (deveria ser 'completo')".to_owned(),
            ),
            None => problems.push(
                "Status dos documentos: não informado (deveria ser 'completo')".to_owned(),
            ),
        }
        problems
    }
}

/// Outcome of the consolidation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedDecision {
    pub category: EligibilityCategory,
    pub confidence: f32,
    pub review_score: i32,
    pub problems: Vec<String>,
    pub recommendation: String,
}

struct ReviewBand {
    confidence: f32,
    score: i32,
    confidence_penalty: f32,
    score_penalty: i32,
    confidence_floor: f32,
    score_floor: i32,
}

fn review_band(category: EligibilityCategory) -> ReviewBand {
    let band = |confidence,
                score,
                confidence_penalty,
                score_penalty,
                confidence_floor,
                score_floor| ReviewBand {
        confidence,
        score,
        confidence_penalty,
        score_penalty,
        confidence_floor,
        score_floor,
    };
    match category {
        EligibilityCategory::HighProbabilityEligible => band(1.00, 100, 0.10, 10, 0.30, 30),
        EligibilityCategory::MediumProbabilityEligible => band(0.85, 85, 0.10, 10, 0.30, 30),
        EligibilityCategory::LowProbabilityEligible => band(0.70, 70, 0.10, 10, 0.30, 30),
        EligibilityCategory::EligibleWithCaveats
        | EligibilityCategory::DeferredWithCaveats => band(0.80, 80, 0.05, 5, 0.40, 40),
        EligibilityCategory::UncertainEligibility => band(0.60, 60, 0.08, 8, 0.30, 30),
        EligibilityCategory::Ineligible => band(0.20, 20, 0.0, 0, 0.20, 20),
        EligibilityCategory::AutomaticRejection => band(1.00, 0, 0.0, 0, 1.00, 0),
    }
}

/// Re-grades a primary decision against the checklist. The consolidated
/// confidence never exceeds the primary confidence.
pub fn consolidate(primary: &DecisionRecord, checklist: &DocumentChecklist) -> ConsolidatedDecision {
    let problems = checklist.problems();
    let band = review_band(primary.category);

    let penalized = band.confidence - problems.len() as f32 * band.confidence_penalty;
    let confidence = penalized.max(band.confidence_floor).min(primary.confidence);
    let review_score =
        (band.score - problems.len() as i32 * band.score_penalty).max(band.score_floor);

    let category = if !problems.is_empty()
        && matches!(
            primary.category,
            EligibilityCategory::HighProbabilityEligible
                | EligibilityCategory::MediumProbabilityEligible
                | EligibilityCategory::LowProbabilityEligible
        ) {
        EligibilityCategory::DeferredWithCaveats
    } else {
        primary.category
    };

    let recommendation = if problems.is_empty() {
        "Documentação em ordem - decisão primária mantida".to_owned()
    } else {
        format!(
            "{} problema(s) identificado(s) no checklist de documentos",
            problems.len()
        )
    };

    ConsolidatedDecision {
        category,
        confidence,
        review_score,
        problems,
        recommendation,
    }
}
