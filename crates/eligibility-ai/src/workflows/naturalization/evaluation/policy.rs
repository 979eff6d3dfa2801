//! Decision table and confidence estimate over the aggregate.

use super::AggregateResult;
use crate::workflows::naturalization::catalog::{ConfidenceBonuses, DecisionThresholds};
use crate::workflows::naturalization::domain::EligibilityCategory;

/// One-shot decision table over disqualifiers, critical gaps and the
/// weighted score. Caveat-only gaps soften the outcome instead of
/// blocking it; two critical gaps is the most a score can still carry.
pub(super) fn classify(
    aggregate: &AggregateResult,
    thresholds: &DecisionThresholds,
) -> EligibilityCategory {
    if aggregate.disqualifier_count > 0 {
        return EligibilityCategory::Ineligible;
    }

    let score = aggregate.total_score;
    let has_caveats = !aggregate.caveats.is_empty();

    match aggregate.critical_unmet() {
        0 => {
            if has_caveats {
                thresholds.clean_caveat_category
            } else if score >= thresholds.high_min {
                EligibilityCategory::HighProbabilityEligible
            } else if score >= thresholds.medium_min {
                EligibilityCategory::MediumProbabilityEligible
            } else {
                EligibilityCategory::LowProbabilityEligible
            }
        }
        1 => {
            if score >= thresholds.single_gap_high_min {
                if has_caveats {
                    EligibilityCategory::DeferredWithCaveats
                } else {
                    EligibilityCategory::HighProbabilityEligible
                }
            } else if score >= thresholds.single_gap_medium_min {
                if has_caveats {
                    EligibilityCategory::DeferredWithCaveats
                } else {
                    EligibilityCategory::MediumProbabilityEligible
                }
            } else if score >= thresholds.single_gap_caveat_min {
                EligibilityCategory::EligibleWithCaveats
            } else {
                EligibilityCategory::UncertainEligibility
            }
        }
        2 => {
            if score >= thresholds.double_gap_caveat_min {
                EligibilityCategory::EligibleWithCaveats
            } else if score >= thresholds.double_gap_uncertain_min {
                EligibilityCategory::UncertainEligibility
            } else {
                EligibilityCategory::Ineligible
            }
        }
        _ => EligibilityCategory::Ineligible,
    }
}

/// Attendance ratio plus flat bonuses, clamped to [0, 1]. Kept separate
/// from the classifier so each side is testable on its own.
pub(super) fn estimate_confidence(
    aggregate: &AggregateResult,
    bonuses: &ConfidenceBonuses,
) -> f32 {
    let total_mandatory = aggregate.met_mandatory + aggregate.unmet_mandatory;
    if total_mandatory == 0 {
        return 0.0;
    }

    let mut confidence = aggregate.met_mandatory as f32 / total_mandatory as f32;
    if aggregate.favorable_count > 0 {
        confidence += bonuses.favorable_evidence;
    }
    if aggregate.disqualifier_count > 0 {
        confidence -= bonuses.disqualifier_penalty;
    }
    if aggregate.unmet_mandatory == 0 {
        confidence += bonuses.zero_unmet;
    }
    if aggregate.met_mandatory >= 2 && aggregate.unmet_mandatory <= 1 {
        confidence += bonuses.strong_attendance;
    }
    if aggregate.met_mandatory >= 2 {
        confidence += bonuses.minimum_attendance;
    }

    confidence.clamp(0.0, 1.0)
}
